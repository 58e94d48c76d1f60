//! Day classification.
//!
//! # Precedence (highest first)
//!
//! | # | Condition | Result |
//! |---|-----------|--------|
//! | 1 | Strictly inside a holiday period of at least `long_period_days` | `LongWeekendMiddle` |
//! | 2 | Inside any holiday period | `Holiday` |
//! | 3 | Saturday or Sunday | `Weekend` |
//! | 4 | Friday | `Friday` |
//! | 5 | Otherwise | `Regular` |
//!
//! Rules are checked against every holiday, so overlapping periods never
//! make the outcome depend on list order.

use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::BTreeMap;

use crate::models::holiday::DEFAULT_LONG_PERIOD_DAYS;
use crate::models::{DayType, Holiday};

/// Assigns exactly one [`DayType`] to each date.
///
/// Pure and stateless apart from the long-period threshold.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use u_rotation::models::{DayType, Holiday};
/// use u_rotation::weighting::DayClassifier;
///
/// let easter = Holiday::range(
///     NaiveDate::from_ymd_opt(2024, 3, 29).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
/// ).unwrap();
/// let classifier = DayClassifier::new();
/// let saturday = NaiveDate::from_ymd_opt(2024, 3, 30).unwrap();
/// assert_eq!(classifier.classify(saturday, &[easter]), DayType::LongWeekendMiddle);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayClassifier {
    long_period_days: u32,
}

impl DayClassifier {
    /// Creates a classifier with the default long-period threshold (3 days).
    pub fn new() -> Self {
        Self {
            long_period_days: DEFAULT_LONG_PERIOD_DAYS,
        }
    }

    /// Sets the long-period threshold.
    pub fn with_long_period_days(mut self, days: u32) -> Self {
        self.long_period_days = days;
        self
    }

    /// Current long-period threshold.
    pub fn long_period_days(&self) -> u32 {
        self.long_period_days
    }

    /// Classifies a date against a list of holidays.
    pub fn classify(&self, date: NaiveDate, holidays: &[Holiday]) -> DayType {
        if holidays
            .iter()
            .any(|h| h.span_days() >= self.long_period_days && h.is_interior(date))
        {
            return DayType::LongWeekendMiddle;
        }

        if holidays.iter().any(|h| h.contains(date)) {
            return DayType::Holiday;
        }

        if is_weekend(date) {
            DayType::Weekend
        } else if date.weekday() == Weekday::Fri {
            DayType::Friday
        } else {
            DayType::Regular
        }
    }

    /// Classifies every date of the inclusive range `[start, end]`.
    ///
    /// Empty when `end < start`.
    pub fn analyze_period(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        holidays: &[Holiday],
    ) -> BTreeMap<NaiveDate, DayType> {
        start
            .iter_days()
            .take_while(|d| *d <= end)
            .map(|d| (d, self.classify(d, holidays)))
            .collect()
    }
}

impl Default for DayClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a date is a Saturday or Sunday.
#[inline]
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn easter() -> Holiday {
        Holiday::range(d(2024, 3, 29), d(2024, 4, 1))
            .unwrap()
            .with_name("Easter")
    }

    #[test]
    fn test_plain_weekdays() {
        let c = DayClassifier::new();
        assert_eq!(c.classify(d(2024, 1, 1), &[]), DayType::Regular); // Monday
        assert_eq!(c.classify(d(2024, 1, 4), &[]), DayType::Regular); // Thursday
        assert_eq!(c.classify(d(2024, 1, 5), &[]), DayType::Friday);
        assert_eq!(c.classify(d(2024, 1, 6), &[]), DayType::Weekend);
        assert_eq!(c.classify(d(2024, 1, 7), &[]), DayType::Weekend);
    }

    #[test]
    fn test_long_period_edges_and_middle() {
        let c = DayClassifier::new();
        let hs = [easter()];
        assert_eq!(c.classify(d(2024, 3, 29), &hs), DayType::Holiday); // first day, Friday
        assert_eq!(c.classify(d(2024, 3, 30), &hs), DayType::LongWeekendMiddle);
        assert_eq!(c.classify(d(2024, 3, 31), &hs), DayType::LongWeekendMiddle);
        assert_eq!(c.classify(d(2024, 4, 1), &hs), DayType::Holiday); // last day
        assert_eq!(c.classify(d(2024, 4, 2), &hs), DayType::Regular);
    }

    #[test]
    fn test_holiday_beats_weekend() {
        let c = DayClassifier::new();
        let hs = [Holiday::single(d(2024, 1, 6))];
        assert_eq!(c.classify(d(2024, 1, 6), &hs), DayType::Holiday);
    }

    #[test]
    fn test_short_period_has_no_middle() {
        let c = DayClassifier::new();
        let hs = [Holiday::range(d(2024, 5, 23), d(2024, 5, 24)).unwrap()];
        assert_eq!(c.classify(d(2024, 5, 23), &hs), DayType::Holiday);
        assert_eq!(c.classify(d(2024, 5, 24), &hs), DayType::Holiday);
    }

    #[test]
    fn test_threshold_changes_middle_detection() {
        let hs = [Holiday::range(d(2024, 1, 1), d(2024, 1, 3)).unwrap()];
        assert_eq!(
            DayClassifier::new().classify(d(2024, 1, 2), &hs),
            DayType::LongWeekendMiddle
        );
        assert_eq!(
            DayClassifier::new()
                .with_long_period_days(4)
                .classify(d(2024, 1, 2), &hs),
            DayType::Holiday
        );
    }

    #[test]
    fn test_overlap_independent_of_order() {
        let c = DayClassifier::new();
        let short = Holiday::single(d(2024, 3, 30));
        let a = [short.clone(), easter()];
        let b = [easter(), short];
        assert_eq!(c.classify(d(2024, 3, 30), &a), DayType::LongWeekendMiddle);
        assert_eq!(c.classify(d(2024, 3, 30), &b), DayType::LongWeekendMiddle);
    }

    #[test]
    fn test_analyze_period() {
        let c = DayClassifier::new();
        let hs = [easter()];
        let types = c.analyze_period(d(2024, 3, 28), d(2024, 4, 2), &hs);
        assert_eq!(types.len(), 6);
        assert_eq!(types[&d(2024, 3, 28)], DayType::Regular);
        assert_eq!(types[&d(2024, 3, 29)], DayType::Holiday);
        assert_eq!(types[&d(2024, 3, 30)], DayType::LongWeekendMiddle);
        assert_eq!(types[&d(2024, 4, 1)], DayType::Holiday);

        assert!(
            c.analyze_period(d(2024, 4, 2), d(2024, 3, 28), &hs).is_empty()
        );
    }

    #[test]
    fn test_classify_total_and_deterministic_1900_2100() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let c = DayClassifier::new();
        let base = d(1900, 1, 1);
        let span = (d(2100, 12, 31) - base).num_days();

        let holidays: Vec<Holiday> = (0..40)
            .map(|_| {
                let start = base + chrono::Duration::days(rng.random_range(0..span));
                let len = rng.random_range(0..6);
                Holiday::range(start, start + chrono::Duration::days(len)).unwrap()
            })
            .collect();

        for _ in 0..5_000 {
            let date = base + chrono::Duration::days(rng.random_range(0..=span));
            let first = c.classify(date, &holidays);
            assert_eq!(first, c.classify(date, &holidays));

            let in_holiday = holidays.iter().any(|h| h.contains(date));
            match first {
                DayType::Holiday | DayType::LongWeekendMiddle => assert!(in_holiday),
                DayType::Weekend => assert!(!in_holiday && is_weekend(date)),
                DayType::Friday => assert!(!in_holiday && date.weekday() == Weekday::Fri),
                DayType::Regular => {
                    assert!(!in_holiday && date.weekday().number_from_monday() <= 4)
                }
            }
        }
    }
}
