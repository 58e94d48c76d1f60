//! Holiday periods and the holiday calendar.
//!
//! A [`Holiday`] is an inclusive date range `[start_date, end_date]`. A
//! single-day holiday has no end date. Holidays spanning at least the
//! long-period length (default 3 days) have *middle days*: every date
//! strictly between the first and last day.
//!
//! # Precedence
//! When holidays overlap, membership questions (`is_holiday`) are answered
//! across all periods; `holiday_for` reports the first match in list order.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{Result, RotationError};

/// Default minimum span (days) for a holiday period to count as long.
pub const DEFAULT_LONG_PERIOD_DAYS: u32 = 3;

/// A holiday period, inclusive of both ends.
///
/// Construction validates `end_date >= start_date`; deserialization runs
/// the same check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HolidayRecord")]
pub struct Holiday {
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    name: Option<String>,
}

/// Unvalidated wire shape of a holiday.
#[derive(Debug, Clone, Deserialize)]
struct HolidayRecord {
    start_date: NaiveDate,
    #[serde(default)]
    end_date: Option<NaiveDate>,
    #[serde(default)]
    name: Option<String>,
}

impl TryFrom<HolidayRecord> for Holiday {
    type Error = RotationError;

    fn try_from(record: HolidayRecord) -> Result<Self> {
        Holiday::new(record.start_date, record.end_date, record.name)
    }
}

impl Holiday {
    /// Creates a holiday period.
    ///
    /// # Errors
    /// [`RotationError::InvalidRange`] when `end_date < start_date`.
    pub fn new(
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
        name: Option<String>,
    ) -> Result<Self> {
        if let Some(end) = end_date {
            if end < start_date {
                return Err(RotationError::InvalidRange {
                    start: start_date,
                    end,
                });
            }
        }
        let name = name.filter(|n| !n.trim().is_empty());
        Ok(Self {
            start_date,
            end_date,
            name,
        })
    }

    /// Creates a single-day holiday.
    pub fn single(date: NaiveDate) -> Self {
        Self {
            start_date: date,
            end_date: None,
            name: None,
        }
    }

    /// Creates a multi-day holiday.
    pub fn range(start_date: NaiveDate, end_date: NaiveDate) -> Result<Self> {
        Self::new(start_date, Some(end_date), None)
    }

    /// Sets the holiday name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// First day of the period.
    #[inline]
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Explicit end date, if any.
    #[inline]
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    /// Last day of the period (the start date for single-day holidays).
    #[inline]
    pub fn last_date(&self) -> NaiveDate {
        self.end_date.unwrap_or(self.start_date)
    }

    /// Holiday name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Number of calendar days covered.
    pub fn span_days(&self) -> u32 {
        (self.last_date() - self.start_date).num_days() as u32 + 1
    }

    /// Whether the holiday covers more than one day.
    pub fn is_multi_day(&self) -> bool {
        self.last_date() != self.start_date
    }

    /// All covered dates in ascending order, inclusive of both ends.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.start_date
            .iter_days()
            .take(self.span_days() as usize)
            .collect()
    }

    /// Whether a date falls within the period.
    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.last_date()
    }

    /// Whether a date lies strictly between the first and last day.
    #[inline]
    pub fn is_interior(&self, date: NaiveDate) -> bool {
        date > self.start_date && date < self.last_date()
    }

    /// Dates strictly between the first and last day.
    ///
    /// Empty for periods shorter than three days.
    pub fn middle_days(&self) -> BTreeSet<NaiveDate> {
        self.dates()
            .into_iter()
            .filter(|d| self.is_interior(*d))
            .collect()
    }

    /// Whether the period overlaps the inclusive range `[from, to]`.
    pub fn overlaps(&self, from: NaiveDate, to: NaiveDate) -> bool {
        self.start_date <= to && self.last_date() >= from
    }
}

/// A holiday period at least as long as the long-period threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LongPeriod {
    /// First day of the period.
    pub start: NaiveDate,
    /// Last day of the period.
    pub end: NaiveDate,
}

/// An ordered collection of holidays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HolidayCalendar {
    holidays: Vec<Holiday>,
    /// Minimum span (days) for a period to count as a long period.
    pub long_period_days: u32,
}

impl HolidayCalendar {
    /// Creates a calendar over the given holidays.
    pub fn new(holidays: Vec<Holiday>) -> Self {
        Self {
            holidays,
            long_period_days: DEFAULT_LONG_PERIOD_DAYS,
        }
    }

    /// Sets the long-period threshold.
    pub fn with_long_period_days(mut self, days: u32) -> Self {
        self.long_period_days = days;
        self
    }

    /// Appends a holiday.
    pub fn add(&mut self, holiday: Holiday) {
        self.holidays.push(holiday);
    }

    /// Holidays in registration order.
    pub fn holidays(&self) -> &[Holiday] {
        &self.holidays
    }

    /// Whether any holiday covers the date.
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.iter().any(|h| h.contains(date))
    }

    /// First holiday (in list order) covering the date.
    pub fn holiday_for(&self, date: NaiveDate) -> Option<&Holiday> {
        self.holidays.iter().find(|h| h.contains(date))
    }

    /// Whether the date is an interior day of some long period.
    pub fn is_long_period_interior(&self, date: NaiveDate) -> bool {
        self.holidays
            .iter()
            .any(|h| h.span_days() >= self.long_period_days && h.is_interior(date))
    }

    /// Long periods overlapping the given month, in list order.
    ///
    /// Returns an empty list for an invalid year/month.
    pub fn find_long_periods(&self, year: i32, month: u32) -> Vec<LongPeriod> {
        let Some((first, last)) = month_bounds(year, month) else {
            return Vec::new();
        };
        self.holidays
            .iter()
            .filter(|h| h.span_days() >= self.long_period_days && h.overlaps(first, last))
            .map(|h| LongPeriod {
                start: h.start_date(),
                end: h.last_date(),
            })
            .collect()
    }
}

impl From<Vec<Holiday>> for HolidayCalendar {
    fn from(holidays: Vec<Holiday>) -> Self {
        Self::new(holidays)
    }
}

/// First and last day of a month, or `None` if the month is invalid.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let last = next.pred_opt()?;
    debug_assert_eq!(last.month(), month);
    Some((first, last))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn sample_holidays() -> Vec<Holiday> {
        vec![
            Holiday::single(d(2024, 2, 6)).with_name("Regular Holiday"),
            Holiday::range(d(2024, 3, 29), d(2024, 4, 1))
                .unwrap()
                .with_name("Easter"),
            Holiday::range(d(2024, 5, 23), d(2024, 5, 24))
                .unwrap()
                .with_name("Bridge Holiday"),
            Holiday::range(d(2024, 1, 1), d(2024, 1, 3))
                .unwrap()
                .with_name("New Year Holiday"),
        ]
    }

    #[test]
    fn test_invalid_range_rejected() {
        let err = Holiday::range(d(2024, 1, 5), d(2024, 1, 4)).unwrap_err();
        assert!(matches!(err, RotationError::InvalidRange { .. }));
    }

    #[test]
    fn test_single_day_dates() {
        let h = Holiday::single(d(2024, 1, 1));
        assert_eq!(h.dates(), vec![d(2024, 1, 1)]);
        assert_eq!(h.span_days(), 1);
        assert!(!h.is_multi_day());
        assert!(h.middle_days().is_empty());
    }

    #[test]
    fn test_same_start_and_end_is_single_day() {
        let h = Holiday::range(d(2024, 1, 1), d(2024, 1, 1)).unwrap();
        assert!(!h.is_multi_day());
        assert_eq!(h.dates().len(), 1);
    }

    #[test]
    fn test_multi_day_dates_cross_month() {
        let h = Holiday::range(d(2024, 3, 29), d(2024, 4, 1)).unwrap();
        assert_eq!(
            h.dates(),
            vec![
                d(2024, 3, 29),
                d(2024, 3, 30),
                d(2024, 3, 31),
                d(2024, 4, 1)
            ]
        );
        assert_eq!(h.span_days(), 4);
        assert!(h.contains(d(2024, 4, 1)));
        assert!(!h.contains(d(2024, 4, 2)));
    }

    #[test]
    fn test_middle_days() {
        let h = Holiday::range(d(2024, 3, 29), d(2024, 4, 1)).unwrap();
        let middle: Vec<_> = h.middle_days().into_iter().collect();
        assert_eq!(middle, vec![d(2024, 3, 30), d(2024, 3, 31)]);

        let bridge = Holiday::range(d(2024, 5, 23), d(2024, 5, 24)).unwrap();
        assert!(bridge.middle_days().is_empty());
    }

    #[test]
    fn test_calendar_is_holiday() {
        let cal = HolidayCalendar::new(sample_holidays());
        assert!(cal.is_holiday(d(2024, 2, 6)));
        assert!(cal.is_holiday(d(2024, 3, 31)));
        assert!(!cal.is_holiday(d(2024, 2, 7)));
        assert_eq!(
            cal.holiday_for(d(2024, 1, 2)).unwrap().name(),
            Some("New Year Holiday")
        );
    }

    #[test]
    fn test_find_long_periods() {
        let cal = HolidayCalendar::new(sample_holidays());

        let jan = cal.find_long_periods(2024, 1);
        assert_eq!(jan.len(), 1);
        assert_eq!(jan[0].start, d(2024, 1, 1));
        assert_eq!(jan[0].end, d(2024, 1, 3));

        // Easter overlaps both March and April
        assert_eq!(cal.find_long_periods(2024, 3).len(), 1);
        assert_eq!(cal.find_long_periods(2024, 4).len(), 1);

        // Two-day bridge is not long; single day in February neither
        assert!(cal.find_long_periods(2024, 5).is_empty());
        assert!(cal.find_long_periods(2024, 2).is_empty());
        assert!(cal.find_long_periods(2024, 13).is_empty());
    }

    #[test]
    fn test_long_period_threshold_configurable() {
        let cal = HolidayCalendar::new(sample_holidays()).with_long_period_days(2);
        assert_eq!(cal.find_long_periods(2024, 5).len(), 1);
        let strict = HolidayCalendar::new(sample_holidays()).with_long_period_days(4);
        assert!(strict.find_long_periods(2024, 1).is_empty());
        assert!(strict.is_long_period_interior(d(2024, 3, 30)));
        assert!(!strict.is_long_period_interior(d(2024, 1, 2)));
    }

    #[test]
    fn test_deserialize_validates_range() {
        let json = r#"{"start_date":"2024-12-24","end_date":"2024-12-26","name":"Xmas"}"#;
        let ok: Holiday = serde_json::from_str(json).unwrap();
        assert_eq!(ok.span_days(), 3);

        let bad = serde_json::from_str::<Holiday>(
            r#"{"start_date":"2024-12-26","end_date":"2024-12-24"}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(month_bounds(2024, 2), Some((d(2024, 2, 1), d(2024, 2, 29))));
        assert_eq!(
            month_bounds(2023, 12),
            Some((d(2023, 12, 1), d(2023, 12, 31)))
        );
        assert_eq!(month_bounds(2024, 0), None);
    }
}
