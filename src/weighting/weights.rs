//! Day weights and the weight model.
//!
//! | DayType | Default weight |
//! |---------|----------------|
//! | Regular | 1.0 |
//! | Friday | 1.2 |
//! | Weekend | 1.5 |
//! | Holiday | 2.0 |
//! | LongWeekendMiddle | 2.5 |
//!
//! A holiday falling on a Saturday or Sunday is charged
//! `max(holiday, weekend)`, so raising the weekend weight above the holiday
//! weight never makes a weekend holiday cheaper than a plain weekend.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::classifier::{is_weekend, DayClassifier};
use crate::error::{Result, RotationError};
use crate::models::{DayType, Holiday};

/// Base weight per [`DayType`]. All weights are positive and finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayWeights {
    pub regular: f64,
    pub friday: f64,
    pub weekend: f64,
    pub holiday: f64,
    pub long_weekend_middle: f64,
}

impl Default for DayWeights {
    fn default() -> Self {
        Self {
            regular: 1.0,
            friday: 1.2,
            weekend: 1.5,
            holiday: 2.0,
            long_weekend_middle: 2.5,
        }
    }
}

impl DayWeights {
    /// Base weight of a day type.
    pub fn get(&self, day_type: DayType) -> f64 {
        match day_type {
            DayType::Regular => self.regular,
            DayType::Friday => self.friday,
            DayType::Weekend => self.weekend,
            DayType::Holiday => self.holiday,
            DayType::LongWeekendMiddle => self.long_weekend_middle,
        }
    }

    /// Overrides the weight of a day type.
    ///
    /// # Errors
    /// [`RotationError::InvalidWeight`] for non-positive or non-finite values;
    /// the previous weight is kept.
    pub fn set(&mut self, day_type: DayType, weight: f64) -> Result<()> {
        check_weight(day_type, weight)?;
        let slot = match day_type {
            DayType::Regular => &mut self.regular,
            DayType::Friday => &mut self.friday,
            DayType::Weekend => &mut self.weekend,
            DayType::Holiday => &mut self.holiday,
            DayType::LongWeekendMiddle => &mut self.long_weekend_middle,
        };
        *slot = weight;
        Ok(())
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, day_type: DayType, weight: f64) -> Result<Self> {
        self.set(day_type, weight)?;
        Ok(self)
    }

    /// Checks every weight, reporting the first invalid one.
    pub fn validate(&self) -> Result<()> {
        DayType::ALL
            .iter()
            .try_for_each(|&t| check_weight(t, self.get(t)))
    }
}

fn check_weight(day_type: DayType, weight: f64) -> Result<()> {
    if weight.is_finite() && weight > 0.0 {
        Ok(())
    } else {
        Err(RotationError::InvalidWeight { day_type, weight })
    }
}

/// Prices dates in workload units.
///
/// Stateless apart from its configuration; repeated calls with the same
/// inputs always return the same weight.
#[derive(Debug, Clone, Default)]
pub struct WeightModel {
    weights: DayWeights,
    classifier: DayClassifier,
}

impl WeightModel {
    /// Creates a model with default weights and classifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses the given weights after validating them.
    pub fn with_weights(mut self, weights: DayWeights) -> Result<Self> {
        weights.validate()?;
        self.weights = weights;
        Ok(self)
    }

    /// Uses the given classifier for [`price`](Self::price).
    pub fn with_classifier(mut self, classifier: DayClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Current base weights.
    pub fn weights(&self) -> &DayWeights {
        &self.weights
    }

    /// Classifier used by [`price`](Self::price).
    pub fn classifier(&self) -> &DayClassifier {
        &self.classifier
    }

    /// Overrides one base weight.
    pub fn set_weight(&mut self, day_type: DayType, weight: f64) -> Result<()> {
        self.weights.set(day_type, weight)
    }

    /// Weight of a date already classified as `day_type`.
    pub fn weight(&self, date: NaiveDate, day_type: DayType) -> f64 {
        let base = self.weights.get(day_type);
        if day_type == DayType::Holiday && is_weekend(date) {
            base.max(self.weights.weekend)
        } else {
            base
        }
    }

    /// Classifies and weighs a date in one step.
    pub fn price(&self, date: NaiveDate, holidays: &[Holiday]) -> (DayType, f64) {
        let day_type = self.classifier.classify(date, holidays);
        (day_type, self.weight(date, day_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_default_weights() {
        let w = DayWeights::default();
        assert!((w.get(DayType::Regular) - 1.0).abs() < 1e-10);
        assert!((w.get(DayType::Friday) - 1.2).abs() < 1e-10);
        assert!((w.get(DayType::Weekend) - 1.5).abs() < 1e-10);
        assert!((w.get(DayType::Holiday) - 2.0).abs() < 1e-10);
        assert!((w.get(DayType::LongWeekendMiddle) - 2.5).abs() < 1e-10);
        assert!(w.validate().is_ok());
    }

    #[test]
    fn test_set_custom_weight() {
        let mut w = DayWeights::default();
        w.set(DayType::Holiday, 3.0).unwrap();
        assert!((w.get(DayType::Holiday) - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_invalid_weight_rejected_and_kept() {
        let mut w = DayWeights::default();
        assert!(matches!(
            w.set(DayType::Regular, 0.0),
            Err(RotationError::InvalidWeight { .. })
        ));
        assert!(w.set(DayType::Regular, -1.0).is_err());
        assert!(w.set(DayType::Regular, f64::NAN).is_err());
        assert!((w.get(DayType::Regular) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_validate_reports_bad_field() {
        let w = DayWeights {
            friday: 0.0,
            ..Default::default()
        };
        match w.validate() {
            Err(RotationError::InvalidWeight { day_type, .. }) => {
                assert_eq!(day_type, DayType::Friday)
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(WeightModel::new().with_weights(w).is_err());
    }

    #[test]
    fn test_weight_by_type() {
        let m = WeightModel::new();
        assert!(
            (m.weight(d(2024, 1, 1), DayType::Regular) - 1.0).abs() < 1e-10
        );
        assert!(
            (m.weight(d(2024, 1, 5), DayType::Friday) - 1.2).abs() < 1e-10
        );
        assert!(
            (m.weight(d(2024, 1, 6), DayType::Weekend) - 1.5).abs() < 1e-10
        );
        assert!(
            (m.weight(d(2024, 1, 1), DayType::Holiday) - 2.0).abs() < 1e-10
        );
        assert!(
            (m.weight(d(2024, 1, 6), DayType::LongWeekendMiddle) - 2.5).abs() < 1e-10
        );
    }

    #[test]
    fn test_weekend_holiday_takes_max() {
        let mut m = WeightModel::new();
        // Default: holiday 2.0 already dominates weekend 1.5
        assert!(
            (m.weight(d(2024, 1, 6), DayType::Holiday) - 2.0).abs() < 1e-10
        );

        m.set_weight(DayType::Weekend, 3.0).unwrap();
        assert!(
            (m.weight(d(2024, 1, 6), DayType::Holiday) - 3.0).abs() < 1e-10
        );
        // Weekday holiday is not merged
        assert!(
            (m.weight(d(2024, 1, 3), DayType::Holiday) - 2.0).abs() < 1e-10
        );
        // Long-weekend middle is never merged
        assert!(
            (m.weight(d(2024, 1, 6), DayType::LongWeekendMiddle) - 2.5).abs() < 1e-10
        );
    }

    #[test]
    fn test_price_easter_example() {
        let m = WeightModel::new();
        let hs = [Holiday::range(d(2024, 3, 29), d(2024, 4, 1)).unwrap()];

        let (t, w) = m.price(d(2024, 3, 30), &hs);
        assert_eq!(t, DayType::LongWeekendMiddle);
        assert!((w - 2.5).abs() < 1e-10);

        let (t, w) = m.price(d(2024, 3, 29), &hs);
        assert_eq!(t, DayType::Holiday);
        assert!((w - 2.0).abs() < 1e-10);

        // Stable under re-invocation
        assert_eq!(m.price(d(2024, 3, 29), &hs), (t, w));
    }

    #[test]
    fn test_weights_from_partial_toml() {
        let w: DayWeights = toml::from_str("holiday = 2.2").unwrap();
        assert!((w.holiday - 2.2).abs() < 1e-10);
        assert!((w.weekend - 1.5).abs() < 1e-10);
    }
}
