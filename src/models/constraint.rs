//! Per-member workload constraints.
//!
//! A [`PersonConstraint`] bounds how many days a member may be assigned
//! within one generated month. Constraints are attached to a group
//! membership, so the same person can carry different bounds in
//! different groups.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RotationError};

/// Monthly assignment bounds for one member of one group.
///
/// Invariants (checked at construction and deserialization):
/// - `max_days >= 1` when set
/// - `min_days <= max_days` when both are set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawConstraint")]
pub struct PersonConstraint {
    min_days: Option<u32>,
    max_days: Option<u32>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct RawConstraint {
    #[serde(default)]
    min_days: Option<u32>,
    #[serde(default)]
    max_days: Option<u32>,
}

impl TryFrom<RawConstraint> for PersonConstraint {
    type Error = RotationError;

    fn try_from(raw: RawConstraint) -> Result<Self> {
        PersonConstraint::new(raw.min_days, raw.max_days)
    }
}

impl PersonConstraint {
    /// Creates a validated constraint.
    ///
    /// # Errors
    /// [`RotationError::InvalidConstraint`] if `max_days == 0` or
    /// `min_days > max_days`.
    pub fn new(min_days: Option<u32>, max_days: Option<u32>) -> Result<Self> {
        let invalid = match (min_days, max_days) {
            (_, Some(0)) => true,
            (Some(min), Some(max)) => min > max,
            _ => false,
        };
        if invalid {
            return Err(RotationError::InvalidConstraint {
                min: min_days,
                max: max_days,
            });
        }
        Ok(Self { min_days, max_days })
    }

    /// No bounds.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Lower bound only.
    pub fn at_least(min_days: u32) -> Self {
        Self {
            min_days: Some(min_days),
            max_days: None,
        }
    }

    /// Upper bound only.
    pub fn at_most(max_days: u32) -> Result<Self> {
        Self::new(None, Some(max_days))
    }

    /// Minimum monthly days, if any.
    #[inline]
    pub fn min_days(&self) -> Option<u32> {
        self.min_days
    }

    /// Maximum monthly days, if any.
    #[inline]
    pub fn max_days(&self) -> Option<u32> {
        self.max_days
    }

    /// Whether a member with `count` assignments may take another.
    #[inline]
    pub fn allows_another(&self, count: u32) -> bool {
        self.max_days.map_or(true, |max| count < max)
    }

    /// Whether `count` assignments still fall short of the minimum.
    #[inline]
    pub fn below_minimum(&self, count: u32) -> bool {
        self.min_days.is_some_and(|min| count < min)
    }

    /// Whether any bound is set.
    pub fn is_bounded(&self) -> bool {
        self.min_days.is_some() || self.max_days.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_valid_constraints() {
        let c = PersonConstraint::new(Some(2), Some(5)).unwrap();
        assert_eq!(c.min_days(), Some(2));
        assert_eq!(c.max_days(), Some(5));
        assert!(c.is_bounded());
        assert!(!PersonConstraint::unbounded().is_bounded());
        assert!(PersonConstraint::new(Some(3), Some(3)).is_ok());
    }

    #[test]
    fn test_min_greater_than_max_rejected() {
        let err = PersonConstraint::new(Some(6), Some(5)).unwrap_err();
        assert!(matches!(
            err,
            RotationError::InvalidConstraint {
                min: Some(6),
                max: Some(5)
            }
        ));
    }

    #[test]
    fn test_zero_max_rejected() {
        assert!(PersonConstraint::at_most(0).is_err());
        assert!(PersonConstraint::new(Some(0), Some(0)).is_err());
    }

    #[test]
    fn test_allows_and_below() {
        let c = PersonConstraint::new(Some(2), Some(3)).unwrap();
        assert!(c.below_minimum(1));
        assert!(!c.below_minimum(2));
        assert!(c.allows_another(2));
        assert!(!c.allows_another(3));

        let open = PersonConstraint::unbounded();
        assert!(open.allows_another(1_000));
        assert!(!open.below_minimum(0));
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: PersonConstraint = serde_json::from_str(r#"{"min_days":1}"#).unwrap();
        assert_eq!(ok, PersonConstraint::at_least(1));
        let inverted = r#"{"min_days":4,"max_days":2}"#;
        assert!(serde_json::from_str::<PersonConstraint>(inverted).is_err());
    }

    proptest! {
        #[test]
        fn prop_new_accepts_iff_ordered(
            min in proptest::option::of(0u32..40),
            max in proptest::option::of(0u32..40),
        ) {
            let expected = match (min, max) {
                (_, Some(0)) => false,
                (Some(a), Some(b)) => a <= b,
                _ => true,
            };
            prop_assert_eq!(PersonConstraint::new(min, max).is_ok(), expected);
        }
    }
}
