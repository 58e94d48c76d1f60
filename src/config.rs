//! Rotation configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! environment overrides, then validation.
//!
//! ```toml
//! min_group_members = 2
//! long_period_days = 3
//!
//! [weights]
//! regular = 1.0
//! friday = 1.2
//! weekend = 1.5
//! holiday = 2.0
//! long_weekend_middle = 2.5
//! ```
//!
//! | Variable | Field |
//! |----------|-------|
//! | `ROTATION_MIN_GROUP_MEMBERS` | `min_group_members` |
//! | `ROTATION_LONG_PERIOD_DAYS` | `long_period_days` |

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, RotationError};
use crate::models::holiday::DEFAULT_LONG_PERIOD_DAYS;
use crate::validation::DEFAULT_MIN_GROUP_MEMBERS;
use crate::weighting::{DayClassifier, DayWeights, WeightModel};

/// Environment variable overriding `min_group_members`.
pub const ENV_MIN_GROUP_MEMBERS: &str = "ROTATION_MIN_GROUP_MEMBERS";
/// Environment variable overriding `long_period_days`.
pub const ENV_LONG_PERIOD_DAYS: &str = "ROTATION_LONG_PERIOD_DAYS";

/// Settings for a rotation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    /// Smallest group size accepted for scheduling.
    pub min_group_members: usize,
    /// Minimum span (days) of a holiday period with middle days.
    pub long_period_days: u32,
    /// Base weight per day type.
    pub weights: DayWeights,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            min_group_members: DEFAULT_MIN_GROUP_MEMBERS,
            long_period_days: DEFAULT_LONG_PERIOD_DAYS,
            weights: DayWeights::default(),
        }
    }
}

impl RotationConfig {
    /// Parses a TOML document; missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Loads a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Applies overrides from the process environment.
    pub fn apply_env(self) -> Result<Self> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary variable lookup.
    pub fn apply_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(raw) = lookup(ENV_MIN_GROUP_MEMBERS) {
            self.min_group_members = parse_var(ENV_MIN_GROUP_MEMBERS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_LONG_PERIOD_DAYS) {
            self.long_period_days = parse_var(ENV_LONG_PERIOD_DAYS, &raw)?;
        }
        Ok(self)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    /// - [`RotationError::InvalidConfig`] when `min_group_members < 1` or
    ///   `long_period_days < 2`
    /// - [`RotationError::InvalidWeight`] for a non-positive weight
    pub fn validate(&self) -> Result<()> {
        if self.min_group_members < 1 {
            return Err(RotationError::InvalidConfig(
                "min_group_members must be at least 1".into(),
            ));
        }
        if self.long_period_days < 2 {
            return Err(RotationError::InvalidConfig(format!(
                "long_period_days must be at least 2, got {}",
                self.long_period_days
            )));
        }
        self.weights.validate()
    }

    /// Classifier using the configured long-period threshold.
    pub fn classifier(&self) -> DayClassifier {
        DayClassifier::new().with_long_period_days(self.long_period_days)
    }

    /// Weight model built from this configuration.
    pub fn weight_model(&self) -> Result<WeightModel> {
        WeightModel::new()
            .with_classifier(self.classifier())
            .with_weights(self.weights)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| RotationError::InvalidConfig(format!("{key}: cannot parse '{raw}'")))
}
