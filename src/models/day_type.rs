//! Day classification categories.
//!
//! Every calendar date maps to exactly one [`DayType`]. The variants are
//! ordered from least to most burdensome, which matches their default
//! weights (see [`DayWeights`](crate::weighting::DayWeights)).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classification of a calendar date for workload weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    /// Monday through Thursday, no holiday.
    Regular,
    /// Friday, no holiday.
    Friday,
    /// Saturday or Sunday, no holiday.
    Weekend,
    /// Any day covered by a holiday period that is not an interior long-period day.
    Holiday,
    /// A day strictly inside a holiday period of at least the long-period length.
    LongWeekendMiddle,
}

impl DayType {
    /// All day types, in weight order.
    pub const ALL: [DayType; 5] = [
        DayType::Regular,
        DayType::Friday,
        DayType::Weekend,
        DayType::Holiday,
        DayType::LongWeekendMiddle,
    ];

    /// Stable snake_case identifier.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Friday => "friday",
            Self::Weekend => "weekend",
            Self::Holiday => "holiday",
            Self::LongWeekendMiddle => "long_weekend_middle",
        }
    }

    /// Whether this day type counts toward the regular-day counters.
    #[inline]
    pub fn is_regular(&self) -> bool {
        matches!(self, Self::Regular)
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.id())
    }
}

impl FromStr for DayType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.id() == s.trim().to_lowercase())
            .ok_or_else(|| format!("unknown day type '{s}'"))
    }
}
