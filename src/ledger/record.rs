//! Assignment records and per-person statistics.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::DayType;

/// One immutable ledger row.
///
/// The cumulative counters are the person's totals in the group *including*
/// this row, frozen at insertion time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    /// Sequential id, starting at 1.
    pub id: u64,
    pub person: String,
    pub group_id: String,
    pub date: NaiveDate,
    pub day_type: DayType,
    pub weight: f64,
    pub cumulative_regular_days: u32,
    pub cumulative_weighted_days: f64,
    pub cumulative_total_days: u32,
}

/// Aggregated counts for one (person, group).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AssignmentStats {
    pub regular_days: u32,
    pub friday_days: u32,
    pub weekend_days: u32,
    pub holiday_days: u32,
    pub long_weekend_days: u32,
    /// Sum of weights.
    pub total_weighted_score: f64,
    pub total_assignments: u32,
}

impl AssignmentStats {
    /// Folds one assignment into the totals.
    pub fn add(&mut self, day_type: DayType, weight: f64) {
        match day_type {
            DayType::Regular => self.regular_days += 1,
            DayType::Friday => self.friday_days += 1,
            DayType::Weekend => self.weekend_days += 1,
            DayType::Holiday => self.holiday_days += 1,
            DayType::LongWeekendMiddle => self.long_weekend_days += 1,
        }
        self.total_weighted_score += weight;
        self.total_assignments += 1;
    }

    /// Count of one day type.
    pub fn days_of(&self, day_type: DayType) -> u32 {
        match day_type {
            DayType::Regular => self.regular_days,
            DayType::Friday => self.friday_days,
            DayType::Weekend => self.weekend_days,
            DayType::Holiday => self.holiday_days,
            DayType::LongWeekendMiddle => self.long_weekend_days,
        }
    }

    /// Builds stats from a sequence of records.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a AssignmentRecord>) -> Self {
        records.into_iter().fold(Self::default(), |mut acc, r| {
            acc.add(r.day_type, r.weight);
            acc
        })
    }
}
