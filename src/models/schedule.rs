//! Schedule (solution) model.
//!
//! A schedule is the month-long result of a rotation run: one
//! [`ScheduledShift`] per (date, group) pair, plus a [`Fallback`] entry
//! for every day on which a group had no eligible member and the engine
//! relaxed its filters.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::DayType;

/// A generated month.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schedule {
    /// Scheduled year.
    pub year: i32,
    /// Scheduled month (1-12).
    pub month: u32,
    /// Shifts in generation order (date ascending, then group order).
    pub shifts: Vec<ScheduledShift>,
    /// Days on which eligibility was relaxed.
    pub fallbacks: Vec<Fallback>,
}

/// One person covering one group on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledShift {
    /// Calendar date.
    pub date: NaiveDate,
    /// Group covered.
    pub group_id: String,
    /// Assigned person.
    pub person: String,
    /// Day classification at generation time.
    pub day_type: DayType,
    /// Weight charged to the person.
    pub weight: f64,
}

/// Record of an eligibility relaxation.
///
/// Emitted when every member of a group was either assigned the previous
/// day or had reached their maximum, so the whole member list was used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fallback {
    /// Date on which the relaxation happened.
    pub date: NaiveDate,
    /// Affected group.
    pub group_id: String,
}

impl ScheduledShift {
    /// Creates a shift.
    pub fn new(
        date: NaiveDate,
        group_id: impl Into<String>,
        person: impl Into<String>,
        day_type: DayType,
        weight: f64,
    ) -> Self {
        Self {
            date,
            group_id: group_id.into(),
            person: person.into(),
            day_type,
            weight,
        }
    }
}

impl Schedule {
    /// Creates an empty schedule for a month.
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            ..Default::default()
        }
    }

    /// Adds a shift.
    pub fn add_shift(&mut self, shift: ScheduledShift) {
        self.shifts.push(shift);
    }

    /// Records a fallback.
    pub fn add_fallback(&mut self, date: NaiveDate, group_id: impl Into<String>) {
        self.fallbacks.push(Fallback {
            date,
            group_id: group_id.into(),
        });
    }

    /// Whether the run never had to relax eligibility.
    pub fn is_strict(&self) -> bool {
        self.fallbacks.is_empty()
    }

    /// Whether eligibility was relaxed for the group on the date.
    pub fn had_fallback(&self, date: NaiveDate, group_id: &str) -> bool {
        self.fallbacks
            .iter()
            .any(|f| f.date == date && f.group_id == group_id)
    }

    /// Person assigned to a group on a date.
    pub fn person_for(&self, date: NaiveDate, group_id: &str) -> Option<&str> {
        self.shifts
            .iter()
            .find(|s| s.date == date && s.group_id == group_id)
            .map(|s| s.person.as_str())
    }

    /// All shifts of one group.
    pub fn shifts_for_group(&self, group_id: &str) -> Vec<&ScheduledShift> {
        self.shifts
            .iter()
            .filter(|s| s.group_id == group_id)
            .collect()
    }

    /// Dates a person works (in any group), ascending.
    pub fn dates_for_person(&self, person: &str) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self
            .shifts
            .iter()
            .filter(|s| s.person == person)
            .map(|s| s.date)
            .collect();
        dates.dedup();
        dates
    }

    /// Assignment count per (group, person).
    pub fn counts_by_member(&self) -> HashMap<(String, String), u32> {
        let mut counts = HashMap::new();
        for s in &self.shifts {
            *counts
                .entry((s.group_id.clone(), s.person.clone()))
                .or_insert(0) += 1;
        }
        counts
    }

    /// Date → group → person view.
    pub fn entries(&self) -> BTreeMap<NaiveDate, BTreeMap<String, String>> {
        let mut out: BTreeMap<NaiveDate, BTreeMap<String, String>> = BTreeMap::new();
        for s in &self.shifts {
            out.entry(s.date)
                .or_default()
                .insert(s.group_id.clone(), s.person.clone());
        }
        out
    }

    /// Sum of weights charged in this month, per (group, person).
    pub fn weighted_load(&self) -> HashMap<(String, String), f64> {
        let mut load = HashMap::new();
        for s in &self.shifts {
            *load
                .entry((s.group_id.clone(), s.person.clone()))
                .or_insert(0.0) += s.weight;
        }
        load
    }

    /// Number of shifts.
    pub fn shift_count(&self) -> usize {
        self.shifts.len()
    }
}
