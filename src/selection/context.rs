//! Per-group rotation state passed to selection rules.

use chrono::NaiveDate;
use std::collections::HashMap;

/// Running state of one group during a rotation run.
///
/// Holds the date being scheduled plus, for each member, the last date
/// they were assigned in this group and how many days they have been
/// assigned so far this run.
#[derive(Debug, Clone, Default)]
pub struct SelectionContext {
    /// Date currently being scheduled.
    pub date: Option<NaiveDate>,
    /// Last assignment date per person.
    pub last_assigned: HashMap<String, NaiveDate>,
    /// Assignments so far per person.
    pub assignment_count: HashMap<String, u32>,
}

impl SelectionContext {
    /// Creates a context positioned at a date.
    pub fn at_date(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            ..Default::default()
        }
    }

    /// Sets the last assignment date for a person.
    pub fn with_last_assigned(mut self, person: impl Into<String>, date: NaiveDate) -> Self {
        self.last_assigned.insert(person.into(), date);
        self
    }

    /// Sets the assignment count for a person.
    pub fn with_count(mut self, person: impl Into<String>, count: u32) -> Self {
        self.assignment_count.insert(person.into(), count);
        self
    }

    /// Last date the person was assigned, if ever.
    pub fn last_assigned(&self, person: &str) -> Option<NaiveDate> {
        self.last_assigned.get(person).copied()
    }

    /// Number of assignments so far (0 if never assigned).
    pub fn count(&self, person: &str) -> u32 {
        self.assignment_count.get(person).copied().unwrap_or(0)
    }

    /// Whether the person was assigned on the day before `date`.
    pub fn assigned_day_before(&self, person: &str, date: NaiveDate) -> bool {
        match (self.last_assigned(person), date.pred_opt()) {
            (Some(last), Some(yesterday)) => last == yesterday,
            _ => false,
        }
    }

    /// Records an assignment.
    pub fn record(&mut self, person: &str, date: NaiveDate) {
        self.last_assigned.insert(person.to_string(), date);
        *self
            .assignment_count
            .entry(person.to_string())
            .or_insert(0) += 1;
    }
}
