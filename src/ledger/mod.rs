//! Append-only assignment history and fairness statistics.
//!
//! The [`FairnessLedger`] is the source of truth for how much each person
//! has worked in each group. Rows are never edited; each new row carries the
//! person's running totals forward from their previous row in the same group.
//!
//! # Usage
//!
//! ```
//! use chrono::NaiveDate;
//! use u_rotation::ledger::FairnessLedger;
//! use u_rotation::models::DayType;
//!
//! let mut ledger = FairnessLedger::new();
//! let d = NaiveDate::from_ymd_opt(2024, 1, 6).unwrap();
//! ledger.record_assignment("alice", "ward", d, DayType::Weekend, 1.5);
//!
//! let stats = ledger.stats_for("alice", "ward");
//! assert_eq!(stats.weekend_days, 1);
//! ```

mod metrics;
mod record;

pub use metrics::{FairnessMetrics, FairnessSnapshot};
pub use record::{AssignmentRecord, AssignmentStats};

use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::models::DayType;

/// Position in the ledger to roll back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerCheckpoint(usize);

/// In-memory assignment history.
#[derive(Debug, Clone, Default)]
pub struct FairnessLedger {
    records: Vec<AssignmentRecord>,
    /// Index of the latest record per (group, person).
    latest: HashMap<(String, String), usize>,
}

impl FairnessLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an assignment and returns the stored record.
    pub fn record_assignment(
        &mut self,
        person: &str,
        group_id: &str,
        date: NaiveDate,
        day_type: DayType,
        weight: f64,
    ) -> AssignmentRecord {
        let key = (group_id.to_string(), person.to_string());
        let (regular, weighted, total) = match self.latest.get(&key) {
            Some(&idx) => {
                let prev = &self.records[idx];
                (
                    prev.cumulative_regular_days,
                    prev.cumulative_weighted_days,
                    prev.cumulative_total_days,
                )
            }
            None => (0, 0.0, 0),
        };

        let record = AssignmentRecord {
            id: self.records.len() as u64 + 1,
            person: person.to_string(),
            group_id: group_id.to_string(),
            date,
            day_type,
            weight,
            cumulative_regular_days: regular + u32::from(day_type.is_regular()),
            cumulative_weighted_days: weighted + weight,
            cumulative_total_days: total + 1,
        };

        self.latest.insert(key, self.records.len());
        self.records.push(record.clone());
        record
    }

    /// All records in insertion order.
    pub fn records(&self) -> &[AssignmentRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the ledger holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records of one person in one group, in insertion order.
    pub fn records_for<'a>(
        &'a self,
        person: &'a str,
        group_id: &'a str,
    ) -> impl Iterator<Item = &'a AssignmentRecord> + 'a {
        self.records
            .iter()
            .filter(move |r| r.person == person && r.group_id == group_id)
    }

    /// Most recent record of one person in one group.
    pub fn latest(&self, person: &str, group_id: &str) -> Option<&AssignmentRecord> {
        self.latest
            .get(&(group_id.to_string(), person.to_string()))
            .map(|&idx| &self.records[idx])
    }

    /// Lifetime statistics of one person in one group.
    pub fn stats_for(&self, person: &str, group_id: &str) -> AssignmentStats {
        AssignmentStats::from_records(self.records_for(person, group_id))
    }

    /// Lifetime statistics of every person who has worked in the group.
    pub fn group_stats(&self, group_id: &str) -> BTreeMap<String, AssignmentStats> {
        let mut out: BTreeMap<String, AssignmentStats> = BTreeMap::new();
        for r in self.records.iter().filter(|r| r.group_id == group_id) {
            out.entry(r.person.clone())
                .or_default()
                .add(r.day_type, r.weight);
        }
        out
    }

    /// Spread of workload across the group's persons.
    pub fn fairness_metrics(&self, group_id: &str) -> FairnessMetrics {
        FairnessMetrics::calculate(self.group_stats(group_id).values())
    }

    /// Year-to-date fairness of one person, or `None` if they have no
    /// records in the group up to `as_of`.
    pub fn snapshot(
        &self,
        person: &str,
        group_id: &str,
        as_of: NaiveDate,
    ) -> Option<FairnessSnapshot> {
        self.snapshots(group_id, as_of)
            .into_iter()
            .find(|s| s.person == person)
    }

    /// Year-to-date fairness of every person in the group, sorted by name.
    ///
    /// Group averages are taken over the persons with at least one record
    /// in the group this year up to `as_of`.
    pub fn snapshots(&self, group_id: &str, as_of: NaiveDate) -> Vec<FairnessSnapshot> {
        let mut ytd: BTreeMap<&str, AssignmentStats> = BTreeMap::new();
        let mut last: HashMap<&str, NaiveDate> = HashMap::new();

        for r in self
            .records
            .iter()
            .filter(|r| r.group_id == group_id && r.date <= as_of)
        {
            let seen = last.entry(r.person.as_str()).or_insert(r.date);
            if r.date > *seen {
                *seen = r.date;
            }
            if r.date.year() == as_of.year() {
                ytd.entry(r.person.as_str())
                    .or_default()
                    .add(r.day_type, r.weight);
            }
        }

        if last.is_empty() {
            return Vec::new();
        }

        let active = ytd.len().max(1) as f64;
        let avg_regular = ytd.values().map(|s| s.regular_days as f64).sum::<f64>() / active;
        let avg_weighted = ytd.values().map(|s| s.total_weighted_score).sum::<f64>() / active;

        let persons: BTreeSet<&str> = last.keys().copied().collect();
        persons
            .into_iter()
            .map(|person| {
                let last_date = last.get(person).copied();
                let mut snap = FairnessSnapshot {
                    person: person.to_string(),
                    group_id: group_id.to_string(),
                    as_of,
                    ytd: ytd.get(person).copied().unwrap_or_default(),
                    regular_fairness: 0.0,
                    weighted_fairness: 0.0,
                    overall_fairness: 0.0,
                    last_assignment_date: last_date,
                    days_since_last_assignment: last_date
                        .map(|d| (as_of - d).num_days().max(0))
                        .unwrap_or(0),
                };
                snap.score(avg_regular, avg_weighted);
                snap
            })
            .collect()
    }

    /// Assignments of a month as `date -> group -> person`.
    pub fn schedule_for(
        &self,
        year: i32,
        month: u32,
    ) -> BTreeMap<NaiveDate, BTreeMap<String, String>> {
        let mut out: BTreeMap<NaiveDate, BTreeMap<String, String>> = BTreeMap::new();
        for r in self
            .records
            .iter()
            .filter(|r| r.date.year() == year && r.date.month() == month)
        {
            out.entry(r.date)
                .or_default()
                .insert(r.group_id.clone(), r.person.clone());
        }
        out
    }

    /// Sorted, de-duplicated dates a person worked in any group, optionally
    /// limited to a year and month.
    pub fn person_dates(
        &self,
        person: &str,
        year: Option<i32>,
        month: Option<u32>,
    ) -> Vec<NaiveDate> {
        let dates: BTreeSet<NaiveDate> = self
            .records
            .iter()
            .filter(|r| r.person == person)
            .filter(|r| year.map_or(true, |y| r.date.year() == y))
            .filter(|r| month.map_or(true, |m| r.date.month() == m))
            .map(|r| r.date)
            .collect();
        dates.into_iter().collect()
    }

    /// Marks the current end of the ledger.
    pub fn checkpoint(&self) -> LedgerCheckpoint {
        LedgerCheckpoint(self.records.len())
    }

    /// Drops every record appended after `checkpoint`.
    ///
    /// Returns the number of records removed.
    pub fn rollback(&mut self, checkpoint: LedgerCheckpoint) -> usize {
        let keep = checkpoint.0.min(self.records.len());
        let removed = self.records.len() - keep;
        if removed == 0 {
            return 0;
        }
        self.records.truncate(keep);
        self.latest.clear();
        for (idx, r) in self.records.iter().enumerate() {
            self.latest
                .insert((r.group_id.clone(), r.person.clone()), idx);
        }
        removed
    }
}
