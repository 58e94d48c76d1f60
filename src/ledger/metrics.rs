//! Fairness indicators.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Weighted std-dev | Population standard deviation of weighted scores |
//! | Max weighted diff | max - min of weighted scores |
//! | Max total diff | max - min of assignment counts |
//! | Regular fairness | `min(1, ytd_regular / group_avg_regular)` |
//! | Weighted fairness | `min(1, ytd_weighted / group_avg_weighted)` |
//! | Overall fairness | mean of the two scores above |
//!
//! Fairness scores measure relative overload capped at 1.0. A person below
//! the group average reads below 1; the scores are never negative.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::AssignmentStats;

/// Dispersion of workload across a group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FairnessMetrics {
    pub weighted_std_dev: f64,
    pub max_weighted_diff: f64,
    pub max_total_diff: u32,
}

impl FairnessMetrics {
    /// Computes metrics over per-person stats. Zeros for an empty input.
    pub fn calculate<'a>(stats: impl IntoIterator<Item = &'a AssignmentStats>) -> Self {
        let stats: Vec<&AssignmentStats> = stats.into_iter().collect();
        if stats.is_empty() {
            return Self::default();
        }

        let n = stats.len() as f64;
        let weighted: Vec<f64> = stats.iter().map(|s| s.total_weighted_score).collect();
        let mean = weighted.iter().sum::<f64>() / n;
        let variance = weighted.iter().map(|w| (w - mean).powi(2)).sum::<f64>() / n;

        let max_w = weighted.iter().copied().fold(f64::MIN, f64::max);
        let min_w = weighted.iter().copied().fold(f64::MAX, f64::min);

        let totals = stats.iter().map(|s| s.total_assignments);
        let max_t = totals.clone().max().unwrap_or(0);
        let min_t = totals.min().unwrap_or(0);

        Self {
            weighted_std_dev: variance.sqrt(),
            max_weighted_diff: max_w - min_w,
            max_total_diff: max_t - min_t,
        }
    }

    /// Whether the group is within the given spread thresholds.
    pub fn meets_thresholds(&self, max_weighted_diff: f64, max_total_diff: u32) -> bool {
        self.max_weighted_diff <= max_weighted_diff && self.max_total_diff <= max_total_diff
    }
}

/// Year-to-date fairness view of one person in one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FairnessSnapshot {
    pub person: String,
    pub group_id: String,
    /// Date the snapshot was computed for.
    pub as_of: NaiveDate,
    /// Counts and weighted score from January 1 of `as_of`'s year up to `as_of`.
    pub ytd: AssignmentStats,
    pub regular_fairness: f64,
    pub weighted_fairness: f64,
    pub overall_fairness: f64,
    pub last_assignment_date: Option<NaiveDate>,
    /// Days between the last assignment and `as_of`, never negative.
    pub days_since_last_assignment: i64,
}

impl FairnessSnapshot {
    /// Derives the fairness scores against group averages.
    ///
    /// A score stays 0 when its average is 0.
    pub(crate) fn score(&mut self, avg_regular: f64, avg_weighted: f64) {
        if avg_regular > 0.0 {
            self.regular_fairness = (self.ytd.regular_days as f64 / avg_regular).min(1.0);
        }
        if avg_weighted > 0.0 {
            self.weighted_fairness = (self.ytd.total_weighted_score / avg_weighted).min(1.0);
        }
        self.overall_fairness = (self.regular_fairness + self.weighted_fairness) / 2.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weighted(score: f64, total: u32) -> AssignmentStats {
        AssignmentStats {
            total_weighted_score: score,
            total_assignments: total,
            ..Default::default()
        }
    }

    #[test]
    fn test_two_person_spread() {
        let stats = [weighted(3.5, 2), weighted(1.0, 1)];
        let m = FairnessMetrics::calculate(&stats);
        assert!((m.max_weighted_diff - 2.5).abs() < 1e-10);
        assert!((m.weighted_std_dev - 1.25).abs() < 1e-10);
        assert_eq!(m.max_total_diff, 1);
    }

    #[test]
    fn test_empty_is_zero() {
        let m = FairnessMetrics::calculate(&Vec::<AssignmentStats>::new());
        assert_eq!(m, FairnessMetrics::default());
    }

    #[test]
    fn test_single_person_has_no_spread() {
        let m = FairnessMetrics::calculate(&[weighted(7.0, 5)]);
        assert!(m.weighted_std_dev.abs() < 1e-10);
        assert!(m.max_weighted_diff.abs() < 1e-10);
        assert_eq!(m.max_total_diff, 0);
        assert!(m.meets_thresholds(0.0, 0));
    }

    #[test]
    fn test_snapshot_scores_capped() {
        let mut snap = FairnessSnapshot {
            person: "a".into(),
            group_id: "g".into(),
            as_of: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            ytd: AssignmentStats {
                regular_days: 4,
                total_weighted_score: 3.0,
                total_assignments: 4,
                ..Default::default()
            },
            regular_fairness: 0.0,
            weighted_fairness: 0.0,
            overall_fairness: 0.0,
            last_assignment_date: None,
            days_since_last_assignment: 0,
        };
        snap.score(2.0, 6.0);
        assert!((snap.regular_fairness - 1.0).abs() < 1e-10);
        assert!((snap.weighted_fairness - 0.5).abs() < 1e-10);
        assert!((snap.overall_fairness - 0.75).abs() < 1e-10);
    }

    #[test]
    fn test_snapshot_zero_average_skipped() {
        let mut snap = FairnessSnapshot {
            person: "a".into(),
            group_id: "g".into(),
            as_of: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            ytd: AssignmentStats::default(),
            regular_fairness: 0.0,
            weighted_fairness: 0.0,
            overall_fairness: 0.0,
            last_assignment_date: None,
            days_since_last_assignment: 0,
        };
        snap.score(0.0, 0.0);
        assert_eq!(snap.regular_fairness, 0.0);
        assert_eq!(snap.weighted_fairness, 0.0);
        assert_eq!(snap.overall_fairness, 0.0);
    }
}
