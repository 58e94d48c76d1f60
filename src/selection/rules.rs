//! Built-in selection rules.
//!
//! # Score Convention
//! All rules return lower scores for members that should be picked first.
//!
//! | Rule | Score |
//! |------|-------|
//! | `MinimumDaysCatchUp` | 0 below `min_days`, else 1 |
//! | `NeverAssigned` | 0 if never assigned this run, else 1 |
//! | `LeastRecentlyAssigned` | day number of last assignment (never = lowest) |
//! | `FewestAssignments` | assignments so far |

use super::{RuleScore, SelectionContext, SelectionRule};
use crate::models::Member;
use chrono::Datelike;

/// Prefers members who have not yet reached their `min_days`.
#[derive(Debug, Clone, Copy)]
pub struct MinimumDaysCatchUp;

impl SelectionRule for MinimumDaysCatchUp {
    fn name(&self) -> &'static str {
        "CATCH_UP"
    }

    fn evaluate(&self, member: &Member, context: &SelectionContext) -> RuleScore {
        if member.constraint.below_minimum(context.count(&member.name)) {
            0.0
        } else {
            1.0
        }
    }

    fn description(&self) -> &'static str {
        "Unmet minimum days first"
    }
}

/// Prefers members not yet assigned in this run.
#[derive(Debug, Clone, Copy)]
pub struct NeverAssigned;

impl SelectionRule for NeverAssigned {
    fn name(&self) -> &'static str {
        "NEVER"
    }

    fn evaluate(&self, member: &Member, context: &SelectionContext) -> RuleScore {
        match context.last_assigned(&member.name) {
            None => 0.0,
            Some(_) => 1.0,
        }
    }

    fn description(&self) -> &'static str {
        "Never assigned first"
    }
}

/// Prefers the member whose last assignment is oldest.
///
/// Members never assigned score lowest of all.
#[derive(Debug, Clone, Copy)]
pub struct LeastRecentlyAssigned;

impl SelectionRule for LeastRecentlyAssigned {
    fn name(&self) -> &'static str {
        "LRA"
    }

    fn evaluate(&self, member: &Member, context: &SelectionContext) -> RuleScore {
        context
            .last_assigned(&member.name)
            .map(|d| d.num_days_from_ce() as f64)
            .unwrap_or(f64::MIN)
    }

    fn description(&self) -> &'static str {
        "Least Recently Assigned"
    }
}

/// Prefers members with the fewest assignments so far.
#[derive(Debug, Clone, Copy)]
pub struct FewestAssignments;

impl SelectionRule for FewestAssignments {
    fn name(&self) -> &'static str {
        "FEWEST"
    }

    fn evaluate(&self, member: &Member, context: &SelectionContext) -> RuleScore {
        context.count(&member.name) as f64
    }

    fn description(&self) -> &'static str {
        "Fewest Assignments"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PersonConstraint;
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn test_catch_up() {
        let needy = Member::new("a").with_constraint(PersonConstraint::at_least(2));
        let free = Member::new("b");
        let ctx = SelectionContext::at_date(d(3)).with_count("a", 1);
        assert!(
            MinimumDaysCatchUp.evaluate(&needy, &ctx) < MinimumDaysCatchUp.evaluate(&free, &ctx)
        );

        let met = SelectionContext::at_date(d(3)).with_count("a", 2);
        assert_eq!(
            MinimumDaysCatchUp.evaluate(&needy, &met),
            MinimumDaysCatchUp.evaluate(&free, &met)
        );
    }

    #[test]
    fn test_never_assigned() {
        let ctx = SelectionContext::at_date(d(2)).with_last_assigned("a", d(1));
        assert!(
            NeverAssigned.evaluate(&Member::new("b"), &ctx)
                < NeverAssigned.evaluate(&Member::new("a"), &ctx)
        );
    }

    #[test]
    fn test_least_recently_assigned() {
        let ctx = SelectionContext::at_date(d(9))
            .with_last_assigned("old", d(2))
            .with_last_assigned("new", d(7));
        let old = LeastRecentlyAssigned.evaluate(&Member::new("old"), &ctx);
        let new = LeastRecentlyAssigned.evaluate(&Member::new("new"), &ctx);
        let never = LeastRecentlyAssigned.evaluate(&Member::new("never"), &ctx);
        assert!(never < old);
        assert!(old < new);
    }

    #[test]
    fn test_fewest_assignments() {
        let ctx = SelectionContext::at_date(d(9))
            .with_count("busy", 4)
            .with_count("idle", 1);
        assert!(
            FewestAssignments.evaluate(&Member::new("idle"), &ctx)
                < FewestAssignments.evaluate(&Member::new("busy"), &ctx)
        );
    }
}
