//! Member selection rules and rule engine.
//!
//! Decides who takes a date among the eligible members of one group.
//! Rules are applied in sequence; a later rule is consulted only when every
//! earlier rule ties.
//!
//! # Usage
//!
//! ```
//! use chrono::NaiveDate;
//! use u_rotation::models::Member;
//! use u_rotation::selection::{SelectionContext, SelectionEngine};
//!
//! let engine = SelectionEngine::rotation_default();
//! let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
//! let ctx = SelectionContext::at_date(date)
//!     .with_last_assigned("alice", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
//!     .with_count("alice", 1);
//! let members = vec![Member::new("alice"), Member::new("bob")];
//!
//! assert_eq!(engine.select(&members, &ctx), Some(1));
//! ```

mod context;
mod engine;
pub mod rules;

pub use context::SelectionContext;
pub use engine::{SelectionEngine, TieBreaker};

use crate::models::Member;
use std::fmt::Debug;

/// Score returned by a selection rule.
///
/// Lower scores = picked first.
pub type RuleScore = f64;

/// A rule that ranks candidate members for one date.
///
/// # Score Convention
/// **Lower score = higher priority.**
pub trait SelectionRule: Send + Sync + Debug {
    /// Rule name (e.g., "LRA").
    fn name(&self) -> &'static str;

    /// Scores a member against the group's running state.
    fn evaluate(&self, member: &Member, context: &SelectionContext) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
