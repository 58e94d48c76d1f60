//! Rule engine for member selection.
//!
//! Rules are compared lexicographically. When every rule ties, the final
//! [`TieBreaker`] decides; the default keeps roster order.

use std::cmp::Ordering;
use std::sync::Arc;

use super::rules::{LeastRecentlyAssigned, MinimumDaysCatchUp, NeverAssigned};
use super::{RuleScore, SelectionContext, SelectionRule};
use crate::models::Member;

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreaker {
    /// Earlier roster position wins (default).
    #[default]
    MemberOrder,
    /// Lexicographic by member name.
    ByName,
}

/// A composable rule engine ranking group members.
///
/// # Example
/// ```
/// use u_rotation::selection::{rules, SelectionEngine, TieBreaker};
///
/// let engine = SelectionEngine::new()
///     .with_rule(rules::FewestAssignments)
///     .with_rule(rules::LeastRecentlyAssigned)
///     .with_final_tie_breaker(TieBreaker::ByName);
/// assert_eq!(engine.rule_names(), vec!["FEWEST", "LRA"]);
/// ```
#[derive(Clone)]
pub struct SelectionEngine {
    rules: Vec<Arc<dyn SelectionRule>>,
    tie_breaker: TieBreaker,
    epsilon: f64,
}

impl SelectionEngine {
    /// Creates an empty engine.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            tie_breaker: TieBreaker::MemberOrder,
            epsilon: 1e-9,
        }
    }

    /// The rotation policy: members below their minimum first, then members
    /// never assigned, then the least recently assigned.
    pub fn rotation_default() -> Self {
        Self::new()
            .with_rule(MinimumDaysCatchUp)
            .with_rule(NeverAssigned)
            .with_rule(LeastRecentlyAssigned)
    }

    /// Appends a rule; earlier rules dominate.
    pub fn with_rule<R: SelectionRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_final_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Names of the configured rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Ranks members (best first).
    ///
    /// Returns indices into `members`. The sort is stable, so members that
    /// tie on every rule keep roster order under [`TieBreaker::MemberOrder`].
    pub fn sort_indices(&self, members: &[Member], context: &SelectionContext) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..members.len()).collect();
        indices.sort_by(|&a, &b| self.compare(&members[a], &members[b], context));
        indices
    }

    /// Index of the member to assign, `None` for an empty slice.
    pub fn select(&self, members: &[Member], context: &SelectionContext) -> Option<usize> {
        self.sort_indices(members, context).first().copied()
    }

    /// Scores of one member under each rule.
    pub fn evaluate(&self, member: &Member, context: &SelectionContext) -> Vec<RuleScore> {
        self.rules
            .iter()
            .map(|r| r.evaluate(member, context))
            .collect()
    }

    fn compare(&self, a: &Member, b: &Member, context: &SelectionContext) -> Ordering {
        for rule in &self.rules {
            let score_a = rule.evaluate(a, context);
            let score_b = rule.evaluate(b, context);

            if (score_a - score_b).abs() > self.epsilon {
                return score_a.partial_cmp(&score_b).unwrap_or(Ordering::Equal);
            }
        }

        match self.tie_breaker {
            TieBreaker::MemberOrder => Ordering::Equal,
            TieBreaker::ByName => a.name.cmp(&b.name),
        }
    }
}

impl Default for SelectionEngine {
    fn default() -> Self {
        Self::rotation_default()
    }
}

impl std::fmt::Debug for SelectionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionEngine")
            .field("rules", &self.rule_names())
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}
