//! Monthly rotation engine.
//!
//! # Algorithm
//!
//! For each day of the month (ascending) and each group (roster order):
//!
//! 1. Eligible = members not assigned in this group yesterday and, if they
//!    have `max_days`, still under it.
//! 2. No eligible member → use every member and record a [`Fallback`](crate::models::Fallback).
//! 3. Pick with the selection engine (catch-up, never assigned, least
//!    recently assigned, roster order).
//! 4. Classify and weigh the date, append to the ledger, emit the shift.
//!
//! After the last day every `min_days` is checked. A miss rolls the ledger
//! back to where the run started, so a failed month leaves no trace.
//!
//! # Complexity
//! O(d * g * m log m) where d=days, g=groups, m=members per group.

use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::config::RotationConfig;
use crate::error::{Result, RotationError};
use crate::ledger::FairnessLedger;
use crate::models::holiday::month_bounds;
use crate::models::{Group, Holiday, Member, Schedule, ScheduledShift};
use crate::registry::Roster;
use crate::selection::{SelectionContext, SelectionEngine};
use crate::validation::ensure_schedulable;
use crate::weighting::WeightModel;

/// Transient per-run state, one selection context per group.
#[derive(Debug, Default)]
struct RotationState {
    groups: HashMap<String, SelectionContext>,
}

impl RotationState {
    fn context(&mut self, group_id: &str, date: NaiveDate) -> &mut SelectionContext {
        let ctx = self.groups.entry(group_id.to_string()).or_default();
        ctx.date = Some(date);
        ctx
    }

    fn count(&self, group_id: &str, person: &str) -> u32 {
        self.groups
            .get(group_id)
            .map(|ctx| ctx.count(person))
            .unwrap_or(0)
    }
}

/// Deterministic greedy rotation scheduler.
///
/// # Example
///
/// ```
/// use u_rotation::ledger::FairnessLedger;
/// use u_rotation::models::Group;
/// use u_rotation::registry::Roster;
/// use u_rotation::scheduler::RotationEngine;
///
/// let roster = Roster::new()
///     .with_group(Group::new("ward").with_member("A").with_member("B"))
///     .unwrap();
/// let mut ledger = FairnessLedger::new();
///
/// let engine = RotationEngine::new();
/// let schedule = engine
///     .generate_monthly_schedule(&roster, 2024, 1, &[], &mut ledger)
///     .unwrap();
/// assert_eq!(schedule.shift_count(), 31);
/// assert_eq!(ledger.len(), 31);
/// ```
#[derive(Debug, Clone)]
pub struct RotationEngine {
    config: RotationConfig,
    weights: WeightModel,
    selection: SelectionEngine,
}

impl RotationEngine {
    /// Creates an engine with default configuration.
    pub fn new() -> Self {
        Self {
            config: RotationConfig::default(),
            weights: WeightModel::new(),
            selection: SelectionEngine::rotation_default(),
        }
    }

    /// Creates an engine from a validated configuration.
    pub fn from_config(config: RotationConfig) -> Result<Self> {
        config.validate()?;
        let weights = config.weight_model()?;
        Ok(Self {
            config,
            weights,
            selection: SelectionEngine::rotation_default(),
        })
    }

    /// Replaces the selection policy.
    pub fn with_selection(mut self, selection: SelectionEngine) -> Self {
        self.selection = selection;
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &RotationConfig {
        &self.config
    }

    /// Weight model used to price dates.
    pub fn weight_model(&self) -> &WeightModel {
        &self.weights
    }

    /// Generates one month and records it in the ledger.
    ///
    /// # Errors
    /// - [`RotationError::InvalidMonth`] for a month outside 1-12
    /// - [`RotationError::NoGroups`], [`RotationError::EmptyGroup`],
    ///   [`RotationError::InsufficientMembers`] before anything is scheduled
    /// - [`RotationError::UnmetMinimumDays`] after the month was computed;
    ///   the ledger is rolled back first
    pub fn generate_monthly_schedule(
        &self,
        roster: &Roster,
        year: i32,
        month: u32,
        holidays: &[Holiday],
        ledger: &mut FairnessLedger,
    ) -> Result<Schedule> {
        let (first, last) =
            month_bounds(year, month).ok_or(RotationError::InvalidMonth { year, month })?;
        ensure_schedulable(roster.groups(), self.config.min_group_members)?;

        info!(year, month, groups = roster.len(), "generating schedule");

        let checkpoint = ledger.checkpoint();
        let mut state = RotationState::default();
        let mut schedule = Schedule::new(year, month);

        for date in first.iter_days().take_while(|d| *d <= last) {
            let (day_type, weight) = self.weights.price(date, holidays);

            for group in roster.groups() {
                let ctx = state.context(&group.id, date);
                let candidates = eligible_members(group, ctx, date);
                let candidates = if candidates.is_empty() {
                    warn!(
                        %date,
                        group_id = %group.id,
                        "no eligible member, falling back to all members"
                    );
                    schedule.add_fallback(date, group.id.as_str());
                    group.members().to_vec()
                } else {
                    candidates
                };

                let idx = self
                    .selection
                    .select(&candidates, ctx)
                    .ok_or_else(|| RotationError::EmptyGroup {
                        group_id: group.id.clone(),
                    })?;
                let person = candidates[idx].name.as_str();

                ctx.record(person, date);
                ledger.record_assignment(person, &group.id, date, day_type, weight);
                schedule.add_shift(ScheduledShift::new(
                    date,
                    group.id.as_str(),
                    person,
                    day_type,
                    weight,
                ));
                debug!(%date, group_id = %group.id, person, %day_type, weight, "assigned");
            }
        }

        if let Err(err) = check_minimums(roster, &state) {
            warn!(error = %err, "minimum days not met, rolling back month");
            ledger.rollback(checkpoint);
            return Err(err);
        }

        info!(
            year,
            month,
            shifts = schedule.shift_count(),
            fallbacks = schedule.fallbacks.len(),
            "schedule generated"
        );
        Ok(schedule)
    }
}

impl Default for RotationEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn eligible_members(group: &Group, ctx: &SelectionContext, date: NaiveDate) -> Vec<Member> {
    group
        .members()
        .iter()
        .filter(|m| !ctx.assigned_day_before(&m.name, date))
        .filter(|m| m.constraint.allows_another(ctx.count(&m.name)))
        .cloned()
        .collect()
}

/// First member (roster order) below their minimum.
fn check_minimums(roster: &Roster, state: &RotationState) -> Result<()> {
    for group in roster.groups() {
        for member in group.members() {
            let actual = state.count(&group.id, &member.name);
            if let Some(required) = member.constraint.min_days() {
                if actual < required {
                    return Err(RotationError::UnmetMinimumDays {
                        person: member.name.clone(),
                        group_id: group.id.clone(),
                        required,
                        actual,
                    });
                }
            }
        }
    }
    Ok(())
}
