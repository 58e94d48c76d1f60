//! Error taxonomy for rotation scheduling.
//!
//! | Category | Variants | When |
//! |----------|----------|------|
//! | Validation | `EmptyPersonName`, `InvalidConstraint`, `InvalidWeight`, `InvalidRange`, ... | Rejected at the boundary, nothing applied |
//! | Precondition | `NoGroups`, `EmptyGroup`, `InsufficientMembers` | Before any day is scheduled |
//! | Constraint violation | `UnmetMinimumDays` | After the month body was computed |
//! | Not found | `GroupNotFound`, `PersonNotFound`, `HolidayNotFound` | Registry lookups |
//!
//! All failures are deterministic for the same inputs.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::DayType;

#[derive(Debug, Error)]
pub enum RotationError {
    #[error("person name cannot be empty")]
    EmptyPersonName,

    #[error("group id cannot be empty")]
    EmptyGroupId,

    #[error("invalid constraint: min_days {min:?} / max_days {max:?}")]
    InvalidConstraint { min: Option<u32>, max: Option<u32> },

    #[error("weight for {day_type} must be positive, got {weight}")]
    InvalidWeight { day_type: DayType, weight: f64 },

    #[error("holiday end date {end} is before start date {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("invalid month {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("group already exists: {0}")]
    DuplicateGroup(String),

    #[error("no groups have been created")]
    NoGroups,

    #[error("group '{group_id}' has no members")]
    EmptyGroup { group_id: String },

    #[error(
        "group '{group_id}' needs at least {required} members to avoid consecutive days, has {actual}"
    )]
    InsufficientMembers {
        group_id: String,
        required: usize,
        actual: usize,
    },

    #[error(
        "could not meet minimum days for '{person}' in group '{group_id}': required {required}, scheduled {actual}"
    )]
    UnmetMinimumDays {
        person: String,
        group_id: String,
        required: u32,
        actual: u32,
    },

    #[error("group not found: {0}")]
    GroupNotFound(String),

    #[error("person '{person}' not found in group '{group_id}'")]
    PersonNotFound { person: String, group_id: String },

    #[error("holiday not found: {0}")]
    HolidayNotFound(u64),

    #[error("csv line {line}: {reason}")]
    Csv { line: usize, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, RotationError>;
