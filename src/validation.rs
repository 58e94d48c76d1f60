//! Roster validation.
//!
//! Checks structural integrity of the rotation roster before a month is
//! generated. Detects:
//! - No groups at all
//! - Blank group ids and member names
//! - Duplicate group ids and duplicate members within a group
//! - Empty groups
//! - Groups too small to avoid consecutive-day assignments
//!
//! Every empty group is reported before any size check, so an empty group
//! is never reported as merely too small.

use crate::error::RotationError;
use crate::models::Group;
use std::collections::HashSet;

/// Minimum members a group needs by default.
///
/// With one member the no-consecutive-days rule can never hold.
pub const DEFAULT_MIN_GROUP_MEMBERS: usize = 2;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The roster has no groups.
    NoGroups,
    /// A group id or member name is blank.
    EmptyName,
    /// Two groups share an id.
    DuplicateGroup(String),
    /// A person appears twice in one group.
    DuplicateMember { group_id: String, person: String },
    /// A group has no members.
    EmptyGroup(String),
    /// A group has fewer members than required.
    InsufficientMembers {
        group_id: String,
        required: usize,
        actual: usize,
    },
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<ValidationError> for RotationError {
    fn from(err: ValidationError) -> Self {
        match err.kind {
            ValidationErrorKind::NoGroups => RotationError::NoGroups,
            ValidationErrorKind::EmptyGroup(group_id) => RotationError::EmptyGroup { group_id },
            ValidationErrorKind::InsufficientMembers {
                group_id,
                required,
                actual,
            } => RotationError::InsufficientMembers {
                group_id,
                required,
                actual,
            },
            ValidationErrorKind::DuplicateGroup(id) => RotationError::DuplicateGroup(id),
            ValidationErrorKind::EmptyName | ValidationErrorKind::DuplicateMember { .. } => {
                RotationError::InvalidConfig(err.message)
            }
        }
    }
}

/// Validates a roster.
///
/// Checks:
/// 1. At least one group exists (stops here otherwise)
/// 2. Group ids and member names are not blank
/// 3. No duplicate group ids
/// 4. No duplicate members within a group
/// 5. No empty groups
/// 6. Every non-empty group has at least `min_members` members
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues in
/// the order above.
pub fn validate_roster(groups: &[Group], min_members: usize) -> ValidationResult {
    if groups.is_empty() {
        return Err(vec![ValidationError::new(
            ValidationErrorKind::NoGroups,
            "No groups have been created",
        )]);
    }

    let mut errors = Vec::new();
    let mut group_ids = HashSet::new();

    for group in groups {
        if group.id.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyName,
                "Group id cannot be empty",
            ));
        }
        if !group_ids.insert(group.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateGroup(group.id.clone()),
                format!("Duplicate group ID: {}", group.id),
            ));
        }

        let mut names = HashSet::new();
        for member in group.members() {
            if member.name.trim().is_empty() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::EmptyName,
                    format!("Group '{}' has a member with an empty name", group.id),
                ));
            } else if !names.insert(member.name.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateMember {
                        group_id: group.id.clone(),
                        person: member.name.clone(),
                    },
                    format!("Duplicate member '{}' in group '{}'", member.name, group.id),
                ));
            }
        }
    }

    for group in groups.iter().filter(|g| g.is_empty()) {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyGroup(group.id.clone()),
            format!("Group '{}' has no members", group.id),
        ));
    }

    for group in groups
        .iter()
        .filter(|g| !g.is_empty() && g.member_count() < min_members)
    {
        errors.push(ValidationError::new(
            ValidationErrorKind::InsufficientMembers {
                group_id: group.id.clone(),
                required: min_members,
                actual: group.member_count(),
            },
            format!(
                "Group '{}' needs at least {} members, has {}",
                group.id,
                min_members,
                group.member_count()
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates and converts the first issue into a [`RotationError`].
pub fn ensure_schedulable(groups: &[Group], min_members: usize) -> crate::error::Result<()> {
    match validate_roster(groups, min_members) {
        Ok(()) => Ok(()),
        Err(errors) => match errors.into_iter().next() {
            Some(first) => Err(first.into()),
            None => Ok(()),
        },
    }
}
