//! Rotation groups and their members.
//!
//! A group is a rotation pool: exactly one member is assigned per day.
//! Member order is significant; it is the final tie-breaker during
//! selection, so it must stay stable for schedules to be reproducible.

use serde::{Deserialize, Serialize};

use super::PersonConstraint;

/// A rotation pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// Unique group identifier.
    pub id: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Members in registration order. Names are unique.
    #[serde(default)]
    members: Vec<Member>,
}

/// A person's membership in a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Person name, unique within the group.
    pub name: String,
    /// Monthly bounds for this membership.
    #[serde(flatten)]
    pub constraint: PersonConstraint,
}

impl Member {
    /// Creates an unconstrained member.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constraint: PersonConstraint::unbounded(),
        }
    }

    /// Sets the constraint.
    pub fn with_constraint(mut self, constraint: PersonConstraint) -> Self {
        self.constraint = constraint;
        self
    }
}

impl Group {
    /// Creates an empty group.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            members: Vec::new(),
        }
    }

    /// Sets the group name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds an unconstrained member.
    pub fn with_member(self, name: impl Into<String>) -> Self {
        self.with_constrained_member(name, PersonConstraint::unbounded())
    }

    /// Adds a member with a constraint.
    pub fn with_constrained_member(
        mut self,
        name: impl Into<String>,
        constraint: PersonConstraint,
    ) -> Self {
        self.upsert_member(name, constraint);
        self
    }

    /// Inserts a member, or updates the constraint of an existing one.
    ///
    /// Returns `true` if the member is new. An existing member keeps its
    /// position in the rotation order.
    pub fn upsert_member(&mut self, name: impl Into<String>, constraint: PersonConstraint) -> bool {
        let name = name.into();
        if let Some(existing) = self.members.iter_mut().find(|m| m.name == name) {
            existing.constraint = constraint;
            return false;
        }
        self.members.push(Member { name, constraint });
        true
    }

    /// Removes a member by name.
    pub fn remove_member(&mut self, name: &str) -> Option<Member> {
        let idx = self.members.iter().position(|m| m.name == name)?;
        Some(self.members.remove(idx))
    }

    /// Members in rotation order.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Looks up a member by name.
    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.name == name)
    }

    /// Whether a person belongs to the group.
    pub fn has_member(&self, name: &str) -> bool {
        self.member(name).is_some()
    }

    /// Member names in rotation order.
    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.name.as_str())
    }

    /// Number of members.
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Whether the group has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
