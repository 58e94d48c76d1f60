//! Group and member registry.
//!
//! Groups keep registration order, which is also the order the rotation
//! engine walks them each day.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use tracing::{debug, info};

use crate::error::{Result, RotationError};
use crate::models::{Group, PersonConstraint};
use crate::validation::{validate_roster, ValidationErrorKind};

/// The set of rotation groups.
///
/// # TOML shape
/// ```toml
/// [[groups]]
/// id = "ward"
///
/// [[groups.members]]
/// name = "alice"
/// min_days = 4
///
/// [[groups.members]]
/// name = "bob"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    groups: Vec<Group>,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert_group`](Self::insert_group).
    pub fn with_group(mut self, group: Group) -> Result<Self> {
        self.insert_group(group)?;
        Ok(self)
    }

    /// Adds a fully built group.
    ///
    /// # Errors
    /// [`RotationError::EmptyGroupId`] or [`RotationError::DuplicateGroup`].
    pub fn insert_group(&mut self, mut group: Group) -> Result<()> {
        group.id = normalize_id(&group.id)?;
        if self.group(&group.id).is_some() {
            return Err(RotationError::DuplicateGroup(group.id));
        }
        self.groups.push(group);
        Ok(())
    }

    /// Creates an empty group if it does not exist.
    ///
    /// Returns `true` when the group was created.
    pub fn add_group(&mut self, group_id: &str) -> Result<bool> {
        let id = normalize_id(group_id)?;
        if self.group(&id).is_some() {
            return Ok(false);
        }
        debug!(group_id = %id, "created group");
        self.groups.push(Group::new(id));
        Ok(true)
    }

    /// Creates several groups; existing ones are left untouched.
    ///
    /// Returns, per id, whether it was created. Blank ids are rejected
    /// before anything is added.
    pub fn bulk_add_groups<'a>(
        &mut self,
        group_ids: impl IntoIterator<Item = &'a str>,
    ) -> Result<BTreeMap<String, bool>> {
        let ids = group_ids
            .into_iter()
            .map(normalize_id)
            .collect::<Result<Vec<_>>>()?;

        let mut results = BTreeMap::new();
        for id in ids {
            let created = self.add_group(&id)?;
            results.entry(id).or_insert(created);
        }
        info!(count = results.len(), "bulk group creation");
        Ok(results)
    }

    /// Removes a group and all its memberships.
    ///
    /// The id is trimmed the same way as on creation.
    pub fn remove_group(&mut self, group_id: &str) -> Result<Group> {
        let id = normalize_id(group_id)?;
        let idx = self
            .groups
            .iter()
            .position(|g| g.id == id)
            .ok_or(RotationError::GroupNotFound(id))?;
        let group = self.groups.remove(idx);
        debug!(group_id = %group.id, "removed group");
        Ok(group)
    }

    /// Adds a person to a group, creating the group if needed.
    ///
    /// The name is trimmed. Re-adding an existing member replaces their
    /// constraint but keeps their position. Returns `true` for a new member.
    ///
    /// # Errors
    /// [`RotationError::EmptyPersonName`] or [`RotationError::EmptyGroupId`].
    pub fn add_person(
        &mut self,
        group_id: &str,
        person: &str,
        constraint: PersonConstraint,
    ) -> Result<bool> {
        let person = person.trim();
        if person.is_empty() {
            return Err(RotationError::EmptyPersonName);
        }
        self.add_group(group_id)?;
        let id = normalize_id(group_id)?;
        let group = self
            .group_mut(&id)
            .ok_or_else(|| RotationError::GroupNotFound(id.clone()))?;
        let added = group.upsert_member(person, constraint);
        debug!(group_id = %id, person, added, "member registered");
        Ok(added)
    }

    /// Adds unconstrained people to groups in bulk.
    ///
    /// Returns the newly added names per group; groups with no new members
    /// are omitted.
    pub fn bulk_add_people<'a>(
        &mut self,
        assignments: impl IntoIterator<Item = (&'a str, Vec<&'a str>)>,
    ) -> Result<BTreeMap<String, Vec<String>>> {
        let mut results: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (group_id, people) in assignments {
            for person in people {
                if self.add_person(group_id, person, PersonConstraint::unbounded())? {
                    results
                        .entry(group_id.trim().to_string())
                        .or_default()
                        .push(person.trim().to_string());
                }
            }
        }
        Ok(results)
    }

    /// Removes a person from one group.
    pub fn remove_person(&mut self, group_id: &str, person: &str) -> Result<()> {
        let id = normalize_id(group_id)?;
        let person = person.trim();
        let group = self
            .group_mut(&id)
            .ok_or_else(|| RotationError::GroupNotFound(id.clone()))?;
        group
            .remove_member(person)
            .map(|_| debug!(group_id = %id, person, "removed member"))
            .ok_or_else(|| RotationError::PersonNotFound {
                person: person.to_string(),
                group_id: id.clone(),
            })
    }

    /// Looks up a group, ignoring surrounding whitespace in the id.
    pub fn group(&self, group_id: &str) -> Option<&Group> {
        let id = group_id.trim();
        self.groups.iter().find(|g| g.id == id)
    }

    fn group_mut(&mut self, group_id: &str) -> Option<&mut Group> {
        let id = group_id.trim();
        self.groups.iter_mut().find(|g| g.id == id)
    }

    /// Groups in registration order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether there are no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Distinct person names across all groups, in first-seen order.
    pub fn people(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.groups
            .iter()
            .flat_map(|g| g.member_names())
            .filter(|n| seen.insert(*n))
            .collect()
    }

    /// Parses a roster from TOML.
    ///
    /// Rejects blank names and duplicate groups or members. Empty and
    /// undersized groups are accepted here; they are checked when a month
    /// is generated.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let roster: Self = toml::from_str(content)?;
        roster.check_structure()?;
        Ok(roster)
    }

    /// Loads a roster TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    fn check_structure(&self) -> Result<()> {
        if self.groups.is_empty() {
            return Ok(());
        }
        let Err(errors) = validate_roster(&self.groups, 0) else {
            return Ok(());
        };
        match errors.into_iter().find(|e| {
            matches!(
                e.kind,
                ValidationErrorKind::EmptyName
                    | ValidationErrorKind::DuplicateGroup(_)
                    | ValidationErrorKind::DuplicateMember { .. }
            )
        }) {
            Some(first) => Err(first.into()),
            None => Ok(()),
        }
    }
}

fn normalize_id(group_id: &str) -> Result<String> {
    let id = group_id.trim();
    if id.is_empty() {
        Err(RotationError::EmptyGroupId)
    } else {
        Ok(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_group_idempotent() {
        let mut r = Roster::new();
        assert!(r.add_group("ward").unwrap());
        assert!(!r.add_group("ward").unwrap());
        assert!(!r.add_group(" ward ").unwrap());
        assert_eq!(r.len(), 1);
        assert!(matches!(
            r.add_group("  "),
            Err(RotationError::EmptyGroupId)
        ));
    }

    #[test]
    fn test_bulk_add_groups() {
        let mut r = Roster::new();
        r.add_group("a").unwrap();
        let results = r.bulk_add_groups(["a", "b", "c"]).unwrap();
        assert_eq!(results["a"], false);
        assert_eq!(results["b"], true);
        assert_eq!(r.len(), 3);

        // Blank id rejects the whole batch
        assert!(r.bulk_add_groups(["d", ""]).is_err());
        assert!(r.group("d").is_none());
    }

    #[test]
    fn test_add_person_trims_and_creates_group() {
        let mut r = Roster::new();
        assert!(r
            .add_person("ward", "  alice ", PersonConstraint::unbounded())
            .unwrap());
        assert!(r.group("ward").unwrap().has_member("alice"));
        assert!(matches!(
            r.add_person("ward", "   ", PersonConstraint::unbounded()),
            Err(RotationError::EmptyPersonName)
        ));
    }

    #[test]
    fn test_add_person_upserts_constraint() {
        let mut r = Roster::new();
        r.add_person("g", "a", PersonConstraint::unbounded())
            .unwrap();
        r.add_person("g", "b", PersonConstraint::unbounded())
            .unwrap();
        assert!(!r
            .add_person("g", "a", PersonConstraint::at_least(3))
            .unwrap());

        let g = r.group("g").unwrap();
        assert_eq!(g.member_names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(g.member("a").unwrap().constraint.min_days(), Some(3));
    }

    #[test]
    fn test_same_person_in_two_groups() {
        let mut r = Roster::new();
        r.add_person("g1", "a", PersonConstraint::at_least(2))
            .unwrap();
        r.add_person("g2", "a", PersonConstraint::at_most(1).unwrap())
            .unwrap();
        let in_g1 = r.group("g1").unwrap().member("a").unwrap();
        let in_g2 = r.group("g2").unwrap().member("a").unwrap();
        assert_eq!(in_g1.constraint.max_days(), None);
        assert_eq!(in_g2.constraint.max_days(), Some(1));
        assert_eq!(r.people(), vec!["a"]);
    }

    #[test]
    fn test_bulk_add_people() {
        let mut r = Roster::new();
        r.add_person("g", "a", PersonConstraint::unbounded())
            .unwrap();
        let added = r
            .bulk_add_people(vec![("g", vec!["a", "b"]), ("h", vec!["c"])])
            .unwrap();
        assert_eq!(added["g"], vec!["b".to_string()]);
        assert_eq!(added["h"], vec!["c".to_string()]);
    }

    #[test]
    fn test_remove() {
        let mut r = Roster::new();
        r.add_person("g", "a", PersonConstraint::unbounded())
            .unwrap();

        assert!(matches!(
            r.remove_person("g", "zed"),
            Err(RotationError::PersonNotFound { .. })
        ));
        assert!(matches!(
            r.remove_person("nope", "a"),
            Err(RotationError::GroupNotFound(_))
        ));
        r.remove_person("g", "a").unwrap();
        assert!(r.group("g").unwrap().is_empty());

        assert!(r.remove_group("g").is_ok());
        assert!(matches!(
            r.remove_group("g"),
            Err(RotationError::GroupNotFound(_))
        ));
    }

    #[test]
    fn test_remove_trims_like_add() {
        let mut r = Roster::new();
        r.add_group(" ward ").unwrap();
        r.add_person(" ward ", " alice ", PersonConstraint::unbounded())
            .unwrap();
        r.add_person("ward", "bob", PersonConstraint::unbounded())
            .unwrap();

        r.remove_person(" ward ", " alice ").unwrap();
        assert!(!r.group("ward").unwrap().has_member("alice"));

        let removed = r.remove_group(" ward ").unwrap();
        assert_eq!(removed.id, "ward");
        assert!(r.is_empty());
        assert!(matches!(
            r.remove_group("   "),
            Err(RotationError::EmptyGroupId)
        ));
    }

    #[test]
    fn test_from_toml() {
        let r = Roster::from_toml_str(
            r#"
            [[groups]]
            id = "ward"

            [[groups.members]]
            name = "alice"
            min_days = 4

            [[groups.members]]
            name = "bob"
            max_days = 10

            [[groups]]
            id = "icu"
            "#,
        )
        .unwrap();
        assert_eq!(r.len(), 2);
        assert_eq!(r.groups()[0].id, "ward");
        let ward = r.group("ward").unwrap();
        assert_eq!(ward.member("alice").unwrap().constraint.min_days(), Some(4));
        assert_eq!(ward.member("bob").unwrap().constraint.max_days(), Some(10));
        assert!(r.group("icu").unwrap().is_empty());
    }

    #[test]
    fn test_from_toml_rejects_bad_input() {
        let dup = r#"
            [[groups]]
            id = "a"
            [[groups]]
            id = "a"
        "#;
        assert!(matches!(
            Roster::from_toml_str(dup),
            Err(RotationError::DuplicateGroup(_))
        ));

        let bad_constraint = r#"
            [[groups]]
            id = "a"
            [[groups.members]]
            name = "x"
            min_days = 5
            max_days = 2
        "#;
        assert!(Roster::from_toml_str(bad_constraint).is_err());
    }

    #[test]
    fn test_insert_group() {
        let mut r = Roster::new()
            .with_group(Group::new("g").with_member("a").with_member("b"))
            .unwrap();
        assert!(matches!(
            r.insert_group(Group::new("g")),
            Err(RotationError::DuplicateGroup(_))
        ));
        assert_eq!(r.group("g").unwrap().member_count(), 2);
    }
}
