//! Concepts: the nodes of the study graph

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::ids::{ConceptId, RelationshipId};
use crate::error::{Error, Result};

/// User-assigned importance of a concept (1 to 5, higher surfaces more often)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Priority(u8);

impl Priority {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;
    pub const DEFAULT: u8 = 3;

    /// Validate a raw priority value
    pub fn new(value: i64) -> Result<Self> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(Error::InvalidPriority(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub(crate) fn is_valid(self) -> bool {
        (Self::MIN..=Self::MAX).contains(&self.0)
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user-entered topic
///
/// Every concept is paired with every other concept through exactly one
/// relationship; `relationship_ids` lists the relationships this concept
/// is a member of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Concept {
    pub id: ConceptId,
    #[serde(rename = "conceptName")]
    pub name: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub relationship_ids: BTreeSet<RelationshipId>,
}

impl Concept {
    pub(crate) fn new(id: ConceptId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            priority: Priority::default(),
            relationship_ids: BTreeSet::new(),
        }
    }

    /// Normalize a user-supplied name, rejecting blank input
    pub fn normalize_name(name: &str) -> Result<String> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidInput("concept name must not be empty".into()));
        }
        Ok(trimmed.to_string())
    }

    pub fn relationship_count(&self) -> usize {
        self.relationship_ids.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_bounds() {
        assert_eq!(Priority::new(1).unwrap().value(), 1);
        assert_eq!(Priority::new(5).unwrap().value(), 5);
        assert!(matches!(Priority::new(0), Err(Error::InvalidPriority(0))));
        assert!(matches!(Priority::new(6), Err(Error::InvalidPriority(6))));
        assert!(matches!(Priority::new(-2), Err(Error::InvalidPriority(-2))));
    }

    #[test]
    fn test_default_priority_is_three() {
        assert_eq!(Priority::default().value(), 3);
        let concept = Concept::new(ConceptId(0), "Ownership");
        assert_eq!(concept.priority.value(), 3);
        assert!(concept.relationship_ids.is_empty());
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(Concept::normalize_name("  Borrowing \r").unwrap(), "Borrowing");
        assert!(Concept::normalize_name("   ").is_err());
        assert!(Concept::normalize_name("").is_err());
    }

    #[test]
    fn test_missing_priority_defaults_on_deserialize() {
        let concept: Concept =
            serde_json::from_str(r#"{"id":0,"conceptName":"Traits","relationshipIds":[1,2]}"#)
                .unwrap();
        assert_eq!(concept.name, "Traits");
        assert_eq!(concept.priority, Priority::default());
        assert_eq!(concept.relationship_count(), 2);
    }
}
