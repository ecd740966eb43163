//! Identifier types for graph entities
//!
//! IDs are plain integers handed out by per-kind monotonically increasing
//! counters. A value is never reused, even after the entity it named has
//! been deleted.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Raw integer value
            pub fn value(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }
    };
}

entity_id!(
    /// Identifier of a concept
    ConceptId
);
entity_id!(
    /// Identifier of a relationship
    RelationshipId
);
entity_id!(
    /// Identifier of a definition
    DefinitionId
);

/// The three ID generators of a graph store
///
/// Each field holds the ID the *next* created entity of that kind receives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdCounters {
    pub next_concept_id: u64,
    pub next_relationship_id: u64,
    pub next_definition_id: u64,
}

impl IdCounters {
    pub(crate) fn take_concept_id(&mut self) -> ConceptId {
        let id = ConceptId(self.next_concept_id);
        self.next_concept_id += 1;
        id
    }

    pub(crate) fn take_relationship_id(&mut self) -> RelationshipId {
        let id = RelationshipId(self.next_relationship_id);
        self.next_relationship_id += 1;
        id
    }

    pub(crate) fn take_definition_id(&mut self) -> DefinitionId {
        let id = DefinitionId(self.next_definition_id);
        self.next_definition_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_are_independent() {
        let mut ids = IdCounters::default();

        assert_eq!(ids.take_concept_id(), ConceptId(0));
        assert_eq!(ids.take_concept_id(), ConceptId(1));
        assert_eq!(ids.take_relationship_id(), RelationshipId(0));

        assert_eq!(ids.next_concept_id, 2);
        assert_eq!(ids.next_relationship_id, 1);
        assert_eq!(ids.next_definition_id, 0);
    }

    #[test]
    fn test_ids_serialize_as_plain_integers() {
        let json = serde_json::to_string(&ConceptId(42)).unwrap();
        assert_eq!(json, "42");

        let counters: IdCounters = serde_json::from_str(
            r#"{"nextConceptId":3,"nextRelationshipId":3,"nextDefinitionId":0}"#,
        )
        .unwrap();
        assert_eq!(counters.next_concept_id, 3);
    }
}
