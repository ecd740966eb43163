//! Relationships: unordered concept pairs the user is asked to define

use serde::{Deserialize, Serialize};

use super::ids::{ConceptId, DefinitionId, RelationshipId};

/// A relationship between two distinct concepts
///
/// Members are fixed at creation. `definition_ids` is an append-only log
/// in creation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub id: RelationshipId,
    pub member_ids: [ConceptId; 2],
    #[serde(default)]
    pub definition_ids: Vec<DefinitionId>,
}

impl Relationship {
    pub(crate) fn new(id: RelationshipId, first: ConceptId, second: ConceptId) -> Self {
        Self {
            id,
            member_ids: [first, second],
            definition_ids: Vec::new(),
        }
    }

    /// Check whether the concept is one of the two members
    pub fn involves(&self, concept_id: ConceptId) -> bool {
        self.member_ids.contains(&concept_id)
    }

    /// The member that is not `concept_id`, or `None` if `concept_id` is not a member
    pub fn other_member(&self, concept_id: ConceptId) -> Option<ConceptId> {
        match self.member_ids {
            [a, b] if a == concept_id => Some(b),
            [a, b] if b == concept_id => Some(a),
            _ => None,
        }
    }

    /// Check whether this relationship connects exactly the given pair
    pub fn connects(&self, a: ConceptId, b: ConceptId) -> bool {
        self.other_member(a) == Some(b)
    }

    pub fn is_defined(&self) -> bool {
        !self.definition_ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_member() {
        let rel = Relationship::new(RelationshipId(0), ConceptId(1), ConceptId(4));

        assert_eq!(rel.other_member(ConceptId(1)), Some(ConceptId(4)));
        assert_eq!(rel.other_member(ConceptId(4)), Some(ConceptId(1)));
        assert_eq!(rel.other_member(ConceptId(2)), None);
        assert!(rel.involves(ConceptId(4)));
        assert!(!rel.involves(ConceptId(0)));
    }

    #[test]
    fn test_connects_is_unordered() {
        let rel = Relationship::new(RelationshipId(0), ConceptId(1), ConceptId(4));

        assert!(rel.connects(ConceptId(1), ConceptId(4)));
        assert!(rel.connects(ConceptId(4), ConceptId(1)));
        assert!(!rel.connects(ConceptId(1), ConceptId(1)));
    }

    #[test]
    fn test_is_defined() {
        let mut rel = Relationship::new(RelationshipId(0), ConceptId(0), ConceptId(1));
        assert!(!rel.is_defined());

        rel.definition_ids.push(DefinitionId(2));
        assert!(rel.is_defined());
    }
}
