//! In-memory graph store
//!
//! Holds concepts, relationships and definitions together with their ID
//! counters. Every mutation validates its inputs before touching any
//! collection, so a failed call leaves the store exactly as it was.

use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

use super::concept::{Concept, Priority};
use super::definition::Definition;
use super::ids::{ConceptId, DefinitionId, IdCounters, RelationshipId};
use super::relationship::Relationship;
use crate::error::{Error, Result};

/// The complete graph of concepts, their pairwise relationships and the
/// definitions written for those relationships.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphStore {
    ids: IdCounters,
    concepts: BTreeMap<ConceptId, Concept>,
    relationships: BTreeMap<RelationshipId, Relationship>,
    definitions: BTreeMap<DefinitionId, Definition>,
}

impl GraphStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> IdCounters {
        self.ids
    }

    pub fn concept_count(&self) -> usize {
        self.concepts.len()
    }

    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    pub fn definition_count(&self) -> usize {
        self.definitions.len()
    }

    /// Concepts in ascending ID order
    pub fn concepts(&self) -> impl Iterator<Item = &Concept> {
        self.concepts.values()
    }

    /// Relationships in ascending ID order
    pub fn relationships(&self) -> impl Iterator<Item = &Relationship> {
        self.relationships.values()
    }

    /// Definitions in ascending ID order
    pub fn definitions(&self) -> impl Iterator<Item = &Definition> {
        self.definitions.values()
    }

    pub fn contains_concept(&self, id: ConceptId) -> bool {
        self.concepts.contains_key(&id)
    }

    pub fn get_concept(&self, id: ConceptId) -> Result<&Concept> {
        self.concepts.get(&id).ok_or(Error::ConceptNotFound(id))
    }

    pub fn get_relationship(&self, id: RelationshipId) -> Result<&Relationship> {
        self.relationships
            .get(&id)
            .ok_or(Error::RelationshipNotFound(id))
    }

    pub fn get_definition(&self, id: DefinitionId) -> Result<&Definition> {
        self.definitions.get(&id).ok_or(Error::DefinitionNotFound(id))
    }

    /// Find the relationship connecting two concepts
    pub fn find_relationship(&self, a: ConceptId, b: ConceptId) -> Option<&Relationship> {
        let concept = self.concepts.get(&a)?;
        concept
            .relationship_ids
            .iter()
            .filter_map(|id| self.relationships.get(id))
            .find(|rel| rel.connects(a, b))
    }

    /// Relationships a concept participates in, in ascending ID order
    pub fn relationships_of(&self, concept_id: ConceptId) -> Result<Vec<&Relationship>> {
        let concept = self.get_concept(concept_id)?;
        concept
            .relationship_ids
            .iter()
            .map(|id| self.get_relationship(*id))
            .collect()
    }

    /// Definitions of a relationship in creation order
    pub fn definitions_of(&self, relationship_id: RelationshipId) -> Result<Vec<&Definition>> {
        let relationship = self.get_relationship(relationship_id)?;
        relationship
            .definition_ids
            .iter()
            .map(|id| self.get_definition(*id))
            .collect()
    }

    /// Definition of a relationship with the newest `created` timestamp
    ///
    /// Definitions sharing that timestamp resolve to the highest ID.
    pub fn latest_definition(
        &self,
        relationship_id: RelationshipId,
    ) -> Result<Option<&Definition>> {
        Ok(self
            .definitions_of(relationship_id)?
            .into_iter()
            .max_by_key(|definition| (definition.created, definition.id)))
    }

    // ========== Mutations ==========

    /// Create a concept and connect it to every existing concept
    ///
    /// One relationship is created per pre-existing concept, in ascending
    /// order of the other concept's ID.
    pub fn create_concept(&mut self, name: &str) -> Result<ConceptId> {
        let name = Concept::normalize_name(name)?;

        let id = self.ids.take_concept_id();
        let mut concept = Concept::new(id, name);

        let others: Vec<ConceptId> = self.concepts.keys().copied().collect();
        for other_id in others {
            let relationship_id = self.ids.take_relationship_id();
            self.relationships.insert(
                relationship_id,
                Relationship::new(relationship_id, id, other_id),
            );
            concept.relationship_ids.insert(relationship_id);
            if let Some(other) = self.concepts.get_mut(&other_id) {
                other.relationship_ids.insert(relationship_id);
            }
        }

        info!(
            concept_id = %id,
            concept_name = %concept.name,
            relationships = concept.relationship_count(),
            "Concept created"
        );
        self.concepts.insert(id, concept);

        Ok(id)
    }

    /// Delete a concept and every relationship that names it
    ///
    /// Definitions of the removed relationships are kept; definitions are
    /// never deleted. Unknown IDs fail with `ConceptNotFound`.
    pub fn delete_concept(&mut self, id: ConceptId) -> Result<Concept> {
        let concept = self.concepts.remove(&id).ok_or(Error::ConceptNotFound(id))?;

        for relationship_id in &concept.relationship_ids {
            let Some(relationship) = self.relationships.remove(relationship_id) else {
                continue;
            };
            let other = relationship
                .other_member(id)
                .and_then(|other_id| self.concepts.get_mut(&other_id));
            if let Some(other) = other {
                other.relationship_ids.remove(relationship_id);
            }
        }

        info!(
            concept_id = %id,
            relationships_removed = concept.relationship_count(),
            "Concept deleted"
        );
        Ok(concept)
    }

    /// Change a concept's priority (1 to 5)
    pub fn set_priority(&mut self, id: ConceptId, priority: i64) -> Result<()> {
        let priority = Priority::new(priority)?;
        let concept = self
            .concepts
            .get_mut(&id)
            .ok_or(Error::ConceptNotFound(id))?;
        concept.priority = priority;

        debug!(concept_id = %id, priority = %priority, "Concept priority updated");
        Ok(())
    }

    /// Append a definition to a relationship, timestamped now
    pub fn create_definition(
        &mut self,
        relationship_id: RelationshipId,
        content: &str,
        confidence: i64,
    ) -> Result<DefinitionId> {
        self.create_definition_at(relationship_id, content, confidence, Utc::now())
    }

    /// Append a definition to a relationship with an explicit creation time
    pub fn create_definition_at(
        &mut self,
        relationship_id: RelationshipId,
        content: &str,
        confidence: i64,
        created: DateTime<Utc>,
    ) -> Result<DefinitionId> {
        if !self.relationships.contains_key(&relationship_id) {
            return Err(Error::RelationshipNotFound(relationship_id));
        }
        let confidence = Definition::validate_confidence(confidence)?;

        let id = self.ids.take_definition_id();
        self.definitions
            .insert(id, Definition::new(id, content, confidence, created));
        if let Some(relationship) = self.relationships.get_mut(&relationship_id) {
            relationship.definition_ids.push(id);
        }

        debug!(
            definition_id = %id,
            relationship_id = %relationship_id,
            confidence = confidence,
            "Definition created"
        );
        Ok(id)
    }

    // ========== Snapshot support ==========

    /// Assemble a store from raw parts, checking every structural invariant
    pub(crate) fn from_parts(
        ids: IdCounters,
        concepts: Vec<Concept>,
        relationships: Vec<Relationship>,
        definitions: Vec<Definition>,
    ) -> Result<Self> {
        let mut store = Self {
            ids,
            ..Self::default()
        };

        for concept in concepts {
            if let Some(dup) = store.concepts.insert(concept.id, concept) {
                return Err(Error::invalid_snapshot(format!(
                    "duplicate concept id {}",
                    dup.id
                )));
            }
        }
        for relationship in relationships {
            if let Some(dup) = store.relationships.insert(relationship.id, relationship) {
                return Err(Error::invalid_snapshot(format!(
                    "duplicate relationship id {}",
                    dup.id
                )));
            }
        }
        for definition in definitions {
            if let Some(dup) = store.definitions.insert(definition.id, definition) {
                return Err(Error::invalid_snapshot(format!(
                    "duplicate definition id {}",
                    dup.id
                )));
            }
        }

        store.check_integrity()?;
        Ok(store)
    }

    pub(crate) fn into_parts(
        self,
    ) -> (
        IdCounters,
        Vec<Concept>,
        Vec<Relationship>,
        Vec<Definition>,
    ) {
        (
            self.ids,
            self.concepts.into_values().collect(),
            self.relationships.into_values().collect(),
            self.definitions.into_values().collect(),
        )
    }

    /// Verify referential integrity, completeness and counter consistency
    pub fn check_integrity(&self) -> Result<()> {
        let fail = |msg: String| Err(Error::invalid_snapshot(msg));

        if let Some(max) = self
            .concepts
            .keys()
            .next_back()
            .filter(|max| max.0 >= self.ids.next_concept_id)
        {
            return fail(format!("concept id {} is not below nextConceptId", max));
        }
        if let Some(max) = self
            .relationships
            .keys()
            .next_back()
            .filter(|max| max.0 >= self.ids.next_relationship_id)
        {
            return fail(format!(
                "relationship id {} is not below nextRelationshipId",
                max
            ));
        }
        if let Some(max) = self
            .definitions
            .keys()
            .next_back()
            .filter(|max| max.0 >= self.ids.next_definition_id)
        {
            return fail(format!("definition id {} is not below nextDefinitionId", max));
        }

        for concept in self.concepts.values() {
            match Concept::normalize_name(&concept.name) {
                Ok(name) if name == concept.name => {}
                _ => {
                    return fail(format!(
                        "concept {} has a blank or untrimmed name",
                        concept.id
                    ));
                }
            }
            if !concept.priority.is_valid() {
                return fail(format!(
                    "concept {} has priority {} outside 1..=5",
                    concept.id, concept.priority
                ));
            }
            for relationship_id in &concept.relationship_ids {
                match self.relationships.get(relationship_id) {
                    Some(rel) if rel.involves(concept.id) => {}
                    Some(_) => {
                        return fail(format!(
                            "concept {} lists relationship {} it is not a member of",
                            concept.id, relationship_id
                        ));
                    }
                    None => {
                        return fail(format!(
                            "concept {} references missing relationship {}",
                            concept.id, relationship_id
                        ));
                    }
                }
            }
        }

        let mut pairs = BTreeSet::new();
        let mut owned_definitions = BTreeSet::new();
        for relationship in self.relationships.values() {
            let [a, b] = relationship.member_ids;
            if a == b {
                return fail(format!(
                    "relationship {} connects concept {} to itself",
                    relationship.id, a
                ));
            }
            for member in [a, b] {
                match self.concepts.get(&member) {
                    Some(concept) if concept.relationship_ids.contains(&relationship.id) => {}
                    Some(_) => {
                        return fail(format!(
                            "concept {} does not reference relationship {}",
                            member, relationship.id
                        ));
                    }
                    None => {
                        return fail(format!(
                            "relationship {} references missing concept {}",
                            relationship.id, member
                        ));
                    }
                }
            }
            if !pairs.insert((a.min(b), a.max(b))) {
                return fail(format!(
                    "concepts {} and {} are connected more than once",
                    a, b
                ));
            }
            for definition_id in &relationship.definition_ids {
                if !self.definitions.contains_key(definition_id) {
                    return fail(format!(
                        "relationship {} references missing definition {}",
                        relationship.id, definition_id
                    ));
                }
                if !owned_definitions.insert(*definition_id) {
                    return fail(format!(
                        "definition {} is owned by more than one relationship",
                        definition_id
                    ));
                }
            }
        }

        let n = self.concepts.len();
        if pairs.len() != n * n.saturating_sub(1) / 2 {
            return fail(format!(
                "{} concepts require {} relationships, found {}",
                n,
                n * n.saturating_sub(1) / 2,
                pairs.len()
            ));
        }

        for definition in self.definitions.values() {
            if definition.confidence > super::definition::MAX_CONFIDENCE {
                return fail(format!(
                    "definition {} has confidence {} above 100",
                    definition.id, definition.confidence
                ));
            }
        }

        Ok(())
    }
}
