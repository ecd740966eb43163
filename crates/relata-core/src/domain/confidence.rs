//! Confidence model
//!
//! A relationship's confidence is the mean of its definitions' confidences,
//! or 0 when it has none. A concept's confidence is the mean over its
//! relationships, or 50 when it has no relationships at all (only the
//! first concept of a graph can be in that state). Both are in `[0, 100]`
//! and never NaN.

use std::cmp::Ordering;

use crate::domain::graph::{ConceptId, GraphStore, RelationshipId};
use crate::error::Result;

/// Confidence of a relationship that has never been defined
pub const UNDEFINED_RELATIONSHIP_CONFIDENCE: f64 = 0.0;

/// Confidence of a concept that takes part in no relationship
pub const ISOLATED_CONCEPT_CONFIDENCE: f64 = 50.0;

/// Mean confidence of a relationship's definitions
pub fn relationship_confidence(store: &GraphStore, relationship_id: RelationshipId) -> Result<f64> {
    let definitions = store.definitions_of(relationship_id)?;
    if definitions.is_empty() {
        return Ok(UNDEFINED_RELATIONSHIP_CONFIDENCE);
    }

    let total: f64 = definitions.iter().map(|d| f64::from(d.confidence)).sum();
    Ok(total / definitions.len() as f64)
}

/// Mean relationship confidence over all of a concept's relationships
pub fn concept_confidence(store: &GraphStore, concept_id: ConceptId) -> Result<f64> {
    let concept = store.get_concept(concept_id)?;
    if concept.relationship_ids.is_empty() {
        return Ok(ISOLATED_CONCEPT_CONFIDENCE);
    }

    let mut total = 0.0;
    for relationship_id in &concept.relationship_ids {
        total += relationship_confidence(store, *relationship_id)?;
    }
    Ok(total / concept.relationship_ids.len() as f64)
}

/// A concept with its current confidence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConceptStanding {
    pub concept_id: ConceptId,
    pub confidence: f64,
}

/// One relationship of a concept, seen from that concept
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbour {
    pub relationship_id: RelationshipId,
    pub concept_id: ConceptId,
    pub confidence: f64,
}

/// All concepts ordered by confidence, best understood first
///
/// Ties keep ascending concept ID order.
pub fn concepts_by_confidence(store: &GraphStore) -> Result<Vec<ConceptStanding>> {
    let mut standings = store
        .concepts()
        .map(|concept| {
            Ok(ConceptStanding {
                concept_id: concept.id,
                confidence: concept_confidence(store, concept.id)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    standings.sort_by(|a, b| match b.confidence.total_cmp(&a.confidence) {
        Ordering::Equal => a.concept_id.cmp(&b.concept_id),
        other => other,
    });
    Ok(standings)
}

/// The concepts paired with `concept_id`, with the confidence of each pairing
pub fn neighbours(store: &GraphStore, concept_id: ConceptId) -> Result<Vec<Neighbour>> {
    store
        .relationships_of(concept_id)?
        .into_iter()
        .filter_map(|rel| rel.other_member(concept_id).map(|other| (rel.id, other)))
        .map(|(relationship_id, other)| {
            Ok(Neighbour {
                relationship_id,
                concept_id: other,
                confidence: relationship_confidence(store, relationship_id)?,
            })
        })
        .collect()
}
