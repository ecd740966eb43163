//! Selection engine
//!
//! Picks the relationship to define next in two stages:
//!
//! 1. Rank every concept by eligibility score (ascending, ties by ID) and
//!    take the first one that is not in the recent window. If the window
//!    covers every concept, take the best-ranked concept anyway.
//! 2. Among that concept's relationships whose partner is not in the
//!    window, take the most neglected one: never defined first, then the
//!    oldest latest-definition, ties by relationship ID. If every partner
//!    is recent, the window is ignored for this step.
//!
//! The engine only reads its inputs, so identical inputs always produce
//! the same decision.

use std::cmp::Ordering;

use tracing::debug;

use super::types::{ConceptScore, SelectionDecision, SelectionWeights};
use crate::domain::confidence::concept_confidence;
use crate::domain::graph::{GraphStore, RelationshipId};
use crate::domain::history::RecentWindow;
use crate::error::{Error, Result};

/// Minimum number of concepts before any relationship exists
pub const MIN_CONCEPTS: usize = 2;

/// Deterministic next-relationship selector
#[derive(Debug, Clone, Default)]
pub struct SelectionEngine {
    weights: SelectionWeights,
}

impl SelectionEngine {
    /// Create an engine with the given score weights
    pub fn new(weights: SelectionWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &SelectionWeights {
        &self.weights
    }

    /// Every concept with its score, most eligible first
    pub fn rank_concepts(&self, store: &GraphStore) -> Result<Vec<ConceptScore>> {
        let mut ranking = store
            .concepts()
            .map(|concept| {
                let confidence = concept_confidence(store, concept.id)?;
                Ok(ConceptScore {
                    concept_id: concept.id,
                    priority: concept.priority,
                    confidence,
                    score: self.weights.score(concept.priority, confidence),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        ranking.sort_by(|a, b| match a.score.total_cmp(&b.score) {
            Ordering::Equal => a.concept_id.cmp(&b.concept_id),
            other => other,
        });
        Ok(ranking)
    }

    /// Decide which relationship to present next
    pub fn decide(&self, store: &GraphStore, recent: &RecentWindow) -> Result<SelectionDecision> {
        let concepts = store.concept_count();
        if concepts < MIN_CONCEPTS {
            return Err(Error::InsufficientData { concepts });
        }

        let ranking = self.rank_concepts(store)?;
        let (chosen, window_saturated) =
            match ranking.iter().find(|c| !recent.contains(c.concept_id)) {
                Some(candidate) => (candidate, false),
                None => (
                    ranking
                        .first()
                        .ok_or(Error::InsufficientData { concepts })?,
                    true,
                ),
            };

        let mut candidates = Vec::new();
        for relationship in store.relationships_of(chosen.concept_id)? {
            let Some(partner_id) = relationship.other_member(chosen.concept_id) else {
                continue;
            };
            let last_defined = store
                .latest_definition(relationship.id)?
                .map(|definition| definition.created);
            candidates.push((relationship.id, partner_id, last_defined));
        }

        let fresh: Vec<_> = candidates
            .iter()
            .filter(|(_, partner_id, _)| !recent.contains(*partner_id))
            .copied()
            .collect();
        let partners_recent = fresh.is_empty();
        let pool = if partners_recent { &candidates } else { &fresh };

        let (relationship_id, partner_id, last_defined) = pool
            .iter()
            .min_by_key(|(id, _, last_defined)| (*last_defined, *id))
            .copied()
            .ok_or(Error::InsufficientData { concepts })?;

        debug!(
            relationship_id = %relationship_id,
            concept_id = %chosen.concept_id,
            score = chosen.score,
            window_saturated,
            partners_recent,
            "Next relationship selected"
        );

        Ok(SelectionDecision {
            relationship_id,
            concept_id: chosen.concept_id,
            partner_id,
            score: chosen.score,
            last_defined,
            window_saturated,
            partners_recent,
        })
    }

    /// Relationship to present next
    pub fn select_next(&self, store: &GraphStore, recent: &RecentWindow) -> Result<RelationshipId> {
        self.decide(store, recent).map(|d| d.relationship_id)
    }
}

/// Select with the default weights
pub fn select_next(store: &GraphStore, recent: &RecentWindow) -> Result<RelationshipId> {
    SelectionEngine::default().select_next(store, recent)
}
