//! Types for relationship selection

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::graph::{ConceptId, Priority, RelationshipId};

/// Coefficients of the concept eligibility score
///
/// `score = base - priority_weight * priority + confidence_weight * confidence`.
/// Lower scores are selected first, so higher priority surfaces a concept
/// sooner and higher confidence defers it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionWeights {
    pub base: f64,
    pub priority_weight: f64,
    pub confidence_weight: f64,
}

impl SelectionWeights {
    pub const DEFAULT_BASE: f64 = 4.0;
    pub const DEFAULT_PRIORITY_WEIGHT: f64 = 1.5;
    pub const DEFAULT_CONFIDENCE_WEIGHT: f64 = 0.1;

    /// Eligibility score of a concept (lower is more eligible)
    pub fn score(&self, priority: Priority, confidence: f64) -> f64 {
        self.base - self.priority_weight * f64::from(priority.value())
            + self.confidence_weight * confidence
    }
}

impl Default for SelectionWeights {
    fn default() -> Self {
        Self {
            base: Self::DEFAULT_BASE,
            priority_weight: Self::DEFAULT_PRIORITY_WEIGHT,
            confidence_weight: Self::DEFAULT_CONFIDENCE_WEIGHT,
        }
    }
}

/// A concept's position in the eligibility ranking
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConceptScore {
    pub concept_id: ConceptId,
    pub priority: Priority,
    pub confidence: f64,
    pub score: f64,
}

/// Outcome of a selection, with the facts that led to it
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionDecision {
    /// Relationship to present next
    pub relationship_id: RelationshipId,
    /// Concept whose relationships were considered
    pub concept_id: ConceptId,
    /// The other member of the chosen relationship
    pub partner_id: ConceptId,
    /// Eligibility score of the chosen concept
    pub score: f64,
    /// Creation time of the relationship's latest definition
    pub last_defined: Option<DateTime<Utc>>,
    /// Every concept was in the recent window, so the best-ranked concept was used
    pub window_saturated: bool,
    /// Every partner of the concept was recent, so the window was ignored for them
    pub partners_recent: bool,
}

impl SelectionDecision {
    /// Whether either fallback rule was needed to reach this decision
    pub fn used_fallback(&self) -> bool {
        self.window_saturated || self.partners_recent
    }
}
