//! Definitions: user-authored explanations of a relationship

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use super::ids::DefinitionId;
use crate::error::{Error, Result};

/// Upper bound of a self-assessed confidence score
pub const MAX_CONFIDENCE: u8 = 100;

/// One explanation of a relationship with the author's confidence in it
///
/// Definitions are immutable once created. `created` is stored with
/// millisecond precision and only used to order definitions by recency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub id: DefinitionId,
    pub content: String,
    pub confidence: u8,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created: DateTime<Utc>,
}

impl Definition {
    pub(crate) fn new(
        id: DefinitionId,
        content: impl Into<String>,
        confidence: u8,
        created: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            content: content.into(),
            confidence,
            created: created.trunc_subsecs(3),
        }
    }

    /// Validate a raw confidence value
    pub fn validate_confidence(confidence: i64) -> Result<u8> {
        if (0..=MAX_CONFIDENCE as i64).contains(&confidence) {
            Ok(confidence as u8)
        } else {
            Err(Error::InvalidConfidence(confidence))
        }
    }
}
