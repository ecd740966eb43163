//! Error types for Relata

use thiserror::Error;

use crate::domain::graph::{ConceptId, DefinitionId, RelationshipId};

/// Result type alias using Relata's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Broad category of an error, used by callers that only need to know
/// which family a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced ID does not exist
    NotFound,
    /// A value was outside its allowed range
    Validation,
    /// Selection was requested before enough concepts exist
    InsufficientData,
    /// Snapshot or filesystem failure
    Storage,
    /// Configuration failure
    Config,
}

/// Relata error types
#[derive(Error, Debug)]
pub enum Error {
    // Entity errors (E001-E099)
    #[error("Concept {0} not found.")]
    ConceptNotFound(ConceptId),

    #[error("Relationship {0} not found.")]
    RelationshipNotFound(RelationshipId),

    #[error("Definition {0} not found.")]
    DefinitionNotFound(DefinitionId),

    // Validation errors (E100-E199)
    #[error("Confidence {0} is out of range. Use a value between 0 and 100.")]
    InvalidConfidence(i64),

    #[error("Priority {0} is out of range. Use a value between 1 and 5.")]
    InvalidPriority(i64),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Selection errors (E200-E299)
    #[error("Not enough concepts to select a relationship ({concepts} present, at least 2 needed).")]
    InsufficientData { concepts: usize },

    // Snapshot errors (E300-E399)
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    // Config errors (E600-E699)
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl Error {
    /// Get error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConceptNotFound(_) => "E001",
            Self::RelationshipNotFound(_) => "E002",
            Self::DefinitionNotFound(_) => "E003",
            Self::InvalidConfidence(_) => "E100",
            Self::InvalidPriority(_) => "E101",
            Self::InvalidInput(_) => "E102",
            Self::InsufficientData { .. } => "E200",
            Self::InvalidSnapshot(_) => "E300",
            Self::Serialization(_) => "E301",
            Self::Io(_) => "E302",
            Self::ConfigError(_) => "E600",
        }
    }

    /// Get the category this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ConceptNotFound(_)
            | Self::RelationshipNotFound(_)
            | Self::DefinitionNotFound(_) => ErrorKind::NotFound,
            Self::InvalidConfidence(_) | Self::InvalidPriority(_) | Self::InvalidInput(_) => {
                ErrorKind::Validation
            }
            Self::InsufficientData { .. } => ErrorKind::InsufficientData,
            Self::InvalidSnapshot(_) | Self::Serialization(_) | Self::Io(_) => ErrorKind::Storage,
            Self::ConfigError(_) => ErrorKind::Config,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    pub(crate) fn invalid_snapshot<T: Into<String>>(msg: T) -> Self {
        Error::InvalidSnapshot(msg.into())
    }
}
