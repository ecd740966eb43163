//! Relata Core Library
//!
//! This crate provides the core functionality for Relata, a study tool that
//! pairs every concept a user enters with every other concept and keeps
//! asking the user to define those relationships:
//! - Concept graph with cascading create/delete (complete by construction)
//! - Confidence model over definitions, relationships and concepts
//! - Selection engine that picks the next relationship to define
//! - Recently-defined window that steers away from repeats
//! - JSON snapshots and bulk concept import
//!
//! The core is synchronous and performs no I/O except in `storage` and
//! `config`.

pub mod config;
pub mod domain;
pub mod error;
pub mod storage;

pub use error::{Error, ErrorKind, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::domain::graph::{ConceptId, DefinitionId, GraphStore, RelationshipId};
    pub use crate::domain::history::RecentWindow;
    pub use crate::domain::selection::{SelectionDecision, SelectionEngine, SelectionWeights};
    pub use crate::domain::workbench::Workbench;
    pub use crate::error::{Error, Result};
}
