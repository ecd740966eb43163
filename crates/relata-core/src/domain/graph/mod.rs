//! Concept graph
//!
//! The graph is complete by construction: adding a concept creates one
//! relationship to every concept already present, and removing a concept
//! removes every relationship that names it.
//!
//! ## Data Model
//!
//! - **Concept**: a user-entered topic with a priority (1-5)
//! - **Relationship**: an unordered pair of concepts, owning an append-only
//!   log of definitions
//! - **Definition**: one explanation of a relationship with a self-assessed
//!   confidence (0-100)
//!
//! ## Usage
//!
//! ```rust
//! use relata_core::domain::graph::GraphStore;
//!
//! let mut store = GraphStore::new();
//! let a = store.create_concept("Ownership")?;
//! let b = store.create_concept("Borrowing")?;
//!
//! let rel = store.find_relationship(a, b).map(|r| r.id).unwrap();
//! store.create_definition(rel, "A borrow is a temporary loan of ownership", 70)?;
//! # Ok::<(), relata_core::Error>(())
//! ```

mod concept;
mod definition;
mod ids;
mod relationship;
mod store;

pub use concept::{Concept, Priority};
pub use definition::{Definition, MAX_CONFIDENCE};
pub use ids::{ConceptId, DefinitionId, IdCounters, RelationshipId};
pub use relationship::Relationship;
pub use store::GraphStore;
