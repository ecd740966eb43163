//! Next-relationship selection
//!
//! Decides which relationship the user should define next, balancing
//! concept priority, concept confidence and how long each relationship
//! has gone without a new definition, while steering away from concepts
//! that were just discussed.
//!
//! ## Example
//!
//! ```rust
//! use relata_core::domain::graph::GraphStore;
//! use relata_core::domain::history::RecentWindow;
//! use relata_core::domain::selection::SelectionEngine;
//!
//! let mut store = GraphStore::new();
//! for name in ["Ownership", "Borrowing", "Lifetimes"] {
//!     store.create_concept(name)?;
//! }
//!
//! let engine = SelectionEngine::default();
//! let decision = engine.decide(&store, &RecentWindow::new())?;
//! println!("define relationship {}", decision.relationship_id);
//! # Ok::<(), relata_core::Error>(())
//! ```

mod engine;
mod types;

pub use engine::{MIN_CONCEPTS, SelectionEngine, select_next};
pub use types::{ConceptScore, SelectionDecision, SelectionWeights};
