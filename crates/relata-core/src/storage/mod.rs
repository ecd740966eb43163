//! Storage layer - JSON snapshots and bulk import
//!
//! # Architecture
//!
//! - `snapshot`: whole-graph JSON export/import with validation, and
//!   atomic file save/load
//! - `import`: newline-delimited concept import
//!
//! # Usage
//!
//! ```no_run
//! use relata_core::domain::graph::GraphStore;
//! use relata_core::storage::{load_snapshot, save_snapshot};
//! use std::path::Path;
//!
//! let mut store = GraphStore::new();
//! store.create_concept("Ownership")?;
//! save_snapshot(&store, Path::new("notes.json"))?;
//!
//! let restored = load_snapshot(Path::new("notes.json"))?;
//! assert_eq!(restored, store);
//! # Ok::<(), relata_core::Error>(())
//! ```

pub mod import;
pub mod snapshot;

pub use import::{import_concepts, parse_concept_names};
pub use snapshot::{Snapshot, export_json, import_json, load_snapshot, save_snapshot};
