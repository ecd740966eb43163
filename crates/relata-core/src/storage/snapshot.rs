//! JSON snapshot export/import
//!
//! A snapshot is the whole graph (concepts, relationships, definitions and
//! the three ID counters) as a single JSON document. Field names follow the
//! established export format:
//!
//! ```text
//! {
//!   "ids": { "nextConceptId": 3, "nextRelationshipId": 3, "nextDefinitionId": 1 },
//!   "concepts": [ { "id": 0, "conceptName": "A", "priority": 3, "relationshipIds": [0, 1] } ],
//!   "relationships": [ { "id": 0, "memberIds": [1, 0], "definitionIds": [0] } ],
//!   "definitions": [ { "id": 0, "content": "...", "confidence": 80, "created": 1700000000000 } ]
//! }
//! ```
//!
//! Importing validates every structural invariant before a store is
//! produced, so a malformed document never yields a half-built graph.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

use crate::domain::graph::{Concept, Definition, GraphStore, IdCounters, Relationship};
use crate::error::{Error, Result};

/// Serializable image of a graph store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub ids: IdCounters,
    #[serde(default)]
    pub concepts: Vec<Concept>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
    #[serde(default)]
    pub definitions: Vec<Definition>,
}

impl Snapshot {
    pub fn from_store(store: &GraphStore) -> Self {
        Self::from(store.clone())
    }

    /// Rebuild a store, rejecting any snapshot that breaks a graph invariant
    pub fn into_store(self) -> Result<GraphStore> {
        GraphStore::from_parts(self.ids, self.concepts, self.relationships, self.definitions)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<GraphStore> for Snapshot {
    fn from(store: GraphStore) -> Self {
        let (ids, concepts, relationships, definitions) = store.into_parts();
        Self {
            ids,
            concepts,
            relationships,
            definitions,
        }
    }
}

/// Serialize a store to a JSON document
pub fn export_json(store: &GraphStore) -> Result<String> {
    Snapshot::from_store(store).to_json()
}

/// Parse and validate a JSON document into a new store
pub fn import_json(json: &str) -> Result<GraphStore> {
    Snapshot::from_json(json)?.into_store()
}

/// Write a store to `path`
///
/// The document is written to a temporary file in the same directory and
/// renamed into place, so an existing file is never left half-written.
pub fn save_snapshot(store: &GraphStore, path: &Path) -> Result<()> {
    let json = export_json(store)?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;

    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(json.as_bytes())?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| Error::Io(e.error))?;

    info!(
        path = %path.display(),
        concepts = store.concept_count(),
        definitions = store.definition_count(),
        "Snapshot saved"
    );
    Ok(())
}

/// Read and validate a store from `path`
pub fn load_snapshot(path: &Path) -> Result<GraphStore> {
    let json = fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = json.len(), "Snapshot read");

    let store = import_json(&json)?;
    info!(
        path = %path.display(),
        concepts = store.concept_count(),
        relationships = store.relationship_count(),
        "Snapshot loaded"
    );
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn sample_store() -> GraphStore {
        let mut store = GraphStore::new();
        let a = store.create_concept("Ownership").unwrap();
        let b = store.create_concept("Borrowing").unwrap();
        let c = store.create_concept("Lifetimes").unwrap();
        store.set_priority(c, 5).unwrap();

        let ab = store.find_relationship(a, b).unwrap().id;
        let created = Utc.timestamp_millis_opt(1_000).unwrap();
        store
            .create_definition_at(ab, "borrows never outlive the owner", 80, created)
            .unwrap();
        store.create_definition(ab, "shared or unique, not both", 40).unwrap();
        store
    }

    #[test]
    fn test_round_trip_preserves_store() {
        let store = sample_store();

        let json = export_json(&store).unwrap();
        let back = import_json(&json).unwrap();

        assert_eq!(back, store);
        assert_eq!(back.ids(), store.ids());
    }

    #[test]
    fn test_document_uses_export_field_names() {
        let store = sample_store();
        let value: serde_json::Value = serde_json::from_str(&export_json(&store).unwrap()).unwrap();

        assert_eq!(value["ids"]["nextConceptId"], 3);
        assert_eq!(value["ids"]["nextRelationshipId"], 3);
        assert_eq!(value["ids"]["nextDefinitionId"], 2);
        assert_eq!(value["concepts"][0]["conceptName"], "Ownership");
        assert_eq!(value["concepts"][2]["priority"], 5);
        assert_eq!(value["relationships"][0]["memberIds"], serde_json::json!([1, 0]));
        assert_eq!(value["relationships"][0]["definitionIds"], serde_json::json!([0, 1]));
        assert_eq!(value["definitions"][0]["created"], 1_000);
    }

    #[test]
    fn test_imports_document_without_priorities() {
        let json = r#"{
            "ids": { "nextConceptId": 2, "nextRelationshipId": 1, "nextDefinitionId": 1 },
            "concepts": [
                { "id": 0, "conceptName": "A", "relationshipIds": [0] },
                { "id": 1, "conceptName": "B", "relationshipIds": [0] }
            ],
            "relationships": [ { "id": 0, "memberIds": [1, 0], "definitionIds": [0] } ],
            "definitions": [ { "id": 0, "content": "x", "confidence": 70, "created": 1650000000000 } ]
        }"#;

        let store = import_json(json).unwrap();
        assert_eq!(store.concept_count(), 2);
        assert!(store.concepts().all(|c| c.priority.value() == 3));
    }

    #[test]
    fn test_rejects_dangling_member() {
        let json = r#"{
            "ids": { "nextConceptId": 3, "nextRelationshipId": 1, "nextDefinitionId": 0 },
            "concepts": [
                { "id": 0, "conceptName": "A", "relationshipIds": [0] },
                { "id": 1, "conceptName": "B", "relationshipIds": [] }
            ],
            "relationships": [ { "id": 0, "memberIds": [2, 0], "definitionIds": [] } ],
            "definitions": []
        }"#;

        assert!(matches!(import_json(json), Err(Error::InvalidSnapshot(_))));
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let store = sample_store();
        let mut snapshot = Snapshot::from_store(&store);
        snapshot.definitions[0].confidence = 150;
        assert!(matches!(
            snapshot.into_store(),
            Err(Error::InvalidSnapshot(_))
        ));

        let mut value: serde_json::Value =
            serde_json::from_str(&export_json(&store).unwrap()).unwrap();
        value["concepts"][0]["priority"] = serde_json::json!(9);
        assert!(import_json(&value.to_string()).is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            import_json("{ not json"),
            Err(Error::Serialization(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("notes.json");
        let store = sample_store();

        save_snapshot(&store, &path).unwrap();
        assert_eq!(load_snapshot(&path).unwrap(), store);
    }

    #[test]
    fn test_failed_load_reports_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.json");

        assert!(matches!(load_snapshot(&path), Err(Error::Io(_))));

        fs::write(&path, "[]").unwrap();
        assert!(matches!(load_snapshot(&path), Err(Error::Serialization(_))));
    }
}
