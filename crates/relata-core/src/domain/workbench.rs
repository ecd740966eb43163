//! Study workbench
//!
//! The workbench is the single owner of the current graph, the recent
//! window and the selection engine. A presentation layer holds one
//! workbench and drives every command through it; each command either
//! applies completely or returns an error with nothing changed.

use tracing::info;

use super::confidence::{self, ConceptStanding, Neighbour};
use super::graph::{ConceptId, Definition, DefinitionId, GraphStore, RelationshipId};
use super::history::RecentWindow;
use super::selection::{SelectionDecision, SelectionEngine, SelectionWeights};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::storage::{import, snapshot::Snapshot};

/// Graph, recent window and selection engine held together
#[derive(Debug, Clone)]
pub struct Workbench {
    store: GraphStore,
    recent: RecentWindow,
    engine: SelectionEngine,
    track_recent: bool,
}

impl Default for Workbench {
    fn default() -> Self {
        Self::new()
    }
}

impl Workbench {
    /// Create an empty workbench with default weights
    pub fn new() -> Self {
        Self::with_store(GraphStore::new())
    }

    /// Wrap an existing graph
    pub fn with_store(store: GraphStore) -> Self {
        Self {
            store,
            recent: RecentWindow::new(),
            engine: SelectionEngine::default(),
            track_recent: true,
        }
    }

    /// Create an empty workbench configured from `config`
    ///
    /// Fails with `ConfigError` when the configuration does not validate.
    pub fn from_config(config: &Config) -> Result<Self> {
        config
            .validate()
            .map_err(|e| Error::ConfigError(format!("{:#}", e)))?;
        Ok(Self::new()
            .with_weights(config.selection.weights())
            .with_recent_tracking(config.history.enabled))
    }

    pub fn with_weights(mut self, weights: SelectionWeights) -> Self {
        self.engine = SelectionEngine::new(weights);
        self
    }

    /// Enable or disable the recently-defined window
    pub fn with_recent_tracking(mut self, enabled: bool) -> Self {
        self.track_recent = enabled;
        if !enabled {
            self.recent.clear();
        }
        self
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn recent(&self) -> &RecentWindow {
        &self.recent
    }

    pub fn engine(&self) -> &SelectionEngine {
        &self.engine
    }

    // ========== Commands ==========

    pub fn add_concept(&mut self, name: &str) -> Result<ConceptId> {
        let id = self.store.create_concept(name)?;
        self.recent.rebalance(self.store.concept_count());
        Ok(id)
    }

    /// Add one concept per non-blank line, in input order
    pub fn import_concepts(&mut self, text: &str) -> Result<Vec<ConceptId>> {
        let ids = import::import_concepts(&mut self.store, text)?;
        self.recent.rebalance(self.store.concept_count());
        Ok(ids)
    }

    pub fn remove_concept(&mut self, id: ConceptId) -> Result<()> {
        self.store.delete_concept(id)?;
        self.recent.forget(id);
        self.recent.rebalance(self.store.concept_count());
        Ok(())
    }

    pub fn set_priority(&mut self, id: ConceptId, priority: i64) -> Result<()> {
        self.store.set_priority(id, priority)
    }

    /// Submit a definition and mark both members as recently defined
    pub fn define(
        &mut self,
        relationship_id: RelationshipId,
        content: &str,
        confidence: i64,
    ) -> Result<DefinitionId> {
        let id = self
            .store
            .create_definition(relationship_id, content, confidence)?;
        let members = self.store.get_relationship(relationship_id)?.member_ids;
        if self.track_recent {
            self.recent.record(members, self.store.concept_count());
        }
        Ok(id)
    }

    // ========== Queries ==========

    /// Relationship the user should define next
    pub fn next_relationship(&self) -> Result<RelationshipId> {
        self.engine.select_next(&self.store, &self.recent)
    }

    /// Full selection decision for the next relationship
    pub fn next_decision(&self) -> Result<SelectionDecision> {
        self.engine.decide(&self.store, &self.recent)
    }

    pub fn relationship_confidence(&self, id: RelationshipId) -> Result<f64> {
        confidence::relationship_confidence(&self.store, id)
    }

    pub fn concept_confidence(&self, id: ConceptId) -> Result<f64> {
        confidence::concept_confidence(&self.store, id)
    }

    pub fn concepts_by_confidence(&self) -> Result<Vec<ConceptStanding>> {
        confidence::concepts_by_confidence(&self.store)
    }

    pub fn neighbours(&self, id: ConceptId) -> Result<Vec<Neighbour>> {
        confidence::neighbours(&self.store, id)
    }

    pub fn definitions_of(&self, id: RelationshipId) -> Result<Vec<&Definition>> {
        self.store.definitions_of(id)
    }

    // ========== Snapshots ==========

    pub fn export(&self) -> Snapshot {
        Snapshot::from_store(&self.store)
    }

    /// Replace the graph with a snapshot's contents
    ///
    /// The snapshot is fully validated first; on failure the current graph
    /// is untouched. The recent window starts empty after a restore.
    pub fn restore(&mut self, snapshot: Snapshot) -> Result<()> {
        let store = snapshot.into_store()?;
        info!(
            concepts = store.concept_count(),
            relationships = store.relationship_count(),
            definitions = store.definition_count(),
            "Workbench restored from snapshot"
        );
        self.store = store;
        self.recent.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_records_members() {
        let mut bench = Workbench::new();
        bench.import_concepts("A\nB\nC\nD\n").unwrap();

        let rel = bench.next_relationship().unwrap();
        bench.define(rel, "x", 60).unwrap();

        let members = bench.store().get_relationship(rel).unwrap().member_ids;
        assert_eq!(bench.recent().len(), 2);
        assert!(bench.recent().contains(members[0]));
        assert!(bench.recent().contains(members[1]));
    }

    #[test]
    fn test_failed_define_leaves_window_alone() {
        let mut bench = Workbench::new();
        bench.import_concepts("A\nB\nC\nD").unwrap();

        assert!(bench.define(RelationshipId(99), "x", 60).is_err());
        let rel = bench.next_relationship().unwrap();
        assert!(matches!(
            bench.define(rel, "x", 200),
            Err(Error::InvalidConfidence(200))
        ));
        assert!(bench.recent().is_empty());
        assert_eq!(bench.store().definition_count(), 0);
    }

    #[test]
    fn test_next_moves_away_from_just_defined() {
        let mut bench = Workbench::new();
        bench.import_concepts("A\nB\nC\nD\nE\nF").unwrap();

        let first = bench.next_decision().unwrap();
        bench.define(first.relationship_id, "x", 50).unwrap();

        let second = bench.next_decision().unwrap();
        assert_ne!(second.concept_id, first.concept_id);
        assert_ne!(second.concept_id, first.partner_id);
        assert_ne!(second.partner_id, first.concept_id);
        assert_ne!(second.partner_id, first.partner_id);
    }

    #[test]
    fn test_remove_concept_forgets_and_rebalances() {
        let mut bench = Workbench::new();
        let ids = bench.import_concepts("A\nB\nC\nD\nE\nF").unwrap();

        let rel = bench.store().find_relationship(ids[0], ids[1]).unwrap().id;
        bench.define(rel, "x", 50).unwrap();
        assert_eq!(bench.recent().len(), 2);

        bench.remove_concept(ids[0]).unwrap();
        assert!(bench.recent().is_empty());
        assert!(bench.remove_concept(ids[0]).unwrap_err().is_not_found());
    }

    #[test]
    fn test_tracking_disabled() {
        let mut bench = Workbench::new().with_recent_tracking(false);
        bench.import_concepts("A\nB\nC\nD").unwrap();

        let rel = bench.next_relationship().unwrap();
        bench.define(rel, "x", 50).unwrap();
        assert!(bench.recent().is_empty());
    }

    #[test]
    fn test_from_config_uses_weights() {
        let mut config = Config::default();
        config.selection.priority_weight = 3.0;

        let bench = Workbench::from_config(&config).unwrap();
        assert_eq!(bench.engine().weights().priority_weight, 3.0);
    }

    #[test]
    fn test_from_config_rejects_invalid_config() {
        let mut config = Config::default();
        config.selection.confidence_weight = -1.0;

        let err = Workbench::from_config(&config).unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
        assert_eq!(err.code(), "E600");
        assert_eq!(err.kind(), crate::error::ErrorKind::Config);
    }

    #[test]
    fn test_restore_replaces_graph_and_clears_window() {
        let mut source = Workbench::new();
        source.import_concepts("A\nB\nC").unwrap();
        let snapshot = source.export();

        let mut bench = Workbench::new();
        bench.import_concepts("X\nY\nZ\nW").unwrap();
        let rel = bench.next_relationship().unwrap();
        bench.define(rel, "x", 50).unwrap();

        bench.restore(snapshot).unwrap();
        assert_eq!(bench.store(), source.store());
        assert!(bench.recent().is_empty());
    }
}
