//! Bulk concept import
//!
//! Accepts newline-delimited concept names and creates one concept per
//! non-blank line, in input order. Each new concept is connected to every
//! concept already in the graph, including the ones created earlier in
//! the same batch.

use tracing::info;

use crate::domain::graph::{ConceptId, GraphStore};
use crate::error::Result;

/// Concept names found in `text`, trimmed, blank lines skipped
pub fn parse_concept_names(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Create a concept for every name in `text`
///
/// The batch is applied to a copy of the store and committed only when
/// every name was accepted, so either all concepts are created or none is.
pub fn import_concepts(store: &mut GraphStore, text: &str) -> Result<Vec<ConceptId>> {
    let names = parse_concept_names(text);

    let mut staged = store.clone();
    let ids = names
        .iter()
        .map(|name| staged.create_concept(name))
        .collect::<Result<Vec<_>>>()?;
    *store = staged;

    info!(imported = ids.len(), total = store.concept_count(), "Concepts imported");
    Ok(ids)
}
