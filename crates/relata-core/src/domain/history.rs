//! Recently defined concepts
//!
//! A bounded FIFO of the concepts whose relationships were defined most
//! recently. Entries are kept in pairs (the two members of one defined
//! relationship) and evicted a pair at a time from the oldest end. The
//! bound is `floor(total_concepts / 2)` concept IDs and follows the graph
//! as concepts come and go.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::debug;

use crate::domain::graph::ConceptId;

/// Rolling window of recently defined concept pairs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentWindow {
    pairs: VecDeque<[ConceptId; 2]>,
}

impl RecentWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum number of concept IDs the window may hold for a graph size
    pub fn capacity_for(total_concepts: usize) -> usize {
        total_concepts / 2
    }

    /// Number of concept IDs held (always even)
    pub fn len(&self) -> usize {
        self.pairs.len() * 2
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn contains(&self, concept_id: ConceptId) -> bool {
        self.pairs.iter().any(|pair| pair.contains(&concept_id))
    }

    /// Concept IDs from oldest to newest
    pub fn concept_ids(&self) -> impl Iterator<Item = ConceptId> + '_ {
        self.pairs.iter().flat_map(|pair| pair.iter().copied())
    }

    /// Record the members of a just-defined relationship
    ///
    /// Returns the number of concept IDs evicted to stay within the bound.
    pub fn record(&mut self, members: [ConceptId; 2], total_concepts: usize) -> usize {
        self.pairs.push_back(members);
        self.rebalance(total_concepts)
    }

    /// Evict the oldest pairs until the window fits the current graph size
    pub fn rebalance(&mut self, total_concepts: usize) -> usize {
        let capacity = Self::capacity_for(total_concepts);
        let mut evicted = 0;
        while self.len() > capacity {
            if self.pairs.pop_front().is_none() {
                break;
            }
            evicted += 2;
        }
        if evicted > 0 {
            debug!(evicted, capacity, "Recent window trimmed");
        }
        evicted
    }

    /// Drop every pair mentioning a concept that no longer exists
    pub fn forget(&mut self, concept_id: ConceptId) {
        self.pairs.retain(|pair| !pair.contains(&concept_id));
    }

    pub fn clear(&mut self) {
        self.pairs.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: u64, b: u64) -> [ConceptId; 2] {
        [ConceptId(a), ConceptId(b)]
    }

    #[test]
    fn test_capacity_is_half_the_concepts() {
        assert_eq!(RecentWindow::capacity_for(0), 0);
        assert_eq!(RecentWindow::capacity_for(3), 1);
        assert_eq!(RecentWindow::capacity_for(4), 2);
        assert_eq!(RecentWindow::capacity_for(9), 4);
    }

    #[test]
    fn test_record_within_capacity() {
        let mut window = RecentWindow::new();

        assert_eq!(window.record(pair(0, 1), 8), 0);
        assert_eq!(window.record(pair(2, 3), 8), 0);
        assert_eq!(window.len(), 4);
        assert!(window.contains(ConceptId(3)));
        assert_eq!(
            window.concept_ids().collect::<Vec<_>>(),
            vec![ConceptId(0), ConceptId(1), ConceptId(2), ConceptId(3)]
        );
    }

    #[test]
    fn test_evicts_oldest_pair() {
        let mut window = RecentWindow::new();
        window.record(pair(0, 1), 4);

        assert_eq!(window.record(pair(2, 3), 4), 2);
        assert_eq!(window.len(), 2);
        assert!(!window.contains(ConceptId(0)));
        assert!(!window.contains(ConceptId(1)));
        assert!(window.contains(ConceptId(2)));
    }

    #[test]
    fn test_odd_capacity_evicts_whole_pairs() {
        // Three concepts allow one ID, which cannot hold a pair
        let mut window = RecentWindow::new();
        assert_eq!(window.record(pair(0, 1), 3), 2);
        assert!(window.is_empty());
    }

    #[test]
    fn test_rebalance_after_shrink() {
        let mut window = RecentWindow::new();
        for i in 0..4 {
            window.record(pair(i * 2, i * 2 + 1), 20);
        }
        assert_eq!(window.len(), 8);

        assert_eq!(window.rebalance(9), 4);
        assert_eq!(window.len(), 4);
        assert!(window.contains(ConceptId(7)));
        assert!(!window.contains(ConceptId(0)));
    }

    #[test]
    fn test_bound_holds_for_any_sequence() {
        let mut window = RecentWindow::new();
        for total in 0..12usize {
            for i in 0..10u64 {
                window.record(pair(i, i + 1), total);
                assert!(window.len() <= RecentWindow::capacity_for(total));
            }
        }
    }

    #[test]
    fn test_forget_removes_pairs() {
        let mut window = RecentWindow::new();
        window.record(pair(0, 1), 10);
        window.record(pair(2, 3), 10);

        window.forget(ConceptId(1));
        assert_eq!(window.len(), 2);
        assert!(!window.contains(ConceptId(0)));
        assert!(window.contains(ConceptId(2)));
    }
}
