//! Graph statistics for the info panel.
//!
//! Totals come from the store, current counts from the displayed view. The
//! category histogram always covers the whole store so a filtered view still
//! shows the full category landscape.

use crate::store::GraphStore;
use crate::types::{Edge, Node};
use serde::Serialize;
use std::collections::BTreeMap;

/// Node/edge counts and the category breakdown.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Stats {
    /// Nodes in the store.
    pub total_nodes: usize,
    /// Edges in the store.
    pub total_edges: usize,
    /// Nodes currently displayed.
    pub current_node_count: usize,
    /// Edges currently displayed.
    pub current_edge_count: usize,
    /// Category display label → node count over the whole store.
    pub category_histogram: BTreeMap<String, usize>,
}

impl Stats {
    /// Histogram entries, largest first (ties by label).
    pub fn categories_by_count(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> = self
            .category_histogram
            .iter()
            .map(|(label, &count)| (label.as_str(), count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}

/// Computes statistics for the store and the displayed subset.
pub fn compute_stats(store: &GraphStore, current_nodes: &[Node], current_edges: &[Edge]) -> Stats {
    let mut category_histogram = BTreeMap::new();
    for node in store.nodes() {
        *category_histogram.entry(node.category.clone()).or_insert(0) += 1;
    }

    Stats {
        total_nodes: store.node_count(),
        total_edges: store.edge_count(),
        current_node_count: current_nodes.len(),
        current_edge_count: current_edges.len(),
        category_histogram,
    }
}
