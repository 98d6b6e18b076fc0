//! The canonical graph store and its builder.
//!
//! [`GraphStore`] wraps a petgraph `DiGraph` with lookup tables, the flat
//! edge list, and the first-seen order of node ids. It is populated by a
//! single [`GraphBuilder`] pass and is read-only afterwards: the mutation
//! methods are crate-private and only the normalizer calls them.
//!
//! Ingestion never aborts on a bad record. Rejected records are logged and
//! listed in [`BuildStats::warnings`].

use crate::normalize::Normalizer;
use crate::raw::RawTriple;
use crate::types::{Edge, Node};
use kgview_core::{Error, Result, ViewerConfig};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

// ============================================================================
// GraphStore
// ============================================================================

/// Deduplicated node table plus edge list.
///
/// Graph node weights are node ids; graph edge weights are positions in the
/// flat edge list, so incident-edge queries come back in ingestion order.
#[derive(Clone, Debug, Default)]
pub struct GraphStore {
    graph: DiGraph<String, usize>,
    node_indices: HashMap<String, NodeIndex>,
    nodes: HashMap<String, Node>,
    ordered_ids: Vec<String>,
    edges: Vec<Edge>,
}

impl GraphStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether the store holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Gets a node by id.
    pub fn get_node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Checks if a node exists.
    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// All node ids in first-seen order, each exactly once.
    pub fn ordered_ids(&self) -> &[String] {
        &self.ordered_ids
    }

    /// All nodes in first-seen order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.ordered_ids.iter().filter_map(|id| self.nodes.get(id))
    }

    /// All edges in ingestion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Edges with `id` as either endpoint, in ingestion order.
    ///
    /// A self-loop is returned once.
    pub fn incident_edges(&self, id: &str) -> Vec<&Edge> {
        let Some(&idx) = self.node_indices.get(id) else {
            return Vec::new();
        };

        let mut positions: Vec<usize> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .chain(self.graph.edges_directed(idx, Direction::Incoming))
            .map(|edge_ref| *edge_ref.weight())
            .collect();
        positions.sort_unstable();
        positions.dedup();

        positions
            .into_iter()
            .filter_map(|pos| self.edges.get(pos))
            .collect()
    }

    /// Inserts a node unless its id is already present.
    ///
    /// Returns `false` when the id existed; the stored node is left untouched.
    pub(crate) fn insert_node(&mut self, node: Node) -> bool {
        if self.node_indices.contains_key(&node.id) {
            return false;
        }
        let idx = self.graph.add_node(node.id.clone());
        self.node_indices.insert(node.id.clone(), idx);
        self.ordered_ids.push(node.id.clone());
        self.nodes.insert(node.id.clone(), node);
        true
    }

    /// Appends an edge. Both endpoints must already exist.
    pub(crate) fn push_edge(&mut self, edge: Edge) -> Result<()> {
        let from_idx = self
            .node_indices
            .get(&edge.from)
            .copied()
            .ok_or_else(|| Error::lookup_miss(&edge.from))?;
        let to_idx = self
            .node_indices
            .get(&edge.to)
            .copied()
            .ok_or_else(|| Error::lookup_miss(&edge.to))?;

        self.graph.add_edge(from_idx, to_idx, self.edges.len());
        self.edges.push(edge);
        Ok(())
    }
}

// ============================================================================
// Builder
// ============================================================================

/// A record that was skipped during ingestion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RecordWarning {
    /// Zero-based position in the input array.
    pub index: usize,
    /// Why the record was skipped.
    pub message: String,
}

/// Statistics from a store build.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    /// Records in the input.
    pub records_seen: usize,
    /// Records skipped because they were incomplete or malformed.
    pub records_rejected: usize,
    /// Distinct nodes created.
    pub nodes_created: usize,
    /// Edges created (one per accepted record).
    pub edges_created: usize,
    /// One entry per rejected record.
    pub warnings: Vec<RecordWarning>,
}

/// Builds a [`GraphStore`] from the exported records in one pass.
pub struct GraphBuilder<'a> {
    normalizer: Normalizer<'a>,
}

impl<'a> GraphBuilder<'a> {
    /// Creates a builder with the given normalizer.
    pub fn new(normalizer: Normalizer<'a>) -> Self {
        Self { normalizer }
    }

    /// Creates a builder using the tables of a viewer configuration.
    pub fn from_config(config: &'a ViewerConfig) -> Self {
        Self::new(Normalizer::from_config(config))
    }

    /// Normalizes every record, in input order.
    pub fn build(&self, records: &[Value]) -> (GraphStore, BuildStats) {
        let mut store = GraphStore::new();
        let mut stats = BuildStats {
            records_seen: records.len(),
            ..BuildStats::default()
        };

        for (index, record) in records.iter().enumerate() {
            let outcome = RawTriple::from_value(index, record)
                .and_then(|triple| self.normalizer.normalize(&triple, &mut store));

            if let Err(e) = outcome {
                log::warn!("Skipping record: {e}");
                stats.records_rejected += 1;
                stats.warnings.push(RecordWarning {
                    index,
                    message: e.to_string(),
                });
            }
        }

        stats.nodes_created = store.node_count();
        stats.edges_created = store.edge_count();

        log::info!(
            "Graph built: {} nodes, {} edges from {} records ({} rejected)",
            stats.nodes_created,
            stats.edges_created,
            stats.records_seen,
            stats.records_rejected
        );

        (store, stats)
    }
}

// ============================================================================
// Tests
// ============================================================================
