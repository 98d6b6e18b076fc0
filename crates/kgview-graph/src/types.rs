//! Canonical graph types.
//!
//! Nodes and edges are derived once from raw triples and never mutated
//! afterwards. Each carries a structured detail record so that presentation
//! (tooltips, detail panels) and filtering read typed fields instead of
//! re-parsing formatted text.

use crate::raw::Attributes;
use serde::{Deserialize, Serialize};

const MISSING: &str = "N/A";

fn pretty_attributes(attributes: &Attributes) -> String {
    serde_json::to_string_pretty(attributes).unwrap_or_else(|_| MISSING.to_string())
}

// ============================================================================
// Node
// ============================================================================

/// Structured detail for a node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeDetail {
    /// Node id (the upstream element id).
    pub id: String,
    /// Resolved category display label.
    pub category: String,
    /// Resolved value: attribute `value`, else the entity's display value.
    pub value: Option<String>,
    /// Full attribute map as exported.
    pub attributes: Attributes,
}

/// A node in the canonical graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique id, equal to the upstream element id.
    pub id: String,
    /// Display text: attribute `name`, else `value`, else the id.
    pub label: String,
    /// Resolved category display label.
    pub category: String,
    /// Color from the category table.
    pub color: String,
    /// Structured detail.
    pub detail: NodeDetail,
}

impl Node {
    /// Multi-line hover text rendered from the detail record.
    pub fn tooltip(&self) -> String {
        format!(
            "ID: {}\n类型: {}\n值: {}\n属性: {}",
            self.detail.id,
            self.detail.category,
            self.detail.value.as_deref().unwrap_or(MISSING),
            pretty_attributes(&self.detail.attributes),
        )
    }
}

// ============================================================================
// Edge
// ============================================================================

/// Structured detail for an edge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeDetail {
    /// Upstream relation element id.
    pub id: String,
    /// Raw relation type as exported.
    pub relation_type: String,
    /// Full attribute map as exported.
    pub attributes: Attributes,
}

/// A directed edge in the canonical graph.
///
/// Edges have no identity of their own; parallel edges with the same
/// endpoints and label are distinct entries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Source node id.
    pub from: String,
    /// Target node id.
    pub to: String,
    /// Resolved relation display label.
    pub relation_label: String,
    /// Structured detail.
    pub detail: EdgeDetail,
}

impl Edge {
    /// Multi-line hover text rendered from the detail record.
    pub fn tooltip(&self) -> String {
        format!(
            "关系: {}\nID: {}\n属性: {}",
            self.relation_label,
            self.detail.id,
            pretty_attributes(&self.detail.attributes),
        )
    }
}

// ============================================================================
// View
// ============================================================================

/// A consistent subset of the graph: every edge's endpoints are in `nodes`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct View {
    /// Nodes in store order.
    pub nodes: Vec<Node>,
    /// Edges in store order.
    pub edges: Vec<Edge>,
}

impl View {
    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether the view holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node ids in view order.
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.id.as_str())
    }
}

// ============================================================================
// Tests
// ============================================================================
