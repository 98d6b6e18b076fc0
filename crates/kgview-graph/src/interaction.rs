//! Node detail lookup for selection events.

use crate::store::GraphStore;
use crate::types::{EdgeDetail, Node};
use serde::Serialize;

/// Label shown for an endpoint missing from the store.
pub const UNKNOWN_NODE_LABEL: &str = "(unknown node)";

/// Orientation of an incident edge relative to the selected node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeDirection {
    /// Selected node is the source.
    Outgoing,
    /// Selected node is the target.
    Incoming,
    /// Selected node is both endpoints.
    SelfLoop,
}

/// An edge touching the selected node, seen from that node.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IncidentEdge {
    /// Edge orientation.
    pub direction: EdgeDirection,
    /// Relation display label.
    pub relation_label: String,
    /// Id of the other endpoint.
    pub other_id: String,
    /// Label of the other endpoint, or [`UNKNOWN_NODE_LABEL`].
    pub other_label: String,
    /// Relation detail.
    pub detail: EdgeDetail,
}

/// Everything the detail panel shows for one node.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DetailView {
    /// The selected node.
    pub node: Node,
    /// Edges touching it, in ingestion order.
    pub incident: Vec<IncidentEdge>,
}

/// Answers selection events against a store.
#[derive(Clone, Copy, Debug)]
pub struct InteractionController<'a> {
    store: &'a GraphStore,
}

impl<'a> InteractionController<'a> {
    /// Creates a controller over `store`.
    pub fn new(store: &'a GraphStore) -> Self {
        Self { store }
    }

    /// Detail for the selected node, or `None` if the id is unknown.
    pub fn on_node_selected(&self, id: &str) -> Option<DetailView> {
        let Some(node) = self.store.get_node(id) else {
            log::warn!("Selection references unknown node {id}");
            return None;
        };

        let incident = self
            .store
            .incident_edges(id)
            .into_iter()
            .map(|edge| {
                let (direction, other_id) = if edge.from == edge.to {
                    (EdgeDirection::SelfLoop, &edge.to)
                } else if edge.from == id {
                    (EdgeDirection::Outgoing, &edge.to)
                } else {
                    (EdgeDirection::Incoming, &edge.from)
                };
                let other_label = match self.store.get_node(other_id) {
                    Some(other) => other.label.clone(),
                    None => {
                        log::warn!("Edge {} references unknown node {other_id}", edge.detail.id);
                        UNKNOWN_NODE_LABEL.to_string()
                    }
                };
                IncidentEdge {
                    direction,
                    relation_label: edge.relation_label.clone(),
                    other_id: other_id.clone(),
                    other_label,
                    detail: edge.detail.clone(),
                }
            })
            .collect();

        Some(DetailView {
            node: node.clone(),
            incident,
        })
    }

    /// Signals that the detail panel should be cleared.
    pub fn on_node_deselected(&self) {
        log::debug!("Selection cleared");
    }
}
