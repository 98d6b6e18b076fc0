//! Test helpers: record builders and a recording render adapter.
//!
//! Available under `cfg(test)` and the `test-utils` feature.

use crate::adapter::{DeselectCallback, RenderAdapter, SelectCallback};
use crate::store::{BuildStats, GraphBuilder, GraphStore};
use crate::types::{Edge, Node};
use kgview_core::{Result, ViewerConfig};
use serde_json::{Value, json};

/// Builds one export record `(source)-[relation]->(target)`.
///
/// Entities get their name as the `name` attribute; the relation element id
/// is derived from the endpoints and type.
pub fn triple(
    source_id: &str,
    source_category: &str,
    source_name: &str,
    relation_type: &str,
    target_id: &str,
    target_category: &str,
    target_name: &str,
) -> Value {
    json!({
        "n": {
            "elementId": source_id,
            "labels": [source_category],
            "properties": {"name": source_name}
        },
        "r": {
            "elementId": format!("{source_id}-{relation_type}-{target_id}"),
            "type": relation_type,
            "properties": {}
        },
        "m": {
            "elementId": target_id,
            "labels": [target_category],
            "properties": {"name": target_name}
        }
    })
}

/// Builds a store from records using the default configuration.
pub fn build_store(records: &[Value]) -> (GraphStore, BuildStats) {
    GraphBuilder::from_config(&ViewerConfig::default()).build(records)
}

/// A render adapter that records every call and lets tests fire selection
/// callbacks as if a user clicked.
#[derive(Default)]
pub struct RecordingAdapter {
    /// Node ids of every `set_data` call, in call order.
    pub data_calls: Vec<Vec<String>>,
    /// Edge count of every `set_data` call, in call order.
    pub edge_counts: Vec<usize>,
    /// Number of `fit` calls.
    pub fit_calls: usize,
    /// Whether `disable_physics_on_stabilized` was requested.
    pub freeze_requested: bool,
    /// Messages passed to `show_error`.
    pub errors: Vec<String>,
    /// Messages passed to `notify`.
    pub notices: Vec<String>,
    select: Option<SelectCallback>,
    deselect: Option<DeselectCallback>,
}

impl RecordingAdapter {
    /// Creates an adapter with nothing recorded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Node ids of the most recent `set_data` call.
    pub fn last_node_ids(&self) -> Option<&[String]> {
        self.data_calls.last().map(Vec::as_slice)
    }

    /// Fires the registered selection callback.
    pub fn click_node(&mut self, id: &str) {
        if let Some(callback) = self.select.as_mut() {
            callback(id);
        }
    }

    /// Fires the registered deselection callback.
    pub fn click_background(&mut self) {
        if let Some(callback) = self.deselect.as_mut() {
            callback();
        }
    }
}

impl RenderAdapter for RecordingAdapter {
    fn set_data(&mut self, nodes: &[Node], edges: &[Edge]) -> Result<()> {
        self.data_calls
            .push(nodes.iter().map(|n| n.id.clone()).collect());
        self.edge_counts.push(edges.len());
        Ok(())
    }

    fn fit(&mut self) {
        self.fit_calls += 1;
    }

    fn on_select(&mut self, callback: SelectCallback) {
        self.select = Some(callback);
    }

    fn on_deselect(&mut self, callback: DeselectCallback) {
        self.deselect = Some(callback);
    }

    fn disable_physics_on_stabilized(&mut self) {
        self.freeze_requested = true;
    }

    fn show_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}
