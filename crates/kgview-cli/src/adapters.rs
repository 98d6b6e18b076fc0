//! Render adapters for the command line.
//!
//! [`ConsoleAdapter`] stands in for an interactive canvas: it reports what
//! would be drawn and lets commands fire selection events. [`JsonExportAdapter`]
//! captures the node/edge sets as a vis-network document that a browser page
//! can load directly.

use kgview_core::{Error, LayoutConfig, Result};
use kgview_graph::{DeselectCallback, Edge, Node, RenderAdapter, SelectCallback};
use serde_json::{Value, json};
use std::path::Path;

// ============================================================================
// ConsoleAdapter
// ============================================================================

/// Reports draw calls through the log and forwards selections.
#[derive(Default)]
pub struct ConsoleAdapter {
    displayed: (usize, usize),
    select: Option<SelectCallback>,
    deselect: Option<DeselectCallback>,
}

impl ConsoleAdapter {
    /// Creates an adapter with nothing displayed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Node and edge counts of the last `set_data` call.
    pub fn displayed(&self) -> (usize, usize) {
        self.displayed
    }

    /// Selects a node as if the user clicked it.
    pub fn select(&mut self, id: &str) {
        if let Some(callback) = self.select.as_mut() {
            callback(id);
        }
    }

    /// Clears the selection as if the user clicked the background.
    pub fn clear_selection(&mut self) {
        if let Some(callback) = self.deselect.as_mut() {
            callback();
        }
    }
}

impl RenderAdapter for ConsoleAdapter {
    fn set_data(&mut self, nodes: &[Node], edges: &[Edge]) -> Result<()> {
        self.displayed = (nodes.len(), edges.len());
        log::info!("Displaying {} nodes, {} edges", nodes.len(), edges.len());
        Ok(())
    }

    fn fit(&mut self) {
        log::debug!("Fit to screen");
    }

    fn on_select(&mut self, callback: SelectCallback) {
        self.select = Some(callback);
    }

    fn on_deselect(&mut self, callback: DeselectCallback) {
        self.deselect = Some(callback);
    }

    fn disable_physics_on_stabilized(&mut self) {
        log::debug!("Layout will freeze after stabilization");
    }

    fn show_error(&mut self, message: &str) {
        eprintln!("error: {message}");
    }

    fn notify(&mut self, message: &str) {
        eprintln!("{message}");
    }
}

// ============================================================================
// JsonExportAdapter
// ============================================================================

/// Captures the displayed graph as a vis-network JSON document.
pub struct JsonExportAdapter {
    layout: LayoutConfig,
    nodes: Vec<Value>,
    edges: Vec<Value>,
    fit: bool,
    freeze_on_stabilized: bool,
}

impl JsonExportAdapter {
    /// Creates an adapter that embeds `layout` in the exported options.
    pub fn new(layout: LayoutConfig) -> Self {
        Self {
            layout,
            nodes: Vec::new(),
            edges: Vec::new(),
            fit: false,
            freeze_on_stabilized: false,
        }
    }

    /// The document for the current node/edge sets.
    pub fn document(&self) -> Value {
        json!({
            "nodes": self.nodes,
            "edges": self.edges,
            "options": {
                "physics": {
                    "enabled": true,
                    "solver": self.layout.solver,
                    "forceAtlas2Based": {
                        "gravitationalConstant": self.layout.gravitational_constant,
                        "springLength": self.layout.spring_length,
                        "centralGravity": self.layout.central_gravity,
                        "damping": self.layout.damping,
                        "avoidOverlap": self.layout.avoid_overlap,
                    },
                    "stabilization": {
                        "enabled": true,
                        "iterations": self.layout.stabilization_iterations,
                        "updateInterval": self.layout.update_interval,
                    },
                },
                "interaction": {
                    "hover": true,
                    "tooltipDelay": 200,
                },
            },
            "view": {
                "fit": self.fit,
                "disablePhysicsOnStabilized": self.freeze_on_stabilized,
            },
        })
    }

    /// Writes [`document`](Self::document) to `path` as pretty JSON.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(&self.document())?;
        std::fs::write(path, text).map_err(|e| Error::io_with_path(e, path))?;
        log::info!(
            "Wrote {} nodes, {} edges to {}",
            self.nodes.len(),
            self.edges.len(),
            path.display()
        );
        Ok(())
    }
}

impl RenderAdapter for JsonExportAdapter {
    fn set_data(&mut self, nodes: &[Node], edges: &[Edge]) -> Result<()> {
        self.nodes = nodes
            .iter()
            .map(|node| {
                json!({
                    "id": node.id,
                    "label": node.label,
                    "color": node.color,
                    "group": node.category,
                    "title": node.tooltip(),
                })
            })
            .collect();
        self.edges = edges
            .iter()
            .map(|edge| {
                json!({
                    "from": edge.from,
                    "to": edge.to,
                    "label": edge.relation_label,
                    "arrows": "to",
                    "title": edge.tooltip(),
                })
            })
            .collect();
        self.fit = false;
        Ok(())
    }

    fn fit(&mut self) {
        self.fit = true;
    }

    fn on_select(&mut self, _callback: SelectCallback) {
        log::debug!("Export adapter has no interactive selection");
    }

    fn on_deselect(&mut self, _callback: DeselectCallback) {}

    fn disable_physics_on_stabilized(&mut self) {
        self.freeze_on_stabilized = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kgview_graph::mock::{build_store, triple};
    use kgview_graph::full_view;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_export_document_shape() {
        let (store, _) = build_store(&[triple("a1", "人才", "Alice", "毕业于", "b1", "高校", "MIT")]);
        let view = full_view(&store);

        let mut adapter = JsonExportAdapter::new(LayoutConfig::default());
        adapter.set_data(&view.nodes, &view.edges).unwrap();
        adapter.disable_physics_on_stabilized();
        let doc = adapter.document();

        assert_eq!(doc["nodes"].as_array().unwrap().len(), 2);
        assert_eq!(doc["nodes"][0]["id"], "a1");
        assert_eq!(doc["nodes"][0]["label"], "Alice");
        assert_eq!(doc["nodes"][0]["color"], "#CCCCCC");
        assert!(doc["nodes"][0]["title"].as_str().unwrap().starts_with("ID: a1"));
        assert_eq!(doc["edges"][0]["arrows"], "to");
        assert_eq!(doc["edges"][0]["label"], "毕业于");
        assert_eq!(doc["options"]["physics"]["solver"], "forceAtlas2Based");
        assert_eq!(doc["options"]["physics"]["stabilization"]["iterations"], 1500);
        assert_eq!(doc["view"]["disablePhysicsOnStabilized"], true);
        assert_eq!(doc["view"]["fit"], false);
    }

    #[test]
    fn test_export_fit_resets_on_new_data() {
        let mut adapter = JsonExportAdapter::new(LayoutConfig::default());
        adapter.fit();
        assert_eq!(adapter.document()["view"]["fit"], true);
        adapter.set_data(&[], &[]).unwrap();
        assert_eq!(adapter.document()["view"]["fit"], false);
    }

    #[test]
    fn test_console_adapter_forwards_selection() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut adapter = ConsoleAdapter::new();
        let sink = Arc::clone(&seen);
        adapter.on_select(Box::new(move |id: &str| {
            sink.lock().unwrap().push(id.to_string());
        }));

        adapter.select("a1");
        adapter.clear_selection();
        assert_eq!(*seen.lock().unwrap(), vec!["a1".to_string()]);
    }

    #[test]
    fn test_console_adapter_counts() {
        let (store, _) = build_store(&[triple("a1", "人才", "Alice", "毕业于", "b1", "高校", "MIT")]);
        let view = full_view(&store);
        let mut adapter = ConsoleAdapter::new();
        adapter.set_data(&view.nodes, &view.edges).unwrap();
        assert_eq!(adapter.displayed(), (2, 1));
    }
}
