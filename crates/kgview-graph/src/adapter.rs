//! The render adapter boundary.
//!
//! Drawing and force-directed layout are delegated to whatever implements
//! [`RenderAdapter`]. kgview pushes node/edge sets into it and receives
//! selection callbacks back; it never reaches into layout state.
//!
//! Selection follows a single-selection model: `on_select` fires at most once
//! per user action, and a deselect is expected before another node is
//! selected. [`App`](crate::App) tolerates a missing deselect by treating the
//! second selection as replacing the first.

use crate::types::{Edge, Node};
use kgview_core::Result;

/// Callback invoked with the id of a node the user selected.
pub type SelectCallback = Box<dyn FnMut(&str) + Send>;

/// Callback invoked when the user clears the selection.
pub type DeselectCallback = Box<dyn FnMut() + Send>;

/// Events forwarded from adapter callbacks to the application controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderEvent {
    /// A node was selected.
    Selected(String),
    /// The selection was cleared.
    Deselected,
}

/// A drawing surface for a node/edge set.
pub trait RenderAdapter {
    /// Replaces the displayed node and edge sets and restarts the layout.
    fn set_data(&mut self, nodes: &[Node], edges: &[Edge]) -> Result<()>;

    /// Fits the viewport to the displayed graph.
    fn fit(&mut self);

    /// Registers the node-selection callback, replacing any previous one.
    fn on_select(&mut self, callback: SelectCallback);

    /// Registers the deselection callback, replacing any previous one.
    fn on_deselect(&mut self, callback: DeselectCallback);

    /// Freezes the layout once it has stabilized.
    fn disable_physics_on_stabilized(&mut self);

    /// Replaces the graph area with a fatal error message.
    fn show_error(&mut self, message: &str) {
        log::error!("{message}");
    }

    /// Shows a transient notice to the user.
    fn notify(&mut self, message: &str) {
        log::warn!("{message}");
    }
}
