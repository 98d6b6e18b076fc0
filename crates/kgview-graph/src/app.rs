//! Application controller.
//!
//! [`App`] is the single context object for a viewing session. It owns the
//! configuration, the render adapter, the sealed [`GraphStore`], the current
//! view, the selection detail, and the controls-visibility flag. Components
//! receive the store by reference; nothing is global.
//!
//! View state machine:
//!
//! ```text
//! Unloaded --load ok--> Full --filter--> Filtered --filter--> Filtered
//!     |
//!     +--load failed--> Unloaded (inert, error shown)
//! ```
//!
//! There is no way back to `Full`; a 100% sample shows the same sets.
//!
//! Filters always replace the current view; they never compose. A category
//! filter that matches nothing leaves the current view as it was. Every
//! successful filter clears the selection detail.

use crate::adapter::{RenderAdapter, RenderEvent};
use crate::filter::{ViewFilter, full_view};
use crate::interaction::{DetailView, InteractionController};
use crate::loader::{DataSource, load_records};
use crate::stats::{Stats, compute_stats};
use crate::store::{BuildStats, GraphBuilder, GraphStore};
use crate::types::View;
use kgview_core::{Error, Result, ViewerConfig};
use serde_json::Value;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

/// What the viewer is currently showing.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewState {
    /// No dataset loaded.
    Unloaded,
    /// The whole graph.
    Full(View),
    /// The result of the most recent filter.
    Filtered {
        /// The filter that produced `view`.
        filter: ViewFilter,
        /// The displayed subset.
        view: View,
    },
}

impl ViewState {
    /// The displayed view, if any.
    pub fn view(&self) -> Option<&View> {
        match self {
            Self::Unloaded => None,
            Self::Full(view) => Some(view),
            Self::Filtered { view, .. } => Some(view),
        }
    }
}

/// A viewing session bound to one render adapter.
pub struct App<A: RenderAdapter> {
    config: ViewerConfig,
    adapter: A,
    store: Option<GraphStore>,
    build_stats: Option<BuildStats>,
    state: ViewState,
    selection: Option<DetailView>,
    controls_visible: bool,
    fatal: Option<String>,
    events_tx: UnboundedSender<RenderEvent>,
    events_rx: UnboundedReceiver<RenderEvent>,
}

impl<A: RenderAdapter> App<A> {
    /// Creates a session and subscribes to the adapter's selection callbacks.
    pub fn new(config: ViewerConfig, mut adapter: A) -> Self {
        let (events_tx, events_rx) = unbounded_channel();

        let select_tx = events_tx.clone();
        adapter.on_select(Box::new(move |id: &str| {
            let _ = select_tx.send(RenderEvent::Selected(id.to_string()));
        }));
        let deselect_tx = events_tx.clone();
        adapter.on_deselect(Box::new(move || {
            let _ = deselect_tx.send(RenderEvent::Deselected);
        }));

        Self {
            config,
            adapter,
            store: None,
            build_stats: None,
            state: ViewState::Unloaded,
            selection: None,
            controls_visible: true,
            fatal: None,
            events_tx,
            events_rx,
        }
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Loads the configured dataset and shows the full graph.
    ///
    /// The source is fetched at most once per session. A loaded session
    /// returns its existing build statistics; an inert one returns
    /// [`Error::NotLoaded`] without touching the source.
    pub async fn load(&mut self) -> Result<&BuildStats> {
        if self.fatal.is_some() || self.store.is_some() {
            return self.already_loaded();
        }

        let loaded = match DataSource::from_config(&self.config.source) {
            Ok(source) => load_records(&source).await,
            Err(e) => Err(Error::fetch(&self.config.source.data, e.to_string())),
        };
        match loaded {
            Ok(records) => self.ingest(&records),
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Parses an export body and shows the full graph.
    pub fn load_str(&mut self, text: &str) -> Result<&BuildStats> {
        if self.fatal.is_some() || self.store.is_some() {
            return self.already_loaded();
        }

        match crate::loader::parse_records(text) {
            Ok(records) => self.ingest(&records),
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Builds the store from already-split records and shows the full graph.
    ///
    /// A session ingests at most once; later calls leave the store as it is.
    /// An empty record list is fatal, as for an empty export.
    pub fn ingest(&mut self, records: &[Value]) -> Result<&BuildStats> {
        if self.fatal.is_some() || self.store.is_some() {
            return self.already_loaded();
        }
        if records.is_empty() {
            return Err(self.fail(Error::malformed("empty array")));
        }

        let (store, stats) = GraphBuilder::from_config(&self.config).build(records);
        let view = full_view(&store);

        if let Err(e) = self.adapter.set_data(&view.nodes, &view.edges) {
            return Err(self.fail(e));
        }
        self.adapter.disable_physics_on_stabilized();

        if stats.records_rejected == stats.records_seen {
            let message = format!("所有 {} 条记录均无法解析，图为空。", stats.records_seen);
            log::warn!("{message}");
            self.adapter.notify(&message);
        }

        self.store = Some(store);
        self.build_stats = Some(stats);
        self.state = ViewState::Full(view);

        self.build_stats.as_ref().ok_or(Error::NotLoaded)
    }

    fn already_loaded(&self) -> Result<&BuildStats> {
        if let Some(message) = &self.fatal {
            log::warn!("Session is inert after a fatal error: {message}");
            return Err(Error::NotLoaded);
        }
        log::warn!("Dataset already loaded; ignoring second load");
        self.build_stats.as_ref().ok_or(Error::NotLoaded)
    }

    fn fail(&mut self, error: Error) -> Error {
        let message = format!("加载数据失败: {error}");
        log::error!("{message}");
        self.adapter.show_error(&message);
        if error.is_fatal() {
            self.fatal = Some(message);
        }
        error
    }

    // ========================================================================
    // User-facing operations
    // ========================================================================

    /// Shows a random `percent` sample of the nodes.
    pub fn show_percentage(&mut self, percent: f64) -> Result<&View> {
        self.apply(ViewFilter::SamplePercent(percent))?;
        self.state.view().ok_or(Error::NotLoaded)
    }

    /// Shows the nodes whose category display label is `display_label`.
    ///
    /// On no match the user is notified and the current view is kept.
    pub fn show_by_label(&mut self, display_label: &str) -> Result<&View> {
        log::debug!(
            "Filtering by category '{display_label}' (raw: '{}')",
            self.config.categories.raw_for_display(display_label)
        );
        if let Err(e) = self.apply(ViewFilter::Category(display_label.to_string())) {
            if let Error::NoMatch { label } = &e {
                let message = format!("没有找到类型为 \"{label}\" 的节点。");
                log::warn!("{message}");
                self.adapter.notify(&message);
            }
            return Err(e);
        }
        self.state.view().ok_or(Error::NotLoaded)
    }

    fn apply(&mut self, filter: ViewFilter) -> Result<()> {
        let store = self.store.as_ref().ok_or(Error::NotLoaded)?;
        let view = filter.apply(store)?;

        log::info!(
            "Showing {filter:?}: {} nodes, {} edges",
            view.node_count(),
            view.edge_count()
        );

        self.adapter.set_data(&view.nodes, &view.edges)?;
        self.adapter.fit();
        self.selection = None;
        self.state = ViewState::Filtered { filter, view };
        Ok(())
    }

    /// Fits the viewport to the displayed graph.
    pub fn fit_to_screen(&mut self) {
        if self.store.is_some() {
            self.adapter.fit();
        }
    }

    /// Flips controls visibility and returns the new value.
    pub fn toggle_controls(&mut self) -> bool {
        self.controls_visible = !self.controls_visible;
        self.controls_visible
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Selects a node and returns its detail, or `None` for an unknown id.
    pub fn select_node(&mut self, id: &str) -> Option<&DetailView> {
        let store = self.store.as_ref()?;
        if let Some(previous) = &self.selection {
            if previous.node.id != id {
                log::debug!("Selection moved from {} to {id}", previous.node.id);
            }
        }
        self.selection = InteractionController::new(store).on_node_selected(id);
        self.selection.as_ref()
    }

    /// Clears the selection detail.
    pub fn deselect_node(&mut self) {
        if let Some(store) = self.store.as_ref() {
            InteractionController::new(store).on_node_deselected();
        }
        self.selection = None;
    }

    /// Applies one adapter event.
    pub fn handle_event(&mut self, event: RenderEvent) {
        match event {
            RenderEvent::Selected(id) => {
                self.select_node(&id);
            }
            RenderEvent::Deselected => self.deselect_node(),
        }
    }

    /// Applies every adapter event queued so far; returns how many.
    pub fn pump_events(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    /// A sender that injects events as if they came from the adapter.
    pub fn event_sender(&self) -> UnboundedSender<RenderEvent> {
        self.events_tx.clone()
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Statistics for the store and the displayed view.
    pub fn stats(&self) -> Result<Stats> {
        let store = self.store.as_ref().ok_or(Error::NotLoaded)?;
        let view = self.state.view().ok_or(Error::NotLoaded)?;
        Ok(compute_stats(store, &view.nodes, &view.edges))
    }

    /// The current view state.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// The displayed view, if loaded.
    pub fn current_view(&self) -> Option<&View> {
        self.state.view()
    }

    /// The sealed store, if loaded.
    pub fn store(&self) -> Option<&GraphStore> {
        self.store.as_ref()
    }

    /// Statistics from the ingestion pass, if loaded.
    pub fn build_stats(&self) -> Option<&BuildStats> {
        self.build_stats.as_ref()
    }

    /// The selection detail, if a node is selected.
    pub fn selection(&self) -> Option<&DetailView> {
        self.selection.as_ref()
    }

    /// Whether the controls panel is visible.
    pub fn controls_visible(&self) -> bool {
        self.controls_visible
    }

    /// The fatal error message, if loading failed.
    pub fn fatal_error(&self) -> Option<&str> {
        self.fatal.as_deref()
    }

    /// The session configuration.
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// The render adapter.
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// The render adapter, mutably.
    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }
}

// ============================================================================
// Tests
// ============================================================================
