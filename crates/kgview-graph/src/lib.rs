//! Graph ingestion, view filtering, and interaction model for kgview.
//!
//! The pipeline runs leaf-first:
//!
//! 1. [`loader`] fetches the exported triples once (file or URL)
//! 2. [`normalize`] turns each triple into canonical nodes and an edge
//! 3. [`store`] accumulates them into a write-once [`GraphStore`]
//! 4. [`filter`] derives induced-subgraph [`View`]s by category or sampling
//! 5. [`stats`] and [`interaction`] read back from the store and current view
//!
//! [`App`] ties these together behind a [`RenderAdapter`], which is the only
//! place a drawing library is involved.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod adapter;
pub mod app;
pub mod filter;
pub mod interaction;
pub mod loader;
pub mod normalize;
pub mod raw;
pub mod stats;
pub mod store;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use adapter::{DeselectCallback, RenderAdapter, RenderEvent, SelectCallback};
pub use app::{App, ViewState};
pub use filter::{
    ViewFilter, by_category, by_sample_percent, by_sample_percent_with, full_view,
    induced_subgraph, sample_size,
};
pub use interaction::{
    DetailView, EdgeDirection, IncidentEdge, InteractionController, UNKNOWN_NODE_LABEL,
};
pub use loader::{DataSource, load_records, parse_records};
pub use normalize::Normalizer;
pub use raw::{RawEntity, RawRelation, RawTriple};
pub use stats::{Stats, compute_stats};
pub use store::{BuildStats, GraphBuilder, GraphStore, RecordWarning};
pub use types::{Edge, EdgeDetail, Node, NodeDetail, View};

// Re-export core types
pub use kgview_core::{Error, Result, ViewerConfig};
