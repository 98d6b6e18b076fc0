//! Command implementations.
//!
//! Each command opens a session, drives it through the same operations an
//! interactive front end would use, and renders the result as text.

use crate::adapters::{ConsoleAdapter, JsonExportAdapter};
use crate::cli::{Args, Command};
use crate::config_handlers::handle_config_command;
use kgview_core::{Error, Result, ViewerConfig};
use kgview_graph::{App, DetailView, EdgeDirection, RenderAdapter, Stats, View};
use std::fmt::Write as _;
use std::path::Path;

/// Loads configuration, applying the `--data` override.
pub fn load_config(config_path: Option<&str>, data: Option<&str>) -> Result<ViewerConfig> {
    let mut config = ViewerConfig::load(config_path)?;
    if let Some(data) = data {
        config.source.data = data.to_string();
    }
    Ok(config)
}

/// Opens a session and loads its dataset.
pub async fn open<A: RenderAdapter>(config: ViewerConfig, adapter: A) -> Result<App<A>> {
    let mut app = App::new(config, adapter);
    let build = app.load().await?;
    if build.records_rejected > 0 {
        log::warn!(
            "{} of {} records were skipped",
            build.records_rejected,
            build.records_seen
        );
    }
    Ok(app)
}

/// Runs a parsed command line.
pub async fn run(args: Args) -> anyhow::Result<()> {
    let config_path = args.config.as_deref();

    match args.command {
        Command::Config { action } => handle_config_command(config_path, action)?,
        Command::Info => {
            let config = load_config(config_path, args.data.as_deref())?;
            let app = open(config, ConsoleAdapter::new()).await?;
            print!("{}", format_stats(&app.stats()?));
        }
        Command::Category { label } => {
            let config = load_config(config_path, args.data.as_deref())?;
            let mut app = open(config, ConsoleAdapter::new()).await?;
            print!("{}", format_view(app.show_by_label(&label)?));
        }
        Command::Sample { percent } => {
            let config = load_config(config_path, args.data.as_deref())?;
            let mut app = open(config, ConsoleAdapter::new()).await?;
            print!("{}", format_view(app.show_percentage(percent)?));
        }
        Command::Node { id } => {
            let config = load_config(config_path, args.data.as_deref())?;
            let mut app = open(config, ConsoleAdapter::new()).await?;
            match select(&mut app, &id) {
                Some(detail) => print!("{}", format_detail(detail)),
                None => return Err(Error::lookup_miss(id).into()),
            }
        }
        Command::Export {
            out,
            category,
            percent,
        } => {
            let config = load_config(config_path, args.data.as_deref())?;
            export(config, category.as_deref(), percent, Path::new(&out)).await?;
        }
    }
    Ok(())
}

/// Selects `id` through the adapter's callback path.
pub fn select<'a>(app: &'a mut App<ConsoleAdapter>, id: &str) -> Option<&'a DetailView> {
    app.adapter_mut().select(id);
    app.pump_events();
    app.selection()
}

/// Loads, optionally filters, and writes a vis-network document to `out`.
pub async fn export(
    config: ViewerConfig,
    category: Option<&str>,
    percent: Option<f64>,
    out: &Path,
) -> Result<View> {
    let layout = config.layout.clone();
    let mut app = open(config, JsonExportAdapter::new(layout)).await?;

    let view = match (category, percent) {
        (Some(label), _) => app.show_by_label(label)?.clone(),
        (None, Some(percent)) => app.show_percentage(percent)?.clone(),
        (None, None) => app.current_view().cloned().ok_or(Error::NotLoaded)?,
    };

    app.adapter().write_to(out)?;
    Ok(view)
}

// ============================================================================
// Rendering
// ============================================================================

/// Renders statistics as an aligned text block.
pub fn format_stats(stats: &Stats) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Nodes: {} shown / {} total",
        stats.current_node_count, stats.total_nodes
    );
    let _ = writeln!(
        out,
        "Edges: {} shown / {} total",
        stats.current_edge_count, stats.total_edges
    );
    let _ = writeln!(out, "Categories:");
    let width = stats
        .category_histogram
        .keys()
        .map(|label| display_label(label).chars().count())
        .max()
        .unwrap_or(0);
    for (label, count) in stats.categories_by_count() {
        let label = display_label(label);
        let pad = width.saturating_sub(label.chars().count());
        let _ = writeln!(out, "  {label}{}  {count}", " ".repeat(pad));
    }
    out
}

fn display_label(label: &str) -> &str {
    if label.is_empty() { "(none)" } else { label }
}

/// Renders a view as one line per node followed by one line per edge.
pub fn format_view(view: &View) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} nodes, {} edges", view.node_count(), view.edge_count());
    for node in &view.nodes {
        let _ = writeln!(
            out,
            "  {}  {}  [{}]",
            node.id,
            node.label,
            display_label(&node.category)
        );
    }
    for edge in &view.edges {
        let _ = writeln!(out, "  {} -[{}]-> {}", edge.from, edge.relation_label, edge.to);
    }
    out
}

/// Renders the detail panel for a selected node.
pub fn format_detail(detail: &DetailView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", detail.node.label);
    let _ = writeln!(out, "{}", detail.node.tooltip());
    if !detail.incident.is_empty() {
        let _ = writeln!(out, "Edges:");
    }
    for edge in &detail.incident {
        let arrow = match edge.direction {
            EdgeDirection::Outgoing => "->",
            EdgeDirection::Incoming => "<-",
            EdgeDirection::SelfLoop => "<->",
        };
        let _ = writeln!(
            out,
            "  {arrow} [{}] {} ({})",
            edge.relation_label, edge.other_label, edge.other_id
        );
    }
    out
}
