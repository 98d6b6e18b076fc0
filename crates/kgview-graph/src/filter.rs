//! View filtering.
//!
//! Both filter modes select a node set and then take the induced subgraph:
//! an edge is kept only when both of its endpoints were selected. Results
//! list nodes and edges in store order and never modify the store.

use crate::store::GraphStore;
use crate::types::View;
use kgview_core::{Error, Result};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use std::collections::HashSet;

/// Lowest accepted sampling percentage after clamping.
pub const MIN_PERCENT: f64 = 1.0;

/// Highest accepted sampling percentage after clamping.
pub const MAX_PERCENT: f64 = 100.0;

/// A request for a subset of the graph.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewFilter {
    /// Nodes whose resolved category display label matches exactly.
    Category(String),
    /// A uniform random sample of the given percentage of nodes.
    SamplePercent(f64),
}

impl ViewFilter {
    /// Computes the view this filter selects.
    pub fn apply(&self, store: &GraphStore) -> Result<View> {
        match self {
            Self::Category(label) => by_category(store, label),
            Self::SamplePercent(percent) => by_sample_percent(store, *percent),
        }
    }
}

/// The whole graph as a view.
pub fn full_view(store: &GraphStore) -> View {
    View {
        nodes: store.nodes().cloned().collect(),
        edges: store.edges().to_vec(),
    }
}

/// The induced subgraph on `selected`.
pub fn induced_subgraph(store: &GraphStore, selected: &HashSet<&str>) -> View {
    let nodes = store
        .nodes()
        .filter(|node| selected.contains(node.id.as_str()))
        .cloned()
        .collect();
    let edges = store
        .edges()
        .iter()
        .filter(|edge| selected.contains(edge.from.as_str()) && selected.contains(edge.to.as_str()))
        .cloned()
        .collect();
    View { nodes, edges }
}

/// Every node whose category display label equals `display_label`.
///
/// The match is exact and case-sensitive. An empty selection is reported as
/// [`Error::NoMatch`] so the caller can keep its current view.
pub fn by_category(store: &GraphStore, display_label: &str) -> Result<View> {
    let selected: HashSet<&str> = store
        .nodes()
        .filter(|node| node.category == display_label)
        .map(|node| node.id.as_str())
        .collect();

    if selected.is_empty() {
        return Err(Error::no_match(display_label));
    }

    Ok(induced_subgraph(store, &selected))
}

/// Number of nodes to draw for `percent` of `total`.
///
/// `percent` is clamped to `[1, 100]`; at least one node is drawn from a
/// non-empty store.
pub fn sample_size(percent: f64, total: usize) -> Result<usize> {
    if !percent.is_finite() {
        return Err(Error::InvalidPercent(percent));
    }
    if total == 0 {
        return Ok(0);
    }
    let percent = percent.clamp(MIN_PERCENT, MAX_PERCENT);
    let count = (percent / 100.0 * total as f64).floor() as usize;
    Ok(count.clamp(1, total))
}

/// A uniform random sample of `percent` of the nodes, reshuffled per call.
pub fn by_sample_percent(store: &GraphStore, percent: f64) -> Result<View> {
    by_sample_percent_with(store, percent, &mut rand::thread_rng())
}

/// [`by_sample_percent`] with an explicit random source.
pub fn by_sample_percent_with<R: Rng + ?Sized>(
    store: &GraphStore,
    percent: f64,
    rng: &mut R,
) -> Result<View> {
    let count = sample_size(percent, store.node_count())?;

    let mut ids: Vec<&str> = store.ordered_ids().iter().map(String::as_str).collect();
    ids.shuffle(rng);
    ids.truncate(count);

    let selected: HashSet<&str> = ids.into_iter().collect();
    Ok(induced_subgraph(store, &selected))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{build_store, triple};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use serde_json::Value;

    fn campus() -> GraphStore {
        build_store(&[
            triple("a1", "人才", "Alice", "毕业于", "b1", "高校", "MIT"),
            triple("a2", "人才", "Bob", "毕业于", "b2", "高校", "CMU"),
            triple("a1", "人才", "Alice", "认识", "a2", "人才", "Bob"),
            triple("b1", "高校", "MIT", "合作", "b2", "高校", "CMU"),
            triple("a2", "人才", "Bob", "就职于", "c1", "单位", "Lab"),
        ])
        .0
    }

    // ------------------------------------------------------------------------
    // Category filter
    // ------------------------------------------------------------------------

    #[test]
    fn test_by_category_induced_subgraph() {
        let store = campus();
        let view = by_category(&store, "人才").unwrap();
        assert_eq!(view.node_ids().collect::<Vec<_>>(), vec!["a1", "a2"]);
        assert_eq!(view.edge_count(), 1);
        assert_eq!(view.edges[0].relation_label, "认识");
    }

    #[test]
    fn test_by_category_is_exact() {
        let store = campus();
        assert!(matches!(by_category(&store, "人"), Err(Error::NoMatch { .. })));
        assert!(matches!(by_category(&store, "人才 "), Err(Error::NoMatch { .. })));
        assert!(by_category(&store, "单位").is_ok());
    }

    #[test]
    fn test_by_category_no_match() {
        let store = campus();
        match by_category(&store, "地区") {
            Err(Error::NoMatch { label }) => assert_eq!(label, "地区"),
            other => panic!("expected NoMatch, got {other:?}"),
        }
    }

    #[test]
    fn test_end_to_end_example() {
        let (store, _) = build_store(&[triple(
            "a1", "人才", "Alice", "毕业于", "b1", "高校", "MIT",
        )]);
        let view = by_category(&store, "人才").unwrap();
        assert_eq!(view.node_ids().collect::<Vec<_>>(), vec!["a1"]);
        assert!(view.edges.is_empty());

        let view = by_sample_percent(&store, 100.0).unwrap();
        assert_eq!(view.node_count(), 2);
        assert_eq!(view.edge_count(), 1);
    }

    #[test]
    fn test_filter_apply_dispatch() {
        let store = campus();
        let view = ViewFilter::Category("高校".to_string()).apply(&store).unwrap();
        assert_eq!(view.node_count(), 2);
        let view = ViewFilter::SamplePercent(100.0).apply(&store).unwrap();
        assert_eq!(view, full_view(&store));
    }

    // ------------------------------------------------------------------------
    // Sampling
    // ------------------------------------------------------------------------

    #[test]
    fn test_sample_size_rules() {
        assert_eq!(sample_size(50.0, 10).unwrap(), 5);
        assert_eq!(sample_size(10.0, 5).unwrap(), 1);
        assert_eq!(sample_size(0.0, 10).unwrap(), 1);
        assert_eq!(sample_size(-20.0, 10).unwrap(), 1);
        assert_eq!(sample_size(250.0, 10).unwrap(), 10);
        assert_eq!(sample_size(100.0, 7).unwrap(), 7);
        assert_eq!(sample_size(33.0, 7).unwrap(), 2);
        assert_eq!(sample_size(50.0, 0).unwrap(), 0);
        assert!(matches!(sample_size(f64::NAN, 10), Err(Error::InvalidPercent(_))));
        assert!(sample_size(f64::INFINITY, 10).is_err());
    }

    #[test]
    fn test_sample_full_is_whole_graph() {
        let store = campus();
        let view = by_sample_percent(&store, 100.0).unwrap();
        assert_eq!(view, full_view(&store));
    }

    #[test]
    fn test_sample_empty_store() {
        let store = GraphStore::new();
        let view = by_sample_percent(&store, 50.0).unwrap();
        assert!(view.is_empty());
        assert!(view.edges.is_empty());
    }

    #[test]
    fn test_sample_keeps_store_order() {
        let store = campus();
        let mut rng = StdRng::seed_from_u64(7);
        let view = by_sample_percent_with(&store, 60.0, &mut rng).unwrap();
        let positions: Vec<usize> = view
            .node_ids()
            .map(|id| store.ordered_ids().iter().position(|o| o == id).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    // ------------------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------------------

    const CATEGORIES: [&str; 3] = ["人才", "高校", "单位"];

    fn records() -> impl Strategy<Value = Vec<Value>> {
        prop::collection::vec((0u8..15, 0u8..3, 0u8..15, 0u8..3), 1..50).prop_map(|rows| {
            rows.into_iter()
                .map(|(s, sc, t, tc)| {
                    triple(
                        &format!("n{s}"),
                        CATEGORIES[sc as usize],
                        &format!("N{s}"),
                        "rel",
                        &format!("n{t}"),
                        CATEGORIES[tc as usize],
                        &format!("N{t}"),
                    )
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn test_category_filter_selects_exactly_matching(records in records(), pick in 0usize..3) {
            let (store, _) = build_store(&records);
            let label = CATEGORIES[pick];
            let expected: HashSet<&str> = store
                .nodes()
                .filter(|n| n.category == label)
                .map(|n| n.id.as_str())
                .collect();

            match by_category(&store, label) {
                Ok(view) => {
                    let got: HashSet<&str> = view.node_ids().collect();
                    prop_assert_eq!(&got, &expected);
                    for edge in &view.edges {
                        prop_assert!(got.contains(edge.from.as_str()));
                        prop_assert!(got.contains(edge.to.as_str()));
                    }
                    let induced = store
                        .edges()
                        .iter()
                        .filter(|e| got.contains(e.from.as_str()) && got.contains(e.to.as_str()))
                        .count();
                    prop_assert_eq!(view.edge_count(), induced);
                }
                Err(Error::NoMatch { .. }) => prop_assert!(expected.is_empty()),
                Err(other) => prop_assert!(false, "unexpected error {other:?}"),
            }
        }

        #[test]
        fn test_sampling_bounds(records in records(), percent in -50.0f64..200.0, seed in any::<u64>()) {
            let (store, _) = build_store(&records);
            let total = store.node_count();
            let mut rng = StdRng::seed_from_u64(seed);
            let view = by_sample_percent_with(&store, percent, &mut rng).unwrap();

            let clamped = percent.clamp(1.0, 100.0);
            let expected = ((clamped / 100.0 * total as f64).floor() as usize).max(1);
            prop_assert_eq!(view.node_count(), expected);
            prop_assert!(view.node_count() <= total);

            let ids: HashSet<&str> = view.node_ids().collect();
            prop_assert_eq!(ids.len(), view.node_count());
            for edge in &view.edges {
                prop_assert!(ids.contains(edge.from.as_str()) && ids.contains(edge.to.as_str()));
            }
        }
    }
}
