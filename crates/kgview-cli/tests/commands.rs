//! End-to-end tests: write an export to disk, open it, and drive commands.

use kgview_cli::commands::{export, format_detail, format_view, open, select};
use kgview_cli::{ConsoleAdapter, JsonExportAdapter};
use kgview_core::{Error, LayoutConfig, ViewerConfig};
use kgview_graph::mock::triple;
use serde_json::{Value, json};
use std::path::Path;
use tempfile::{TempDir, tempdir};

fn write_dataset(dir: &TempDir, records: &Value) -> ViewerConfig {
    let path = dir.path().join("data.json");
    std::fs::write(&path, serde_json::to_string(records).unwrap()).unwrap();
    let mut config = ViewerConfig::default();
    config.source.data = path.to_string_lossy().into_owned();
    config
}

fn campus() -> Value {
    json!([
        triple("a1", "人才", "Alice", "毕业于", "b1", "高校", "MIT"),
        triple("a2", "人才", "Bob", "毕业于", "b2", "高校", "CMU"),
        triple("a1", "人才", "Alice", "认识", "a2", "人才", "Bob"),
        triple("a2", "人才", "Bob", "就职于", "c1", "单位", "Lab"),
    ])
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[tokio::test]
async fn test_single_triple_walkthrough() {
    let dir = tempdir().unwrap();
    let config = write_dataset(
        &dir,
        &json!([triple("a1", "人才", "Alice", "毕业于", "b1", "高校", "MIT")]),
    );
    let mut app = open(config, ConsoleAdapter::new()).await.unwrap();

    assert_eq!(app.adapter().displayed(), (2, 1));

    let view = app.show_by_label("人才").unwrap();
    assert_eq!(view.node_ids().collect::<Vec<_>>(), vec!["a1"]);
    assert_eq!(view.edge_count(), 0);

    let view = app.show_percentage(100.0).unwrap();
    assert_eq!(view.node_count(), 2);
    assert_eq!(view.edge_count(), 1);

    let stats = app.stats().unwrap();
    assert_eq!(stats.category_histogram["人才"], 1);
    assert_eq!(stats.category_histogram["高校"], 1);
}

#[tokio::test]
async fn test_node_detail_through_adapter() {
    let dir = tempdir().unwrap();
    let config = write_dataset(&dir, &campus());
    let mut app = open(config, ConsoleAdapter::new()).await.unwrap();

    let detail = select(&mut app, "a2").unwrap();
    let text = format_detail(detail);
    assert!(text.starts_with("Bob\nID: a2\n类型: 人才\n"));
    assert!(text.contains("  -> [毕业于] CMU (b2)"));
    assert!(text.contains("  <- [认识] Alice (a1)"));
    assert!(text.contains("  -> [就职于] Lab (c1)"));

    assert!(select(&mut app, "zz").is_none());
}

#[tokio::test]
async fn test_category_view_output() {
    let dir = tempdir().unwrap();
    let config = write_dataset(&dir, &campus());
    let mut app = open(config, ConsoleAdapter::new()).await.unwrap();

    let text = format_view(app.show_by_label("高校").unwrap());
    assert!(text.starts_with("2 nodes, 0 edges\n"));
    assert!(text.contains("b1  MIT  [高校]"));
    assert!(text.contains("b2  CMU  [高校]"));
}

#[tokio::test]
async fn test_no_match_keeps_previous_view() {
    let dir = tempdir().unwrap();
    let config = write_dataset(&dir, &campus());
    let mut app = open(config, ConsoleAdapter::new()).await.unwrap();
    app.show_by_label("单位").unwrap();

    let err = app.show_by_label("地区").unwrap_err();
    assert!(matches!(err, Error::NoMatch { .. }));
    assert_eq!(app.current_view().unwrap().node_count(), 1);
    assert_eq!(app.adapter().displayed(), (1, 0));
}

#[tokio::test]
async fn test_export_category() {
    let dir = tempdir().unwrap();
    let config = write_dataset(&dir, &campus());
    let out = dir.path().join("graph.json");

    let view = export(config, Some("人才"), None, &out).await.unwrap();
    assert_eq!(view.node_count(), 2);

    let doc = read_json(&out);
    let ids: Vec<&str> = doc["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["a1", "a2"]);
    assert_eq!(doc["edges"].as_array().unwrap().len(), 1);
    assert_eq!(doc["edges"][0]["label"], "认识");
    assert_eq!(doc["view"]["fit"], true);
    assert_eq!(doc["view"]["disablePhysicsOnStabilized"], true);
}

#[tokio::test]
async fn test_export_full_graph() {
    let dir = tempdir().unwrap();
    let config = write_dataset(&dir, &campus());
    let out = dir.path().join("graph.json");

    export(config, None, None, &out).await.unwrap();
    let doc = read_json(&out);
    assert_eq!(doc["nodes"].as_array().unwrap().len(), 5);
    assert_eq!(doc["edges"].as_array().unwrap().len(), 4);
    assert_eq!(doc["view"]["fit"], false);
}

#[tokio::test]
async fn test_export_sample_floor() {
    let dir = tempdir().unwrap();
    let config = write_dataset(&dir, &campus());
    let out = dir.path().join("graph.json");

    let view = export(config, None, Some(0.0), &out).await.unwrap();
    assert_eq!(view.node_count(), 1);
    assert_eq!(read_json(&out)["nodes"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_open_rejects_non_array() {
    let dir = tempdir().unwrap();
    let config = write_dataset(&dir, &json!({"n": {}}));
    let result = open(config, JsonExportAdapter::new(LayoutConfig::default())).await;
    assert!(matches!(result, Err(Error::MalformedInput(_))));
}

#[tokio::test]
async fn test_open_skips_bad_records() {
    let dir = tempdir().unwrap();
    let config = write_dataset(
        &dir,
        &json!([
            triple("a1", "人才", "Alice", "毕业于", "b1", "高校", "MIT"),
            {"n": {"elementId": "x"}},
            "not a record",
        ]),
    );
    let app = open(config, ConsoleAdapter::new()).await.unwrap();
    let build = app.build_stats().unwrap();
    assert_eq!(build.records_seen, 3);
    assert_eq!(build.records_rejected, 2);
    assert_eq!(app.store().unwrap().node_count(), 2);
}

#[tokio::test]
async fn test_category_colors_from_config() {
    let dir = tempdir().unwrap();
    let config = write_dataset(
        &dir,
        &json!([triple("p1", "姓名", "张三", "就职于", "u1", "单位", "研究所")]),
    );
    let out = dir.path().join("graph.json");
    export(config, None, None, &out).await.unwrap();

    let doc = read_json(&out);
    assert_eq!(doc["nodes"][0]["color"], "#FF9999");
    assert_eq!(doc["nodes"][1]["color"], "#FFCC99");
    assert_eq!(doc["edges"][0]["label"], "就职于");
}
