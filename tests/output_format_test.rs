//! Tests for the persisted JSON document.
//!
//! The document must be a plain `{"files": [...], "summary": {...}}` mapping
//! that deserializes back into the same run.

use std::path::PathBuf;

use codeinventory::report;
use codeinventory::{Config, ProjectRun, Runner};

fn run_sample() -> ProjectRun {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata/sample_project");
    Runner::new(Config::default())
        .run(&root)
        .expect("run should succeed")
}

#[test]
fn test_json_top_level_keys() {
    let json = report::render_json(&run_sample()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys.len(), 2);
    assert!(value["files"].is_array());
    assert!(value["summary"].is_object());
}

#[test]
fn test_json_file_fields() {
    let json = report::render_json(&run_sample()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let java = value["files"]
        .as_array()
        .unwrap()
        .iter()
        .find(|f| f["path"] == "java/UserService.java")
        .expect("java file present");

    for key in [
        "path",
        "language",
        "size_bytes",
        "line_count",
        "comment_count",
        "comment_ratio",
        "elements",
        "imports",
        "classes",
        "functions",
        "summary",
    ] {
        assert!(java.get(key).is_some(), "missing file field {}", key);
    }
    assert_eq!(java["language"], "Java");
    assert_eq!(java["comment_ratio"], 0.16);

    let class = java["elements"]
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["kind"] == "class")
        .unwrap();
    assert_eq!(class["name"], "UserService");
    assert_eq!(class["line"], 9);
    assert_eq!(class["extends"], "BaseService");
    assert_eq!(class["implements"], serde_json::json!(["Service"]));
    // absent attributes are omitted, not null
    assert!(class.get("bases").is_none());
    assert!(class.get("params").is_none());

    let package = java["elements"]
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["kind"] == "package")
        .unwrap();
    assert_eq!(package["name"], "com.example.users");
}

#[test]
fn test_json_summary_fields() {
    let json = report::render_json(&run_sample()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let summary = &value["summary"];

    for key in [
        "file_count",
        "total_lines",
        "languages",
        "main_languages",
        "class_count",
        "function_count",
        "common_imports",
        "total_elements",
        "text",
    ] {
        assert!(summary.get(key).is_some(), "missing summary field {}", key);
    }
    assert_eq!(summary["languages"]["Python"], 3);
    let first_import = &summary["common_imports"][0];
    assert!(first_import["import"].is_string());
    assert!(first_import["count"].is_u64());
}

#[test]
fn test_json_round_trip() {
    let run = run_sample();
    let json = report::render_json(&run).unwrap();
    let back: ProjectRun = serde_json::from_str(&json).unwrap();
    assert_eq!(back, run);
}
