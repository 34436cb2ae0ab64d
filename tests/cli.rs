//! Integration tests for the wildtree binary.

use std::process::Command;

/// Run wildtree with the given args
fn run_wildtree(args: &[&str]) -> (String, String, bool) {
    let output = Command::new(env!("CARGO_BIN_EXE_wildtree"))
        .args(args)
        .env_remove("WILDTREE_LOG")
        .output()
        .expect("Failed to run wildtree");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.success(),
    )
}

#[test]
fn test_search_plain() {
    let (stdout, _, ok) = run_wildtree(&["search", "--text", "BANANA", "ANA", "A*A", "XYZ"]);
    assert!(ok);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["ANA: 1 3", "A*A: 1 3", "XYZ: (no matches)"]);
}

#[test]
fn test_search_json_keeps_input_order() {
    let (stdout, _, ok) = run_wildtree(&[
        "search", "--text", "BANANABANANA", "-k", "2", "--json", "A*AN*", "NAB", "*",
    ]);
    assert!(ok);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let reports = value.as_array().unwrap();
    assert_eq!(reports.len(), 3);
    assert_eq!(reports[0]["pattern"], "A*AN*");
    assert_eq!(reports[0]["offsets"], serde_json::json!([1, 5, 7]));
    assert_eq!(reports[1]["offsets"], serde_json::json!([4]));
    assert_eq!(reports[2]["offsets"].as_array().unwrap().len(), 12);
}

#[test]
fn test_search_custom_wildcard_char() {
    let (stdout, _, ok) = run_wildtree(&["search", "--text", "BANANA", "--wildcard-char", "?", "A?A"]);
    assert!(ok);
    assert_eq!(stdout.trim(), "A?A: 1 3");
}

#[test]
fn test_search_config_document() {
    let (stdout, _, ok) = run_wildtree(&[
        "search",
        "--text",
        "BANANA",
        "--config",
        r#"{"wildcard_budget": 2}"#,
        "*A*",
    ]);
    assert!(ok);
    assert_eq!(stdout.trim(), "*A*: 0 2");
}

#[test]
fn test_budget_exceeded_fails() {
    let (_, stderr, ok) = run_wildtree(&["search", "--text", "BANANA", "-k", "1", "A**"]);
    assert!(!ok);
    assert!(stderr.contains("wildcards"), "stderr: {}", stderr);
}

#[test]
fn test_stats_json() {
    let (stdout, _, ok) = run_wildtree(&["stats", "--text", "BANANA", "--json"]);
    assert!(ok);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["text_len"], 6);
    assert_eq!(value["root_tree_nodes"], 11);
}

#[test]
fn test_stats_with_huge_budget() {
    let (stdout, stderr, ok) = run_wildtree(&["stats", "--text", "BANANA", "-k", "4000000000", "--json"]);
    assert!(ok, "stderr: {}", stderr);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["wildcard_budget"], 4_000_000_000u64);
    assert!(value["nodes_per_level"].as_array().unwrap().len() <= 7);
}

#[test]
fn test_tree_drawing() {
    let (stdout, _, ok) = run_wildtree(&["tree", "--text", "BANANA"]);
    assert!(ok);
    assert!(stdout.starts_with("(root)"));
    assert!(stdout.contains("BANANA$ [0]"));
    assert_eq!(stdout.matches('[').count(), 7);
}
