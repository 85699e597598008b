//! Byte-exact tests for the canonical output format.
//!
//! The rendered bytes are a compatibility contract. Every expectation here is
//! spelled out as a literal string; if one of these starts failing, the
//! format drifted and downstream diffs will break.

mod common;

use common::{index_from_triples, result};
use concordance::{json, rank_results, MatchResult};
use std::collections::BTreeMap;
use std::fs;

// ============================================================================
// EMPTY SHAPES
// ============================================================================

#[test]
fn empty_array() {
    assert_eq!(json::array_to_string(std::iter::empty::<u32>()).unwrap(), "[\n]");
}

#[test]
fn empty_object() {
    let entries: Vec<(&str, u32)> = Vec::new();
    assert_eq!(json::object_to_string(entries).unwrap(), "{\n}");
}

#[test]
fn empty_nested_shapes() {
    let nested: Vec<(&str, Vec<u32>)> = Vec::new();
    assert_eq!(json::nested_array_to_string(nested).unwrap(), "{\n}");

    let index = index_from_triples(&[]);
    assert_eq!(json::nested_object_to_string(index.view()).unwrap(), "{\n}");

    let results: Vec<(&str, Vec<&MatchResult>)> = Vec::new();
    assert_eq!(json::results_to_string(results).unwrap(), "{\n}");
}

// ============================================================================
// FLAT SHAPES
// ============================================================================

#[test]
fn array_of_prequoted_strings() {
    // Values are verbatim; JSON string output needs pre-quoted input.
    let rendered = json::array_to_string(["\"a\"", "\"b\""]).unwrap();
    assert_eq!(rendered, "[\n\t\"a\",\n\t\"b\"\n]");

    let parsed: Vec<String> = serde_json::from_str(&rendered).unwrap();
    assert_eq!(parsed, vec!["a", "b"]);
}

#[test]
fn array_of_integers() {
    assert_eq!(json::array_to_string([1, 5]).unwrap(), "[\n\t1,\n\t5\n]");
}

#[test]
fn flat_object() {
    let mut entries = BTreeMap::new();
    entries.insert("count".to_string(), 3);
    entries.insert("total".to_string(), 10);

    let rendered = json::object_to_string(&entries).unwrap();
    assert_eq!(rendered, "{\n\t\"count\": 3,\n\t\"total\": 10\n}");
}

#[test]
fn output_has_no_trailing_newline() {
    for rendered in [
        json::array_to_string([1]).unwrap(),
        json::object_to_string([("k", 1)]).unwrap(),
    ] {
        assert!(!rendered.ends_with('\n'));
    }
}

// ============================================================================
// NESTED SHAPES
// ============================================================================

#[test]
fn object_of_arrays_matches_locations_view() {
    let index = index_from_triples(&[("run", "a.txt", 1), ("run", "a.txt", 5), ("run", "b.txt", 2)]);

    let rendered = json::nested_array_to_string(index.locations_of("run")).unwrap();
    assert_eq!(
        rendered,
        "{\n\
         \t\"a.txt\": [\n\
         \t\t1,\n\
         \t\t5\n\
         \t],\n\
         \t\"b.txt\": [\n\
         \t\t2\n\
         \t]\n\
         }"
    );
}

#[test]
fn object_of_objects_matches_full_view() {
    let index = index_from_triples(&[("run", "a.txt", 1), ("run", "a.txt", 5), ("run", "b.txt", 2)]);

    let rendered = json::nested_object_to_string(index.view()).unwrap();
    assert_eq!(
        rendered,
        "{\n\
         \t\"run\": {\n\
         \t\t\"a.txt\": [\n\
         \t\t\t1,\n\
         \t\t\t5\n\
         \t\t],\n\
         \t\t\"b.txt\": [\n\
         \t\t\t2\n\
         \t\t]\n\
         \t}\n\
         }"
    );

    // Canonical output is real JSON when keys need no escaping.
    let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(value["run"]["a.txt"], serde_json::json!([1, 5]));
}

// ============================================================================
// QUERY RESULTS SHAPE
// ============================================================================

#[test]
fn single_result_object_bytes() {
    let mut report = BTreeMap::new();
    report.insert("query", vec![result(10, 5, "a.txt")]);

    let rendered = json::results_to_string(report.iter().map(|(q, r)| (*q, r))).unwrap();
    assert_eq!(
        rendered,
        "{\n\
         \t\"query\": [\n\
         \t\t{\n\
         \t\t\t\"count\": 5,\n\
         \t\t\t\"score\": 0.50000000,\n\
         \t\t\t\"where\": \"a.txt\"\n\
         \t\t}\n\
         \t]\n\
         }"
    );
}

#[test]
fn ranked_results_render_in_order_with_commas() {
    let mut results = vec![result(10, 1, "b.txt"), result(10, 9, "a.txt")];
    rank_results(&mut results);

    let mut report = BTreeMap::new();
    report.insert("query", results);

    let rendered = json::results_to_string(report.iter().map(|(q, r)| (*q, r))).unwrap();
    assert_eq!(
        rendered,
        "{\n\
         \t\"query\": [\n\
         \t\t{\n\
         \t\t\t\"count\": 9,\n\
         \t\t\t\"score\": 0.90000000,\n\
         \t\t\t\"where\": \"a.txt\"\n\
         \t\t},\n\
         \t\t{\n\
         \t\t\t\"count\": 1,\n\
         \t\t\t\"score\": 0.10000000,\n\
         \t\t\t\"where\": \"b.txt\"\n\
         \t\t}\n\
         \t]\n\
         }"
    );
}

#[test]
fn query_with_no_results_renders_empty_array() {
    let mut report: BTreeMap<&str, Vec<MatchResult>> = BTreeMap::new();
    report.insert("nothing", Vec::new());

    let rendered = json::results_to_string(report.iter().map(|(q, r)| (*q, r))).unwrap();
    assert_eq!(rendered, "{\n\t\"nothing\": [\n\t]\n}");
}

#[test]
fn results_output_parses_as_json() {
    let mut report = BTreeMap::new();
    report.insert("run walk", vec![result(3, 1, "a.txt"), result(4, 1, "b.txt")]);

    let rendered = json::results_to_string(report.iter().map(|(q, r)| (*q, r))).unwrap();
    let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

    let list = value["run walk"].as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["count"], 1);
    assert_eq!(list[0]["where"], "a.txt");
    let score = list[0]["score"].as_f64().unwrap();
    assert!((score - 1.0 / 3.0).abs() < 1e-8);
}

// ============================================================================
// FILE FORMS
// ============================================================================

#[test]
fn file_forms_match_string_forms() {
    let dir = tempfile::tempdir().unwrap();
    let index = index_from_triples(&[("run", "a.txt", 1), ("walk", "b.txt", 2)]);

    let index_path = dir.path().join("index.json");
    json::write_nested_object_to_path(index.view(), &index_path).unwrap();
    assert_eq!(
        fs::read_to_string(&index_path).unwrap(),
        json::nested_object_to_string(index.view()).unwrap()
    );

    let array_path = dir.path().join("positions.json");
    json::write_array_to_path(index.positions_of("run", "a.txt"), &array_path).unwrap();
    assert_eq!(fs::read_to_string(&array_path).unwrap(), "[\n\t1\n]");

    let mut report = BTreeMap::new();
    report.insert("run", vec![result(10, 5, "a.txt")]);
    let results_path = dir.path().join("results.json");
    json::write_results_to_path(report.iter().map(|(q, r)| (*q, r)), &results_path).unwrap();
    assert_eq!(
        fs::read_to_string(&results_path).unwrap(),
        json::results_to_string(report.iter().map(|(q, r)| (*q, r))).unwrap()
    );
}

#[test]
fn file_form_fails_on_unwritable_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("no_such_dir").join("out.json");
    assert!(json::write_array_to_path([1, 2], &missing).is_err());
}
