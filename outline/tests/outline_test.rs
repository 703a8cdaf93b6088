//! Integration tests for outline parsing and the YAML codec.
//!
//! These tests run the full text → scheme → YAML → tree path against a
//! fixture shaped like the Wikipedia plain-text extract.

use std::path::PathBuf;

use lcc_outline::{
    OutlineBoundaries, OutlineError, ParseWarning, Tree, codec, parse_document, parse_outline,
};
use pretty_assertions::assert_eq;

/// Get the path to the test fixtures directory.
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn wikipedia_extract() -> String {
    std::fs::read_to_string(fixtures_dir().join("wikipedia_extract.txt")).unwrap()
}

#[test]
fn test_class_codes_follow_source_order() {
    let outcome = parse_document(&wikipedia_extract(), &OutlineBoundaries::default()).unwrap();

    assert_eq!(outcome.scheme.class_codes(), vec!["A", "B", "Q", "Z"]);
    assert!(outcome.warnings.is_empty(), "{:?}", outcome.warnings);
}

#[test]
fn test_text_outside_boundaries_is_ignored() {
    let outcome = parse_document(&wikipedia_extract(), &OutlineBoundaries::default()).unwrap();

    assert!(outcome.scheme.get("X").is_none());
    let z = outcome.scheme.get("Z").unwrap();
    assert_eq!(
        z.subclasses.get("ZA").map(String::as_str),
        Some("Information resources/materials")
    );
}

#[test]
fn test_subclasses_prefix_is_accepted() {
    let outcome = parse_document(&wikipedia_extract(), &OutlineBoundaries::default()).unwrap();

    let b = outcome.scheme.get("B").unwrap();
    let codes: Vec<_> = b.subclasses.keys().map(String::as_str).collect();
    assert_eq!(codes, vec!["B", "BF", "BL", "BX"]);
}

#[test]
fn test_missing_boundary_is_fatal() {
    let err = parse_document("Class Q – Science\n", &OutlineBoundaries::default()).unwrap_err();
    assert!(matches!(err, OutlineError::BoundaryNotFound { .. }));
}

#[test]
fn test_science_scenario() {
    let text = "Full classification outline\n\
                Class Q – Science\n\
                Subclass QA – Mathematics\n\
                Subclass QB – Astronomy\n\
                Subclass ZA – Information resources/materials\n";

    let outcome = parse_outline(text);

    let expected = Tree::from_entries([(
        "Q",
        Tree::from_entries([
            ("description", Tree::from("Science")),
            (
                "subclasses",
                Tree::from_entries([
                    ("QA", Tree::from("Mathematics")),
                    ("QB", Tree::from("Astronomy")),
                ]),
            ),
        ]),
    )]);
    assert_eq!(outcome.scheme.to_tree(), expected);
    assert!(matches!(
        outcome.warnings.as_slice(),
        [ParseWarning::MalformedSubclassLine { line_number: 5, .. }]
    ));
}

#[test]
fn test_malformed_class_line_is_skipped() {
    let text = "Class X Science\nClass Q – Science\nSubclass QA – Mathematics\n";

    let outcome = parse_outline(text);

    assert_eq!(outcome.scheme.class_codes(), vec!["Q"]);
    assert_eq!(
        outcome.warnings,
        vec![ParseWarning::MalformedClassLine {
            line_number: 1,
            line: "Class X Science".to_string(),
        }]
    );
    assert_eq!(outcome.scheme.get("Q").unwrap().subclasses.len(), 1);
}

#[test]
fn test_malformed_class_line_keeps_current_class() {
    let text = "Class Q – Science\nClass QX Science\nSubclass QC – Physics\n";

    let outcome = parse_outline(text);

    let q = outcome.scheme.get("Q").unwrap();
    assert_eq!(q.subclasses.get("QC").map(String::as_str), Some("Physics"));
    assert_eq!(outcome.warnings.len(), 1);
}

#[test]
fn test_parsed_tree_round_trips_through_yaml() {
    let outcome = parse_document(&wikipedia_extract(), &OutlineBoundaries::default()).unwrap();
    let tree = outcome.scheme.to_tree();

    let yaml = codec::serialize(&tree).unwrap();
    let back = codec::deserialize(&yaml).unwrap();

    assert_eq!(back, tree);
}

#[test]
fn test_serialized_layout() {
    let outcome = parse_outline("Class Q – Science\nSubclass QA – Mathematics\nClass Z – Bibliography\n");

    let yaml = codec::serialize(&outcome.scheme.to_tree()).unwrap();

    assert_eq!(
        yaml,
        "Q:\n  description: Science\n  subclasses:\n    QA: Mathematics\nZ:\n  description: Bibliography\n  subclasses: {}\n"
    );
}

#[test]
fn test_external_list_encoding_matches_mapping_encoding() {
    let as_list = "Q:\n  description: Science\n  subclasses:\n  - QA: Mathematics\n  - QB: Astronomy\n";
    let as_mapping = "Q:\n  description: Science\n  subclasses:\n    QA: Mathematics\n    QB: Astronomy\n";

    assert_eq!(
        codec::deserialize(as_list).unwrap(),
        codec::deserialize(as_mapping).unwrap()
    );
}
