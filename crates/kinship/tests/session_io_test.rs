//! File round trips through Session.

use std::fs;

use kinship::{KinshipError, Session};
use tempfile::TempDir;

const FAMILY: &str = "Alice\n-Bob\n-=Carol\n--Dave\n";

#[test]
fn test_text_export_is_verbatim() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hierarchy.txt");

    let mut session = Session::default();
    session.submit(FAMILY).unwrap();
    session.export_text(&path).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), FAMILY);
}

#[test]
fn test_text_reimport_yields_same_tree() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hierarchy.txt");

    let mut first = Session::default();
    first.submit(FAMILY).unwrap();
    first.export_text(&path).unwrap();

    let mut second = Session::default();
    second.import_text(&path).unwrap();

    assert_eq!(second.tree(), first.tree());
}

#[test]
fn test_json_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tree.json");

    let mut session = Session::default();
    session.submit(FAMILY).unwrap();
    session.export_json(&path).unwrap();

    let mut restored = Session::default();
    restored.import_json(&path).unwrap();

    assert_eq!(restored.tree(), session.tree());
}

/// Notation for a single line of descent, one generation per line.
fn lineage(generations: usize) -> String {
    (0..generations)
        .map(|generation| format!("{}G{generation}", "-".repeat(generation)))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_deepest_exportable_lineage_round_trips() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tree.json");

    let mut session = Session::default();
    session.submit(lineage(63)).unwrap();
    session.export_json(&path).unwrap();

    let mut restored = Session::default();
    restored.import_json(&path).unwrap();

    assert_eq!(restored.tree(), session.tree());
}

#[test]
fn test_too_deep_lineage_is_not_written_as_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tree.json");

    let mut session = Session::default();
    session.submit(lineage(70)).unwrap();

    let err = session.export_json(&path).unwrap_err();

    assert!(matches!(err, KinshipError::Schema(_)));
    assert!(!path.exists());
    // The notation itself still exports.
    session.export_text(dir.path().join("hierarchy.txt")).unwrap();
}

#[test]
fn test_missing_file_keeps_tree() {
    let dir = TempDir::new().unwrap();

    let mut session = Session::default();
    session.submit(FAMILY).unwrap();

    let err = session.import_text(dir.path().join("missing.txt")).unwrap_err();
    assert!(matches!(err, KinshipError::Io(_)));
    assert_eq!(session.tree().len(), 4);

    let err = session.import_json(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, KinshipError::Io(_)));
    assert_eq!(session.tree().len(), 4);
}

#[test]
fn test_malformed_json_keeps_tree() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tree.json");
    fs::write(&path, "{ not json").unwrap();

    let mut session = Session::default();
    session.submit(FAMILY).unwrap();

    let err = session.import_json(&path).unwrap_err();
    assert!(matches!(err, KinshipError::Schema(_)));
    assert_eq!(session.tree().len(), 4);
}

#[test]
fn test_malformed_text_keeps_tree() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hierarchy.txt");
    fs::write(&path, "Alice\nBob\n").unwrap();

    let mut session = Session::default();
    session.submit(FAMILY).unwrap();

    let err = session.import_text(&path).unwrap_err();
    assert!(matches!(err, KinshipError::Parse { .. }));
    assert_eq!(session.text(), FAMILY);
    assert_eq!(session.tree().len(), 4);
}
