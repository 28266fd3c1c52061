//! Atomic write tests
//!
//! Validates that documents survive repeated saves and that a failed
//! rename leaves a safety copy behind.

use grid_store::{JsonFileStore, Store, StoreError};
use serde::{Deserialize, Serialize};
use std::fs;
use tempfile::tempdir;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Doc {
    version: u32,
    items: Vec<String>,
}

fn doc(n: usize) -> Doc {
    Doc {
        version: 1,
        items: (0..n).map(|i| format!("item-{i}")).collect(),
    }
}

#[test]
fn test_many_saves_keep_last_value() {
    let dir = tempdir().expect("Failed to create temp directory");
    let store = JsonFileStore::new(dir.path().join("doc.json"));
    for n in 0..20 {
        store.save(&doc(n)).expect("save failed");
    }
    assert_eq!(store.load().expect("load failed"), Some(doc(19)));
}

#[test]
fn test_document_is_pretty_printed_json() {
    let dir = tempdir().expect("Failed to create temp directory");
    let path = dir.path().join("doc.json");
    let store = JsonFileStore::new(&path);
    store.save(&doc(2)).expect("save failed");
    let raw = fs::read_to_string(&path).expect("read failed");
    assert!(raw.contains('\n'), "pretty JSON spans multiple lines");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("valid JSON");
    assert_eq!(value["items"][1], "item-1");
}

#[test]
fn test_rename_onto_directory_keeps_safety_copy() {
    let dir = tempdir().expect("Failed to create temp directory");
    let path = dir.path().join("doc.json");
    // A non-empty directory at the target path makes the final rename fail.
    fs::create_dir_all(path.join("occupied")).expect("create dir");
    let store = JsonFileStore::new(&path);

    match store.save(&doc(1)) {
        Err(StoreError::WriteAtomic { temp_path, .. }) => {
            assert!(temp_path.exists(), "safety copy should remain");
            let copy: Doc =
                serde_json::from_str(&fs::read_to_string(&temp_path).expect("read copy"))
                    .expect("copy is valid JSON");
            assert_eq!(copy, doc(1));
        }
        other => panic!("expected WriteAtomic, got {other:?}"),
    }
}
