//! Tests for option storage backends.

use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::tempdir;

use crate::error::StorageError;
use crate::options::{FileOptionStore, MemoryOptionStore, OptionStore, validate_option_name};
use crate::paths::FlagdeckPaths;

fn file_store() -> (tempfile::TempDir, FileOptionStore) {
    let dir = tempdir().unwrap();
    let store = FileOptionStore::with_paths(FlagdeckPaths::from_root(dir.path().to_path_buf()));
    store.init().unwrap();
    (dir, store)
}

#[test]
fn test_memory_store_crud() {
    let store = MemoryOptionStore::new();
    assert_eq!(store.get_option("feature_flags").unwrap(), None);

    store
        .update_option("feature_flags", &json!({ "beta": "on" }))
        .unwrap();
    assert_eq!(
        store.get_option("feature_flags").unwrap(),
        Some(json!({ "beta": "on" }))
    );
    assert_eq!(store.len(), 1);

    store.delete_option("feature_flags").unwrap();
    assert_eq!(store.get_option("feature_flags").unwrap(), None);
    assert!(store.is_empty());
}

#[test]
fn test_file_store_crud() {
    let (_dir, store) = file_store();
    assert_eq!(store.get_option("feature_flags").unwrap(), None);

    store
        .update_option("feature_flags", &json!({ "beta": "off" }))
        .unwrap();
    assert!(store.paths().option_path("feature_flags").exists());
    assert_eq!(
        store.get_option("feature_flags").unwrap(),
        Some(json!({ "beta": "off" }))
    );

    store.delete_option("feature_flags").unwrap();
    assert_eq!(store.get_option("feature_flags").unwrap(), None);
    assert!(!store.paths().option_path("feature_flags").exists());
}

#[test]
fn test_file_store_overwrite_leaves_no_temp_file() {
    let (_dir, store) = file_store();

    store.update_option("feature_flags", &json!({ "a": "on" })).unwrap();
    store.update_option("feature_flags", &json!({ "b": "off" })).unwrap();

    assert_eq!(
        store.get_option("feature_flags").unwrap(),
        Some(json!({ "b": "off" }))
    );
    let leftovers: Vec<_> = std::fs::read_dir(&store.paths().options_dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().contains(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn test_file_store_concurrent_writers_last_wins() {
    let (dir, _store) = file_store();
    let root = dir.path().to_path_buf();

    let handles: Vec<_> = (0..8)
        .map(|writer| {
            let root = root.clone();
            std::thread::spawn(move || {
                let store = FileOptionStore::with_paths(FlagdeckPaths::from_root(root));
                (0..100)
                    .filter(|round| {
                        store
                            .update_option("feature_flags", &json!({ "writer": writer, "round": round }))
                            .is_err()
                    })
                    .count()
            })
        })
        .collect();
    let errors: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(errors, 0);

    let store = FileOptionStore::with_paths(FlagdeckPaths::from_root(root));
    let value = store.get_option("feature_flags").unwrap().unwrap();
    assert_eq!(value["round"], 99);

    let leftovers = std::fs::read_dir(&store.paths().options_dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().contains(".tmp"))
        .count();
    assert_eq!(leftovers, 0);
}

#[test]
fn test_file_store_visible_across_instances() {
    let (dir, store) = file_store();
    store.update_option("feature_flags", &json!({ "x": "on" })).unwrap();

    let other = FileOptionStore::with_paths(FlagdeckPaths::from_root(dir.path().to_path_buf()));
    assert_eq!(
        other.get_option("feature_flags").unwrap(),
        Some(json!({ "x": "on" }))
    );
}

#[test]
fn test_file_store_delete_missing_is_ok() {
    let (_dir, store) = file_store();
    store.delete_option("never_written").unwrap();
}

#[test]
fn test_file_store_corrupt_json_is_an_error() {
    let (_dir, store) = file_store();
    std::fs::write(store.paths().option_path("feature_flags"), "{not json").unwrap();

    let err = store.get_option("feature_flags").unwrap_err();
    assert!(matches!(err, StorageError::Json(_)));
}

#[test]
fn test_option_name_validation() {
    assert!(validate_option_name("feature_flags").is_ok());
    assert!(validate_option_name("wp.feature-flags_2").is_ok());

    for bad in ["", "../escape", "a/b", ".hidden", "with space"] {
        assert!(
            matches!(
                validate_option_name(bad),
                Err(StorageError::InvalidOptionName(_))
            ),
            "{bad:?} should be rejected"
        );
    }

    let store = MemoryOptionStore::new();
    assert!(store.update_option("../x", &json!(1)).is_err());
}
