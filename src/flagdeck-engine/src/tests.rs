//! End-to-end tests for the override engine.

use std::sync::Arc;

use flagdeck_hooks::{ActivationSink, FilterRegistry};
use flagdeck_storage::{FileOptionStore, FlagdeckPaths, MemoryOptionStore};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

use crate::{
    FlagCandidate, FlagEngine, FlagError, FlagRegistry, FlagState, FlagView, LocalOperator,
    ResponseData, StateStore, ToggleRequest,
};

fn single_flag_engine() -> FlagEngine {
    let registry = FlagRegistry::sanitize([(
        "x",
        FlagCandidate::new("X", "ext.x").default_value(true),
    )]);
    FlagEngine::new(registry, StateStore::new(Arc::new(MemoryOptionStore::new())))
}

/// Apply overrides to a fresh sink, as the next request would.
fn next_pass(engine: &FlagEngine) -> FilterRegistry {
    let filters = FilterRegistry::new();
    engine.apply_overrides(&filters).unwrap();
    filters
}

#[test]
fn test_full_toggle_cycle() {
    let engine = single_flag_engine();

    assert_eq!(engine.state("x").unwrap(), FlagState::Default);
    assert_eq!(engine.resolve_default("x").unwrap(), Some(true));
    assert!(!next_pass(&engine).is_bound("ext.x"));

    let outcome = engine.request_toggle("x").unwrap();
    assert_eq!(outcome.state, FlagState::On);
    let filters = next_pass(&engine);
    assert!(filters.is_bound("ext.x"));
    assert!(filters.apply("ext.x", false));

    assert_eq!(engine.request_toggle("x").unwrap().state, FlagState::Off);
    assert!(!next_pass(&engine).apply("ext.x", true));

    assert_eq!(engine.request_toggle("x").unwrap().state, FlagState::Default);
    let filters = next_pass(&engine);
    assert!(!filters.is_bound("ext.x"));
    assert!(filters.apply("ext.x", true));
    assert!(engine.states().overrides().unwrap().is_empty());
}

#[test]
fn test_unknown_flag_is_rejected_without_state_change() {
    let engine = single_flag_engine();

    let err = engine.request_toggle("missing").unwrap_err();
    assert!(matches!(err, FlagError::InvalidFlagId(id) if id == "missing"));
    assert!(engine.states().overrides().unwrap().is_empty());
    assert!(matches!(engine.state("missing"), Err(FlagError::InvalidFlagId(_))));
}

#[test]
fn test_hidden_flag_cannot_be_toggled() {
    let registry = FlagRegistry::sanitize([(
        "secret",
        FlagCandidate::new("Secret", "ext.secret").hidden(),
    )]);
    let engine = FlagEngine::new(registry, StateStore::new(Arc::new(MemoryOptionStore::new())));

    assert!(!engine.is_active());
    assert!(matches!(
        engine.request_toggle("secret"),
        Err(FlagError::InvalidFlagId(_))
    ));
}

#[test]
fn test_handle_checks_guard_first() {
    let engine = single_flag_engine();
    let deny = |_: &ToggleRequest| false;

    let response = engine.handle(&ToggleRequest::new("x"), &deny);
    assert!(!response.success);
    assert_eq!(response.data, ResponseData::Message("Invalid request".into()));
    assert_eq!(engine.state("x").unwrap(), FlagState::Default);

    let response = engine.handle(&ToggleRequest::new("nope"), &LocalOperator);
    assert_eq!(
        response.data,
        ResponseData::Message("Invalid feature flag or state".into())
    );

    let response = engine.handle(&ToggleRequest::new("x"), &LocalOperator);
    assert!(response.success);
    assert_eq!(engine.state("x").unwrap(), FlagState::On);
}

#[test]
fn test_snapshot_reports_effective_values() {
    let registry = FlagRegistry::sanitize([
        ("on_default", FlagCandidate::new("On by default", "ext.a").default_value(true)),
        ("unknown", FlagCandidate::new("Unknown", "ext.b")),
        ("forced", FlagCandidate::new("Forced", "ext.c").computed_default(|| true)),
    ]);
    let engine = FlagEngine::new(registry, StateStore::new(Arc::new(MemoryOptionStore::new())));
    engine.request_toggle("forced").unwrap();
    engine.request_toggle("forced").unwrap();

    let snapshot = engine.snapshot().unwrap();
    assert_eq!(
        snapshot,
        vec![
            FlagView {
                id: "on_default".into(),
                label: "On by default".into(),
                activation_key: "ext.a".into(),
                state: FlagState::Default,
                default: Some(true),
                effective: Some(true),
            },
            FlagView {
                id: "unknown".into(),
                label: "Unknown".into(),
                activation_key: "ext.b".into(),
                state: FlagState::Default,
                default: None,
                effective: None,
            },
            FlagView {
                id: "forced".into(),
                label: "Forced".into(),
                activation_key: "ext.c".into(),
                state: FlagState::Off,
                default: Some(true),
                effective: Some(false),
            },
        ]
    );
}

#[test]
fn test_state_is_shared_through_the_file_store() {
    let dir = tempdir().unwrap();
    let open = || {
        let options = FileOptionStore::with_paths(FlagdeckPaths::from_root(dir.path().to_path_buf()));
        let registry = FlagRegistry::sanitize([("x", FlagCandidate::new("X", "ext.x"))]);
        FlagEngine::new(registry, StateStore::new(Arc::new(options)))
    };

    let first = open();
    let second = open();

    first.request_toggle("x").unwrap();
    assert_eq!(second.state("x").unwrap(), FlagState::On);

    second.request_toggle("x").unwrap();
    assert_eq!(first.state("x").unwrap(), FlagState::Off);
    assert!(!next_pass(&first).apply("ext.x", true));

    first.request_toggle("x").unwrap();
    assert_eq!(second.state("x").unwrap(), FlagState::Default);
    let paths = FlagdeckPaths::from_root(dir.path().to_path_buf());
    assert!(!paths.option_path("feature_flags").exists());
}

#[test]
fn test_custom_priority_is_used() {
    let engine = single_flag_engine().with_priority(5);
    engine.request_toggle("x").unwrap();

    let filters = FilterRegistry::new();
    filters.bind("ext.x", 10, Arc::new(|| false));
    engine.apply_overrides(&filters).unwrap();

    assert!(!filters.apply("ext.x", false));
}
