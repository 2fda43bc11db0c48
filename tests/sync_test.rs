//! Integration tests for the sync engine against the in-memory registry.

use std::fs;

use tempfile::TempDir;

use tdk::error::TdkError;
use tdk::registry::{InMemoryRegistry, RegistryClient};
use tdk::store::{self, SaveMode};
use tdk::sync::{compare, GetOutcome, PutOutcome, Republisher, SyncEngine, SyncStatus, WatchOutcome};
use tdk::template::{Metadata, TemplateModel};

fn model(identifier: &str, version: &str, body: &[u8]) -> TemplateModel {
    let mut m = TemplateModel::new(
        identifier,
        version,
        Metadata {
            name: "Demo".into(),
            description: "A demo template".into(),
            license: Some("MIT".into()),
            allowed_formats: vec!["html".into()],
        },
    );
    m.add_format("body.html", "html");
    m.add_file("body.html", body.to_vec()).unwrap();
    m
}

#[test]
fn publish_conflict_leaves_registry_unchanged() {
    let registry = InMemoryRegistry::new();
    let original = model("org.demo", "1.0.0", b"<p>published</p>");
    registry.publish(&original, false).unwrap();

    let temp = TempDir::new().unwrap();
    let root = temp.path().join("demo");
    store::save(&root, &model("org.demo", "1.0.0", b"<p>edited</p>"), SaveMode::Merge).unwrap();

    let mut engine = SyncEngine::new(&registry);
    let err = engine.put(&root, false).unwrap_err();
    assert!(matches!(err, TdkError::VersionConflict { .. }));
    assert_eq!(
        registry.fingerprint_of("org.demo", "1.0.0"),
        Some(original.fingerprint())
    );
}

#[test]
fn get_conflict_reports_diff_and_preserves_local_bytes() {
    let registry = InMemoryRegistry::new();
    registry
        .publish(&model("org.demo", "1.0.0", b"<p>remote</p>"), false)
        .unwrap();

    let temp = TempDir::new().unwrap();
    let root = temp.path().join("demo");
    let mut local = model("org.demo", "1.0.0", b"<p>local</p>");
    local.add_asset("notes.txt", b"scratch".to_vec()).unwrap();
    store::save(&root, &local, SaveMode::Merge).unwrap();

    let mut engine = SyncEngine::new(&registry);
    let err = engine.get(&root, "org.demo", "1.0.0", false).unwrap_err();

    match err {
        TdkError::Conflicted { diff, .. } => {
            assert_eq!(diff.changed, vec!["body.html"]);
            assert_eq!(diff.local_only, vec!["notes.txt"]);
            assert!(diff.remote_only.is_empty());
        }
        other => panic!("expected Conflicted, got {:?}", other),
    }

    // Local bytes are untouched.
    assert_eq!(fs::read(root.join("body.html")).unwrap(), b"<p>local</p>");
    assert!(root.join("notes.txt").exists());
}

#[test]
fn get_then_put_round_trips_through_the_registry() {
    let registry = InMemoryRegistry::new();
    let published = model("org.demo", "1.0.0", b"<p>v1</p>");
    registry.publish(&published, false).unwrap();

    let temp = TempDir::new().unwrap();
    let root = temp.path().join("demo");

    let mut engine = SyncEngine::new(&registry);
    let outcome = engine.get(&root, "org.demo", "1.0.0", false).unwrap();
    assert!(matches!(outcome, GetOutcome::Fetched(_)));

    // An unchanged tree republishes the same fingerprint without conflict.
    match engine.put(&root, false).unwrap() {
        PutOutcome::Published { model, .. } => {
            assert_eq!(model.fingerprint(), published.fingerprint());
        }
        other => panic!("expected Published, got {:?}", other),
    }
}

#[test]
fn independent_engines_and_registries_coexist() {
    let staging = InMemoryRegistry::new();
    let production = InMemoryRegistry::new();

    let temp = TempDir::new().unwrap();
    let root = temp.path().join("demo");
    store::save(&root, &model("org.demo", "1.0.0", b"<p>x</p>"), SaveMode::Merge).unwrap();

    let mut staging_engine = SyncEngine::new(&staging);
    staging_engine.put(&root, false).unwrap();

    assert_eq!(staging.len(), 1);
    assert!(production.is_empty());
}

#[test]
fn compare_tags_every_direction() {
    let local_old = model("org.demo", "1.0.0", b"a");
    let remote_new = model("org.demo", "1.1.0", b"b");

    assert_eq!(compare(None, None), SyncStatus::InSync);
    assert_eq!(compare(Some(&local_old), None), SyncStatus::LocalOnly);
    assert_eq!(compare(None, Some(&remote_new)), SyncStatus::RemoteOnly);
    assert_eq!(
        compare(Some(&local_old), Some(&remote_new)),
        SyncStatus::RemoteNewer
    );
    assert_eq!(
        compare(Some(&remote_new), Some(&local_old)),
        SyncStatus::LocalNewer
    );
    assert_eq!(
        compare(
            Some(&model("org.demo", "1.0.0", b"a")),
            Some(&model("org.demo", "1.0.0", b"b"))
        ),
        SyncStatus::Diverged
    );
}

#[test]
fn watch_cycle_coalesces_to_single_publish_per_change() {
    let registry = InMemoryRegistry::new();
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("demo");
    store::save(&root, &model("org.demo", "0.1.0", b"<p>v1</p>"), SaveMode::Merge).unwrap();

    let mut republisher = Republisher::new();

    // First cycle publishes.
    assert!(matches!(
        republisher.sync_once(&root, &registry, false).unwrap(),
        WatchOutcome::Published { .. }
    ));

    // Spurious wakeups with no content change do nothing.
    for _ in 0..3 {
        assert_eq!(
            republisher.sync_once(&root, &registry, false).unwrap(),
            WatchOutcome::Unchanged
        );
    }

    // A real edit under a bumped version publishes exactly once more.
    let descriptor = fs::read_to_string(root.join("template.json")).unwrap();
    fs::write(
        root.join("template.json"),
        descriptor.replace("0.1.0", "0.2.0"),
    )
    .unwrap();
    fs::write(root.join("body.html"), "<p>v2</p>").unwrap();

    assert!(matches!(
        republisher.sync_once(&root, &registry, false).unwrap(),
        WatchOutcome::Published { .. }
    ));
    assert_eq!(registry.len(), 2);
}
