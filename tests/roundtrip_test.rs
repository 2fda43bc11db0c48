//! Property-style tests over the public model, store, and codec APIs.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tempfile::TempDir;

use tdk::archive;
use tdk::store::{self, SaveMode};
use tdk::template::{Metadata, TemplateModel};
use tdk::validate;

fn metadata() -> Metadata {
    Metadata {
        name: "Demo".into(),
        description: "A demo template".into(),
        license: Some("MIT".into()),
        allowed_formats: vec!["html".into(), "txt".into()],
    }
}

/// A spread of shapes the codec must handle losslessly.
fn sample_models() -> Vec<TemplateModel> {
    let empty = TemplateModel::new("org.empty", "0.1.0", metadata());

    let mut simple = TemplateModel::new("org.simple", "1.0.0", metadata());
    simple.add_format("body.html", "html");
    simple.add_file("body.html", b"<p>hello</p>".to_vec()).unwrap();

    let mut nested = TemplateModel::new("org.nested", "2.3.4-rc.1", metadata());
    nested.add_format("body.html", "html");
    nested.add_file("body.html", b"<p>root</p>".to_vec()).unwrap();
    nested
        .add_file("partials/deep/footer.html", b"<footer/>".to_vec())
        .unwrap();
    nested
        .add_asset("images/logo.png", vec![0x89, 0x50, 0x4e, 0x47, 0, 255, 13, 10])
        .unwrap();
    nested.add_asset("data/empty.bin", Vec::new()).unwrap();

    let mut unicode = TemplateModel::new("org.unicode", "1.0.0", metadata());
    unicode.add_format("body.html", "html");
    unicode
        .add_file("body.html", "sn\u{00f6}wm\u{00e4}n \u{2603}".as_bytes().to_vec())
        .unwrap();

    vec![empty, simple, nested, unicode]
}

fn tree_snapshot(root: &Path) -> BTreeMap<String, Vec<u8>> {
    let mut snapshot = BTreeMap::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir).unwrap() {
            let entry = entry.unwrap();
            if entry.file_type().unwrap().is_dir() {
                pending.push(entry.path());
            } else {
                let rel = entry
                    .path()
                    .strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .to_string();
                snapshot.insert(rel, fs::read(entry.path()).unwrap());
            }
        }
    }
    snapshot
}

#[test]
fn unpackage_package_is_fingerprint_equal_for_all_samples() {
    for model in sample_models() {
        let bytes = archive::package(&model).unwrap();
        let restored = archive::unpackage(&bytes).unwrap();
        assert_eq!(
            restored.fingerprint(),
            model.fingerprint(),
            "round trip broke for {}",
            model.identifier
        );
    }
}

#[test]
fn packaging_is_deterministic_for_all_samples() {
    for model in sample_models() {
        assert_eq!(
            archive::package(&model).unwrap(),
            archive::package(&model).unwrap(),
            "packaging nondeterministic for {}",
            model.identifier
        );
    }
}

#[test]
fn save_load_save_produces_no_filesystem_diff() {
    for model in sample_models() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("t");

        store::save(&root, &model, SaveMode::Merge).unwrap();
        let before = tree_snapshot(&root);

        let loaded = store::load(&root).unwrap();
        store::save(&root, &loaded, SaveMode::Merge).unwrap();
        let after = tree_snapshot(&root);

        assert_eq!(before, after, "save/load/save diff for {}", model.identifier);
    }
}

#[test]
fn disk_round_trip_preserves_fingerprint() {
    for model in sample_models() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("t");
        store::save(&root, &model, SaveMode::Merge).unwrap();
        let loaded = store::load(&root).unwrap();
        assert_eq!(loaded.fingerprint(), model.fingerprint());
    }
}

#[test]
fn fingerprint_reacts_to_every_byte() {
    let mut base = TemplateModel::new("org.demo", "1.0.0", metadata());
    base.add_format("body.html", "html");
    base.add_file("body.html", b"abc".to_vec()).unwrap();

    for position in 0..3 {
        let mut mutated_content = b"abc".to_vec();
        mutated_content[position] ^= 0x01;

        let mut mutated = TemplateModel::new("org.demo", "1.0.0", metadata());
        mutated.add_format("body.html", "html");
        mutated.add_file("body.html", mutated_content).unwrap();

        assert_ne!(
            base.fingerprint(),
            mutated.fingerprint(),
            "byte {} did not affect the fingerprint",
            position
        );
    }
}

#[test]
fn validator_is_deterministic_on_unmodified_tree() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("t");

    let mut model = TemplateModel::new("org.demo", "not-semver", metadata());
    model.add_format("missing.html", "pdf");
    model.add_file("present.txt", b"x".to_vec()).unwrap();
    store::save(&root, &model, SaveMode::Merge).unwrap();

    let first = validate::run(&store::load(&root).unwrap());
    let second = validate::run(&store::load(&root).unwrap());
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn archive_file_helpers_round_trip_on_disk() {
    let temp = TempDir::new().unwrap();
    for model in sample_models() {
        let path = temp.path().join(format!("{}.tdk", model.identifier));
        archive::write_archive_file(&path, &model).unwrap();
        let restored = archive::read_archive_file(&path).unwrap();
        assert_eq!(restored.fingerprint(), model.fingerprint());
    }
}
