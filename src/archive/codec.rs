//! Packaging and unpackaging.
//!
//! `package` serializes a model into archive bytes; `unpackage` rebuilds
//! the model, cross-checking the manifest against the actual ZIP contents
//! in both directions. The round-trip law holds for every valid model:
//! `unpackage(package(m))` is fingerprint-equal to `m`.

use std::io::{Cursor, Read, Write};
use std::path::Path;

use zip::read::ZipArchive;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::archive::manifest::{ArchiveManifest, EntryKind, MANIFEST_FILE, ARCHIVE_VERSION};
use crate::error::{Result, TdkError};
use crate::template::model::TemplateModel;

fn corrupt(message: impl Into<String>) -> TdkError {
    TdkError::CorruptArchive {
        message: message.into(),
    }
}

/// Fixed entry options: deterministic timestamp and compression so equal
/// models always package to identical bytes.
fn entry_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(6))
        .last_modified_time(zip::DateTime::default())
}

/// Serialize a model into portable archive bytes.
pub fn package(model: &TemplateModel) -> Result<Vec<u8>> {
    let manifest = ArchiveManifest::from_model(model);
    let options = entry_options();

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    let manifest_json =
        serde_json::to_vec_pretty(&manifest).map_err(|e| TdkError::Other(e.into()))?;
    zip.start_file(MANIFEST_FILE, options)
        .map_err(|e| TdkError::Other(e.into()))?;
    zip.write_all(&manifest_json)?;

    for entry in &manifest.entries {
        let content = match entry.kind {
            EntryKind::File => model.file(&entry.path),
            EntryKind::Asset => model.asset(&entry.path),
        }
        .ok_or_else(|| corrupt(format!("entry '{}' missing from model", entry.path)))?;

        zip.start_file(entry.archive_path(), options)
            .map_err(|e| TdkError::Other(e.into()))?;
        zip.write_all(content)?;
    }

    let cursor = zip.finish().map_err(|e| TdkError::Other(e.into()))?;
    Ok(cursor.into_inner())
}

/// Rebuild a model from archive bytes.
///
/// Fails with `CorruptArchive` when the manifest is missing, unreadable,
/// or disagrees with the ZIP contents in either direction, and with
/// `UnsupportedVersion` when the manifest declares a format version newer
/// than this build reads.
pub fn unpackage(bytes: &[u8]) -> Result<TemplateModel> {
    let mut zip = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| corrupt(format!("not a readable archive: {}", e)))?;

    let manifest: ArchiveManifest = {
        let mut entry = zip
            .by_name(MANIFEST_FILE)
            .map_err(|_| corrupt(format!("missing {}", MANIFEST_FILE)))?;
        let mut json = Vec::new();
        entry.read_to_end(&mut json)?;
        serde_json::from_slice(&json)
            .map_err(|e| corrupt(format!("unreadable {}: {}", MANIFEST_FILE, e)))?
    };

    if manifest.archive_version > ARCHIVE_VERSION {
        return Err(TdkError::UnsupportedVersion {
            found: manifest.archive_version,
            supported: ARCHIVE_VERSION,
        });
    }

    let mut model = TemplateModel::new(
        manifest.identifier.clone(),
        manifest.version.clone(),
        manifest.metadata.clone(),
    );
    model.formats = manifest.formats.clone();

    for entry in &manifest.entries {
        let mut content = Vec::new();
        {
            let mut zip_entry = zip.by_name(&entry.archive_path()).map_err(|_| {
                corrupt(format!(
                    "manifest references '{}' but the archive has no such entry",
                    entry.path
                ))
            })?;
            zip_entry.read_to_end(&mut content)?;
        }
        match entry.kind {
            EntryKind::File => model.add_file(entry.path.clone(), content)?,
            EntryKind::Asset => model.add_asset(entry.path.clone(), content)?,
        }
    }

    // Reverse check: every archive entry must be listed in the manifest.
    for index in 0..zip.len() {
        let entry = zip
            .by_index(index)
            .map_err(|e| corrupt(format!("unreadable archive entry: {}", e)))?;
        let name = entry.name().to_string();
        if name == MANIFEST_FILE || name.ends_with('/') {
            continue;
        }
        let listed = name
            .strip_prefix("files/")
            .map(|path| model.file(path).is_some())
            .or_else(|| {
                name.strip_prefix("assets/")
                    .map(|path| model.asset(path).is_some())
            })
            .unwrap_or(false);
        if !listed {
            return Err(corrupt(format!(
                "archive entry '{}' is not listed in the manifest",
                name
            )));
        }
    }

    Ok(model)
}

/// Package a model and write the archive to `path`.
///
/// The archive is written to a temporary file beside the target and
/// promoted on full success, so a failed write never leaves a truncated
/// archive at the final path.
pub fn write_archive_file(path: &Path, model: &TemplateModel) -> Result<()> {
    let bytes = package(model)?;
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(dir) = dir {
        std::fs::create_dir_all(dir)?;
    }

    let mut staged = tempfile::Builder::new()
        .prefix(".tdk-archive-")
        .tempfile_in(dir.unwrap_or_else(|| Path::new(".")))?;
    staged.write_all(&bytes)?;
    staged
        .persist(path)
        .map_err(|e| TdkError::Io(e.error))?;

    tracing::debug!(
        identifier = %model.identifier,
        bytes = bytes.len(),
        "wrote archive {}",
        path.display()
    );
    Ok(())
}

/// Read and unpackage an archive file.
pub fn read_archive_file(path: &Path) -> Result<TemplateModel> {
    let bytes = std::fs::read(path)?;
    unpackage(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::manifest::ManifestEntry;
    use crate::template::model::Metadata;
    use tempfile::TempDir;

    fn model() -> TemplateModel {
        let mut m = TemplateModel::new(
            "org.demo",
            "1.0.0",
            Metadata {
                name: "Demo".into(),
                description: "A demo template".into(),
                license: Some("MIT".into()),
                allowed_formats: vec!["html".into(), "txt".into()],
            },
        );
        m.add_format("body.html", "html");
        m.add_format("intro.txt", "txt");
        m.add_file("body.html", b"<p>hello</p>".to_vec()).unwrap();
        m.add_file("intro.txt", b"hello".to_vec()).unwrap();
        m.add_asset("logo.png", vec![0x89, 0x50, 0x4e, 0x47]).unwrap();
        m
    }

    #[test]
    fn round_trip_is_fingerprint_equal() {
        let original = model();
        let restored = unpackage(&package(&original).unwrap()).unwrap();
        assert_eq!(original.fingerprint(), restored.fingerprint());
        assert_eq!(restored.file("body.html"), original.file("body.html"));
        assert_eq!(restored.asset("logo.png"), original.asset("logo.png"));
    }

    #[test]
    fn packaging_twice_is_byte_identical() {
        let m = model();
        assert_eq!(package(&m).unwrap(), package(&m).unwrap());
    }

    #[test]
    fn insertion_order_does_not_change_bytes() {
        let mut a = TemplateModel::new("org.demo", "1.0.0", model().metadata.clone());
        a.add_file("a.txt", b"a".to_vec()).unwrap();
        a.add_file("b.txt", b"b".to_vec()).unwrap();

        let mut b = TemplateModel::new("org.demo", "1.0.0", model().metadata.clone());
        b.add_file("b.txt", b"b".to_vec()).unwrap();
        b.add_file("a.txt", b"a".to_vec()).unwrap();

        assert_eq!(package(&a).unwrap(), package(&b).unwrap());
    }

    #[test]
    fn garbage_bytes_are_a_corrupt_archive() {
        let err = unpackage(b"definitely not a zip").unwrap_err();
        assert!(matches!(err, TdkError::CorruptArchive { .. }));
    }

    #[test]
    fn missing_manifest_is_a_corrupt_archive() {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file("files/body.html", entry_options()).unwrap();
        zip.write_all(b"<p>hi</p>").unwrap();
        let bytes = zip.finish().unwrap().into_inner();

        let err = unpackage(&bytes).unwrap_err();
        match err {
            TdkError::CorruptArchive { message } => assert!(message.contains(MANIFEST_FILE)),
            other => panic!("expected CorruptArchive, got {:?}", other),
        }
    }

    #[test]
    fn manifest_referencing_missing_entry_is_corrupt() {
        let mut manifest = ArchiveManifest::from_model(&TemplateModel::new(
            "org.demo",
            "1.0.0",
            model().metadata.clone(),
        ));
        manifest.entries.push(ManifestEntry {
            path: "ghost.txt".into(),
            kind: EntryKind::File,
        });

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file(MANIFEST_FILE, entry_options()).unwrap();
        zip.write_all(&serde_json::to_vec(&manifest).unwrap()).unwrap();
        let bytes = zip.finish().unwrap().into_inner();

        let err = unpackage(&bytes).unwrap_err();
        match err {
            TdkError::CorruptArchive { message } => assert!(message.contains("ghost.txt")),
            other => panic!("expected CorruptArchive, got {:?}", other),
        }
    }

    #[test]
    fn unlisted_archive_entry_is_corrupt() {
        let manifest = ArchiveManifest::from_model(&TemplateModel::new(
            "org.demo",
            "1.0.0",
            model().metadata.clone(),
        ));

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file(MANIFEST_FILE, entry_options()).unwrap();
        zip.write_all(&serde_json::to_vec(&manifest).unwrap()).unwrap();
        zip.start_file("files/stowaway.txt", entry_options()).unwrap();
        zip.write_all(b"surprise").unwrap();
        let bytes = zip.finish().unwrap().into_inner();

        let err = unpackage(&bytes).unwrap_err();
        match err {
            TdkError::CorruptArchive { message } => assert!(message.contains("stowaway")),
            other => panic!("expected CorruptArchive, got {:?}", other),
        }
    }

    #[test]
    fn newer_archive_version_is_unsupported() {
        let mut manifest = ArchiveManifest::from_model(&model());
        manifest.archive_version = ARCHIVE_VERSION + 1;
        manifest.entries.clear();

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file(MANIFEST_FILE, entry_options()).unwrap();
        zip.write_all(&serde_json::to_vec(&manifest).unwrap()).unwrap();
        let bytes = zip.finish().unwrap().into_inner();

        let err = unpackage(&bytes).unwrap_err();
        assert!(matches!(err, TdkError::UnsupportedVersion { found, .. } if found == ARCHIVE_VERSION + 1));
    }

    #[test]
    fn traversal_path_in_manifest_is_rejected() {
        let mut manifest = ArchiveManifest::from_model(&TemplateModel::new(
            "org.demo",
            "1.0.0",
            model().metadata.clone(),
        ));
        manifest.entries.push(ManifestEntry {
            path: "../escape.txt".into(),
            kind: EntryKind::File,
        });

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file(MANIFEST_FILE, entry_options()).unwrap();
        zip.write_all(&serde_json::to_vec(&manifest).unwrap()).unwrap();
        zip.start_file("files/../escape.txt", entry_options()).unwrap();
        zip.write_all(b"nope").unwrap();
        let bytes = zip.finish().unwrap().into_inner();

        let err = unpackage(&bytes).unwrap_err();
        assert!(matches!(err, TdkError::InvalidPath { .. }));
    }

    #[test]
    fn archive_file_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("demo-1.0.0.tdk");

        let original = model();
        write_archive_file(&path, &original).unwrap();
        let restored = read_archive_file(&path).unwrap();

        assert_eq!(original.fingerprint(), restored.fingerprint());
    }
}
