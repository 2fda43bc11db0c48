//! The archive manifest.
//!
//! `manifest.json` is the first entry of every archive: the template's
//! identity and metadata plus a listing of all content entries with
//! their classification. The `archive_version` field gates forward
//! compatibility; readers reject manifests newer than they understand.

use serde::{Deserialize, Serialize};

use crate::template::model::{FormatDescriptor, Metadata, TemplateModel};

/// Manifest entry name inside the archive.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Archive format version this build reads and writes.
pub const ARCHIVE_VERSION: u32 = 1;

/// Classification of one content entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Template-source content, stored under `files/`.
    File,
    /// Static resource, stored under `assets/`.
    Asset,
}

impl EntryKind {
    /// Archive path prefix for this kind.
    pub fn prefix(self) -> &'static str {
        match self {
            EntryKind::File => "files/",
            EntryKind::Asset => "assets/",
        }
    }
}

/// One content entry in the manifest listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Relative path within the template.
    pub path: String,
    /// Whether the entry is a template file or an asset.
    pub kind: EntryKind,
}

impl ManifestEntry {
    /// The entry's full path inside the archive.
    pub fn archive_path(&self) -> String {
        format!("{}{}", self.kind.prefix(), self.path)
    }
}

/// The archive manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveManifest {
    /// Archive format version; newer than [`ARCHIVE_VERSION`] is rejected.
    pub archive_version: u32,
    pub identifier: String,
    pub version: String,
    pub metadata: Metadata,
    #[serde(default)]
    pub formats: Vec<FormatDescriptor>,
    /// Content entry listing, lexicographic by path.
    pub entries: Vec<ManifestEntry>,
}

impl ArchiveManifest {
    /// Build the manifest for a model, entries sorted lexicographically.
    pub fn from_model(model: &TemplateModel) -> Self {
        let mut entries: Vec<ManifestEntry> = model
            .files()
            .keys()
            .map(|path| ManifestEntry {
                path: path.clone(),
                kind: EntryKind::File,
            })
            .chain(model.assets().keys().map(|path| ManifestEntry {
                path: path.clone(),
                kind: EntryKind::Asset,
            }))
            .collect();
        entries.sort_by(|a, b| a.path.cmp(&b.path));

        Self {
            archive_version: ARCHIVE_VERSION,
            identifier: model.identifier.clone(),
            version: model.version.clone(),
            metadata: model.metadata.clone(),
            formats: model.formats.clone(),
            entries,
        }
    }
}
