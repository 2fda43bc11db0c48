//! The portable archive format.
//!
//! A template archive is a single ZIP container holding `manifest.json`
//! (identity, metadata, format list, and the classified entry listing)
//! plus one entry per file and asset. Entry order, timestamps, and
//! compression settings are fixed, so packaging the same model twice
//! yields byte-identical output; the archive doubles as the registry
//! transfer encoding and supports content-addressed comparison.
//!
//! # Modules
//!
//! - [`manifest`] - manifest schema and the format-version gate
//! - [`codec`] - `package` / `unpackage` and the file helpers

pub mod codec;
pub mod manifest;

pub use codec::{package, read_archive_file, unpackage, write_archive_file};
pub use manifest::{ArchiveManifest, EntryKind, ManifestEntry, ARCHIVE_VERSION, MANIFEST_FILE};

/// Conventional archive file extension.
pub const ARCHIVE_EXTENSION: &str = "tdk";
