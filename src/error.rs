//! Error types for TDK operations.
//!
//! This module defines [`TdkError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `TdkError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `TdkError::Other`) for unexpected errors
//! - Every failure message names the offending path, identifier, or version
//! - Validator findings are collected, not raised; only `verify` and `put`
//!   turn them into a `ValidationFailed` error

use std::path::PathBuf;
use thiserror::Error;

use crate::sync::DiffSummary;

/// Core error type for TDK operations.
#[derive(Debug, Error)]
pub enum TdkError {
    /// The directory does not contain a template descriptor.
    #[error("Not a template: no descriptor found in {root}")]
    NotATemplate { root: PathBuf },

    /// The descriptor file exists but cannot be parsed against the wire schema.
    #[error("Malformed descriptor at {path}: {message}")]
    MalformedDescriptor { path: PathBuf, message: String },

    /// The archive is missing its manifest or the manifest disagrees with
    /// the archive contents.
    #[error("Corrupt archive: {message}")]
    CorruptArchive { message: String },

    /// The archive declares a format version newer than this build reads.
    #[error("Unsupported archive version {found} (this build reads up to {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Aggregate of Error-tagged validator findings.
    #[error("Validation failed for '{identifier}': {count} error finding(s)")]
    ValidationFailed { identifier: String, count: usize },

    /// The registry holds no template at this identifier and version.
    #[error("Template not found in registry: {identifier} {version}")]
    NotFound { identifier: String, version: String },

    /// A different fingerprint is already published at this identifier and
    /// version.
    #[error("Version conflict: a different '{identifier}' {version} is already published")]
    VersionConflict { identifier: String, version: String },

    /// The registry could not be reached or timed out.
    #[error("Registry unavailable: {message}")]
    RegistryUnavailable { message: String },

    /// Local and remote copies of the same identifier and version differ.
    #[error("Local and remote copies of '{identifier}' {version} have diverged")]
    Conflicted {
        identifier: String,
        version: String,
        diff: DiffSummary,
    },

    /// A relative path escapes the template root or is otherwise malformed.
    #[error("Invalid path '{path}': {message}")]
    InvalidPath { path: String, message: String },

    /// The same relative path was registered as both a file and an asset.
    #[error("Duplicate path '{path}': already present in the template")]
    DuplicatePath { path: String },

    /// The identifier does not match the registry naming pattern.
    #[error("Invalid identifier '{identifier}': expected lowercase dot-segmented name")]
    InvalidIdentifier { identifier: String },

    /// The version string is not a semantic version.
    #[error("Invalid version '{version}': expected MAJOR.MINOR.PATCH")]
    InvalidVersion { version: String },

    /// Failed to read the registry configuration file.
    #[error("Failed to load config at {path}: {message}")]
    ConfigError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for TDK operations.
pub type Result<T> = std::result::Result<T, TdkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_a_template_displays_root() {
        let err = TdkError::NotATemplate {
            root: PathBuf::from("/work/demo"),
        };
        assert!(err.to_string().contains("/work/demo"));
    }

    #[test]
    fn malformed_descriptor_displays_path_and_message() {
        let err = TdkError::MalformedDescriptor {
            path: PathBuf::from("/work/demo/template.json"),
            message: "missing field `identifier`".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("template.json"));
        assert!(msg.contains("identifier"));
    }

    #[test]
    fn unsupported_version_displays_both_versions() {
        let err = TdkError::UnsupportedVersion {
            found: 7,
            supported: 1,
        };
        let msg = err.to_string();
        assert!(msg.contains('7'));
        assert!(msg.contains('1'));
    }

    #[test]
    fn not_found_displays_identifier_and_version() {
        let err = TdkError::NotFound {
            identifier: "org.demo".into(),
            version: "1.0.0".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("org.demo"));
        assert!(msg.contains("1.0.0"));
    }

    #[test]
    fn version_conflict_displays_identifier_and_version() {
        let err = TdkError::VersionConflict {
            identifier: "org.demo".into(),
            version: "1.0.0".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("org.demo"));
        assert!(msg.contains("1.0.0"));
    }

    #[test]
    fn conflicted_displays_identifier() {
        let err = TdkError::Conflicted {
            identifier: "org.demo".into(),
            version: "1.0.0".into(),
            diff: DiffSummary::default(),
        };
        assert!(err.to_string().contains("org.demo"));
    }

    #[test]
    fn validation_failed_displays_count() {
        let err = TdkError::ValidationFailed {
            identifier: "org.demo".into(),
            count: 3,
        };
        assert!(err.to_string().contains('3'));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: TdkError = io_err.into();
        assert!(matches!(err, TdkError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(TdkError::InvalidIdentifier {
                identifier: "Bad Name".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}
