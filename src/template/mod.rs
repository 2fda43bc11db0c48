//! The in-memory template model.
//!
//! A template is a named, versioned bundle of template-source files,
//! static assets, and metadata, consumed by a document-rendering worker.
//! This module holds the pure data representation plus its two derived
//! operations: fingerprinting (content identity) and validation
//! (delegated to [`crate::validate`]).
//!
//! # Modules
//!
//! - [`model`] - [`TemplateModel`], [`Metadata`], [`FormatDescriptor`]
//! - [`descriptor`] - the `template.json` wire schema shared with the
//!   rendering worker
//! - [`fingerprint`] - deterministic SHA-256 content identity
//! - [`paths`] - relative path admission rules
//! - [`version`] - semantic version parsing and ordering

pub mod descriptor;
pub mod fingerprint;
pub mod model;
pub mod paths;
pub mod version;

pub use descriptor::{Descriptor, DESCRIPTOR_FILE};
pub use model::{is_valid_identifier, FormatDescriptor, Metadata, TemplateModel};
pub use paths::check_relative_path;
pub use version::Version;
