//! The template data model.
//!
//! [`TemplateModel`] is a pure data container: metadata, format
//! descriptors, and two disjoint path-keyed trees (template-source files
//! and static assets). All mutation goes through checked insertion so the
//! model invariants hold by construction:
//!
//! - no path appears in both `files` and `assets`
//! - every stored path stays inside the template root

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TdkError};
use crate::template::paths::check_relative_path;
use crate::validate::{self, Finding};

/// Fixed-schema descriptor metadata, shared with the rendering worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Human-readable template name.
    pub name: String,
    /// Short description of what the template produces.
    pub description: String,
    /// SPDX license expression, if the template is distributed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    /// Format identifiers this template may declare outputs for.
    #[serde(default)]
    pub allowed_formats: Vec<String>,
}

/// One output format: a template file and its recognized format id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatDescriptor {
    /// Relative path of the template file rendered for this format.
    pub file: String,
    /// Recognized format identifier (e.g. `html`, `txt`).
    pub format: String,
}

/// In-memory representation of one template instance.
///
/// `identifier` + `version` uniquely address an instance within a
/// registry; two instances with the same pair and different content are a
/// conflict, detected by comparing [`fingerprints`](TemplateModel::fingerprint).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateModel {
    /// Stable registry key, lowercase dot-segmented (`org.demo.invoice`).
    pub identifier: String,
    /// Semantic version string; compared as a parsed version where order
    /// matters, byte-for-byte in the fingerprint.
    pub version: String,
    /// Descriptor metadata.
    pub metadata: Metadata,
    /// Ordered output-format descriptors.
    pub formats: Vec<FormatDescriptor>,
    files: BTreeMap<String, Vec<u8>>,
    assets: BTreeMap<String, Vec<u8>>,
}

impl TemplateModel {
    /// Create an empty model with no files or assets.
    pub fn new(
        identifier: impl Into<String>,
        version: impl Into<String>,
        metadata: Metadata,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            version: version.into(),
            metadata,
            formats: Vec::new(),
            files: BTreeMap::new(),
            assets: BTreeMap::new(),
        }
    }

    /// Append a format descriptor.
    pub fn add_format(&mut self, file: impl Into<String>, format: impl Into<String>) {
        self.formats.push(FormatDescriptor {
            file: file.into(),
            format: format.into(),
        });
    }

    /// Insert template-source content at a relative path.
    pub fn add_file(&mut self, path: impl Into<String>, content: Vec<u8>) -> Result<()> {
        let path = path.into();
        check_relative_path(&path)?;
        if self.assets.contains_key(&path) || self.files.contains_key(&path) {
            return Err(TdkError::DuplicatePath { path });
        }
        self.files.insert(path, content);
        Ok(())
    }

    /// Insert static asset content at a relative path.
    pub fn add_asset(&mut self, path: impl Into<String>, content: Vec<u8>) -> Result<()> {
        let path = path.into();
        check_relative_path(&path)?;
        if self.files.contains_key(&path) || self.assets.contains_key(&path) {
            return Err(TdkError::DuplicatePath { path });
        }
        self.assets.insert(path, content);
        Ok(())
    }

    /// Template-source files, sorted by path.
    pub fn files(&self) -> &BTreeMap<String, Vec<u8>> {
        &self.files
    }

    /// Static assets, sorted by path.
    pub fn assets(&self) -> &BTreeMap<String, Vec<u8>> {
        &self.assets
    }

    /// Look up a file's content.
    pub fn file(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    /// Look up an asset's content.
    pub fn asset(&self, path: &str) -> Option<&[u8]> {
        self.assets.get(path).map(Vec::as_slice)
    }

    /// Whether the model carries no content at all.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.assets.is_empty()
    }

    /// Run the full validation pass over this model.
    ///
    /// Returns the ordered findings; see [`crate::validate`] for the rule
    /// set. The model itself is never mutated.
    pub fn validate(&self) -> Vec<Finding> {
        validate::run(self)
    }
}

/// Check an identifier against the registry naming pattern: lowercase
/// dot-segmented, no whitespace (`org.demo.invoice`).
pub fn is_valid_identifier(identifier: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let re = PATTERN
        .get_or_init(|| Regex::new(r"^[a-z0-9]+(\.[a-z0-9]+)*$").expect("identifier pattern"));
    re.is_match(identifier)
}
