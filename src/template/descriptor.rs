//! The `template.json` wire schema.
//!
//! The descriptor is an external contract shared with the rendering
//! worker: identifier, version, metadata, and the format list. The core
//! reads and writes this shape without altering it; file and asset
//! content never appears in the descriptor, only on disk next to it.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TdkError};
use crate::template::model::{FormatDescriptor, Metadata, TemplateModel};

/// Descriptor file name at the template root.
pub const DESCRIPTOR_FILE: &str = "template.json";

/// Serialized form of a template's identity and metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Descriptor {
    pub identifier: String,
    pub version: String,
    pub metadata: Metadata,
    #[serde(default)]
    pub formats: Vec<FormatDescriptor>,
}

impl Descriptor {
    /// Extract the descriptor fields from a model.
    pub fn from_model(model: &TemplateModel) -> Self {
        Self {
            identifier: model.identifier.clone(),
            version: model.version.clone(),
            metadata: model.metadata.clone(),
            formats: model.formats.clone(),
        }
    }

    /// Build an empty model carrying this descriptor's fields.
    pub fn into_model(self) -> TemplateModel {
        let mut model = TemplateModel::new(self.identifier, self.version, self.metadata);
        model.formats = self.formats;
        model
    }

    /// Parse descriptor bytes, mapping any schema mismatch to
    /// `MalformedDescriptor` with the serde message and the source path.
    pub fn parse(bytes: &[u8], source: &Path) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| TdkError::MalformedDescriptor {
            path: source.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Serialize to the canonical on-disk form (pretty JSON, trailing
    /// newline).
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = serde_json::to_vec_pretty(self).map_err(|e| TdkError::Other(e.into()))?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}
