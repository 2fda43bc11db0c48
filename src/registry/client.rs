//! The registry client contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::template::model::TemplateModel;

/// One published template version, as listed by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteEntry {
    pub identifier: String,
    pub version: String,
    /// When the version was published, if the registry records it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

/// Abstract interface to the remote template registry.
///
/// The operation contracts below are binding; the transport is not.
pub trait RegistryClient {
    /// List all template versions visible to the caller's credentials.
    fn list(&self) -> Result<Vec<RemoteEntry>>;

    /// Fetch one template instance.
    ///
    /// Fails with `NotFound` when the registry holds nothing at this
    /// identifier and version.
    fn fetch(&self, identifier: &str, version: &str) -> Result<TemplateModel>;

    /// Publish a template instance.
    ///
    /// Fails with `VersionConflict` when a different fingerprint is
    /// already published at this identifier and version, unless `force`
    /// is set.
    fn publish(&self, model: &TemplateModel, force: bool) -> Result<()>;
}
