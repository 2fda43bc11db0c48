//! Comparison and diff reporting.
//!
//! [`compare`] reduces a local/remote pair to a [`SyncStatus`]; the
//! command surface decides policy from the tag. [`DiffSummary`] is the
//! machine-readable report attached to `Conflicted` failures: which
//! paths differ, and which metadata fields differ.

use serde::{Deserialize, Serialize};

use crate::template::model::TemplateModel;
use crate::template::version::Version;

/// Outcome of comparing local state against remote state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    /// Fingerprints match; nothing to do.
    InSync,
    /// No remote copy exists.
    LocalOnly,
    /// No local copy exists.
    RemoteOnly,
    /// Same version, different content: only an explicit directional
    /// choice resolves this.
    Diverged,
    /// Local version is ahead of remote.
    LocalNewer,
    /// Remote version is ahead of local.
    RemoteNewer,
}

/// Compare local and remote copies of a template.
///
/// Content identity is fingerprint equality; direction is decided by
/// semantic version order. Unparseable versions cannot be ordered, so
/// differing content at an unordered version pair reports `Diverged`.
pub fn compare(local: Option<&TemplateModel>, remote: Option<&TemplateModel>) -> SyncStatus {
    match (local, remote) {
        (None, None) => SyncStatus::InSync,
        (Some(_), None) => SyncStatus::LocalOnly,
        (None, Some(_)) => SyncStatus::RemoteOnly,
        (Some(local), Some(remote)) => {
            if local.fingerprint() == remote.fingerprint() {
                return SyncStatus::InSync;
            }
            match (
                Version::parse(&local.version),
                Version::parse(&remote.version),
            ) {
                (Ok(l), Ok(r)) if l > r => SyncStatus::LocalNewer,
                (Ok(l), Ok(r)) if l < r => SyncStatus::RemoteNewer,
                _ => SyncStatus::Diverged,
            }
        }
    }
}

/// Machine-readable summary of how two template instances differ.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    /// Paths present locally but not remotely.
    pub local_only: Vec<String>,
    /// Paths present remotely but not locally.
    pub remote_only: Vec<String>,
    /// Paths present on both sides with different content.
    pub changed: Vec<String>,
    /// Metadata/descriptor fields that differ.
    pub fields: Vec<String>,
}

impl DiffSummary {
    /// Compute the diff between a local and a remote instance.
    pub fn between(local: &TemplateModel, remote: &TemplateModel) -> Self {
        let mut summary = Self::default();

        let local_paths = || local.files().iter().chain(local.assets());
        let remote_paths = || remote.files().iter().chain(remote.assets());

        for (path, content) in local_paths() {
            match remote.file(path).or_else(|| remote.asset(path)) {
                None => summary.local_only.push(path.clone()),
                Some(remote_content) if remote_content != content.as_slice() => {
                    summary.changed.push(path.clone());
                }
                Some(_) => {}
            }
        }
        for (path, _) in remote_paths() {
            if local.file(path).is_none() && local.asset(path).is_none() {
                summary.remote_only.push(path.clone());
            }
        }
        summary.local_only.sort();
        summary.remote_only.sort();
        summary.changed.sort();

        if local.identifier != remote.identifier {
            summary.fields.push("identifier".into());
        }
        if local.version != remote.version {
            summary.fields.push("version".into());
        }
        if local.metadata.name != remote.metadata.name {
            summary.fields.push("metadata.name".into());
        }
        if local.metadata.description != remote.metadata.description {
            summary.fields.push("metadata.description".into());
        }
        if local.metadata.license != remote.metadata.license {
            summary.fields.push("metadata.license".into());
        }
        if local.metadata.allowed_formats != remote.metadata.allowed_formats {
            summary.fields.push("metadata.allowed_formats".into());
        }
        if local.formats != remote.formats {
            summary.fields.push("formats".into());
        }

        summary
    }

    /// Whether the two instances were identical.
    pub fn is_empty(&self) -> bool {
        self.local_only.is_empty()
            && self.remote_only.is_empty()
            && self.changed.is_empty()
            && self.fields.is_empty()
    }

    /// Render as pretty JSON for the conflict report.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
