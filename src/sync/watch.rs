//! Watch mode.
//!
//! A filesystem listener feeds a debounce loop: rapid successive edits
//! coalesce into a single republish, and notifications arriving while a
//! sync is in flight drain into the next cycle. At most one sync runs at
//! a time, and a republish only happens when the fingerprint changed
//! since the last successful publish.

use std::path::{Component, Path};
use std::sync::mpsc;
use std::time::Duration;

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use notify::{RecursiveMode, Watcher};

use crate::error::{Result, TdkError};
use crate::registry::client::RegistryClient;
use crate::store;
use crate::template::model::TemplateModel;
use crate::validate::{self, Finding};

/// Watch-loop tuning.
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Quiet period after the last notification before a sync runs.
    pub debounce: Duration,
    /// Pass `force` through to publish, overriding version conflicts.
    pub force: bool,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(500),
            force: false,
        }
    }
}

/// Result of one watch-triggered sync attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchOutcome {
    /// The template was republished.
    Published {
        model: TemplateModel,
        at: DateTime<Utc>,
    },
    /// Fingerprint unchanged since the last successful publish.
    Unchanged,
    /// Validation produced `Error` findings; publish skipped.
    Rejected(Vec<Finding>),
}

/// Fingerprint-gated republisher driving each watch cycle.
#[derive(Default)]
pub struct Republisher {
    last_published: Option<String>,
}

impl Republisher {
    /// Create a republisher with no publish history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the gate with an already-published fingerprint.
    pub fn with_published(fingerprint: impl Into<String>) -> Self {
        Self {
            last_published: Some(fingerprint.into()),
        }
    }

    /// Re-validate and republish the tree if its fingerprint changed
    /// since the last successful publish.
    pub fn sync_once(
        &mut self,
        root: &Path,
        registry: &dyn RegistryClient,
        force: bool,
    ) -> Result<WatchOutcome> {
        let model = store::load(root)?;
        let fingerprint = model.fingerprint();

        if self.last_published.as_deref() == Some(fingerprint.as_str()) {
            return Ok(WatchOutcome::Unchanged);
        }

        let findings = validate::run(&model);
        if validate::has_errors(&findings) {
            return Ok(WatchOutcome::Rejected(findings));
        }

        registry.publish(&model, force)?;
        self.last_published = Some(fingerprint);
        Ok(WatchOutcome::Published {
            model,
            at: Utc::now(),
        })
    }
}

/// Whether a notification path is template content (hidden entries and
/// the `.tdk` work directory never trigger a sync).
fn is_relevant(root: &Path, path: &Path) -> bool {
    let rel = match path.strip_prefix(root) {
        Ok(rel) => rel,
        Err(_) => return false,
    };
    !rel.components().any(|component| match component {
        Component::Normal(name) => name.to_str().is_some_and(|n| n.starts_with('.')),
        _ => false,
    })
}

/// Run the watch loop until the listener shuts down.
///
/// Each completed cycle is reported through `on_outcome`; sync failures
/// are reported through `on_error` and the loop keeps running, so a
/// transient registry outage never ends a watch session.
pub fn watch(
    root: &Path,
    registry: &dyn RegistryClient,
    options: WatchOptions,
    on_outcome: &mut dyn FnMut(&WatchOutcome),
    on_error: &mut dyn FnMut(&TdkError),
) -> Result<()> {
    let (tx, rx) = mpsc::channel();
    let watch_root = root.to_path_buf();

    let mut watcher = notify::recommended_watcher(move |event: notify::Result<notify::Event>| {
        if let Ok(event) = event {
            if event
                .paths
                .iter()
                .any(|path| is_relevant(&watch_root, path))
            {
                let _ = tx.send(());
            }
        }
    })
    .map_err(|e| TdkError::Other(anyhow!("failed to create filesystem watcher: {}", e)))?;

    watcher
        .watch(root, RecursiveMode::Recursive)
        .map_err(|e| TdkError::Other(anyhow!("failed to watch {}: {}", root.display(), e)))?;

    tracing::info!("watching {} for changes", root.display());
    let mut republisher = Republisher::new();

    while rx.recv().is_ok() {
        // Coalesce until the tree has been quiet for the debounce window.
        while rx.recv_timeout(options.debounce).is_ok() {}

        match republisher.sync_once(root, registry, options.force) {
            Ok(outcome) => on_outcome(&outcome),
            Err(e) => on_error(&e),
        }
    }

    Ok(())
}
