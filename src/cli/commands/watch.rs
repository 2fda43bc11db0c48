//! Watch command implementation.
//!
//! `tdk watch` runs the debounced watch loop: local edits re-validate
//! and republish automatically, coalescing rapid successive changes into
//! a single publish.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::args::WatchArgs;
use crate::config::RegistryConfig;
use crate::error::Result;
use crate::registry::HttpRegistryClient;
use crate::store;
use crate::sync::{watch, WatchOptions, WatchOutcome};
use crate::ui::Output;
use crate::validate::Severity;

use super::dispatcher::{Command, CommandResult};

/// The watch command implementation.
pub struct WatchCommand {
    root: PathBuf,
    config: RegistryConfig,
    args: WatchArgs,
}

impl WatchCommand {
    /// Create a new watch command.
    pub fn new(root: &Path, config: &RegistryConfig, args: WatchArgs) -> Self {
        Self {
            root: root.to_path_buf(),
            config: config.clone(),
            args,
        }
    }
}

impl Command for WatchCommand {
    fn execute(&self, out: &Output) -> Result<CommandResult> {
        // Fail fast on a directory that is not a template at all.
        store::load(&self.root)?;

        let client = HttpRegistryClient::new(&self.config)?;
        let options = WatchOptions {
            debounce: Duration::from_millis(self.args.debounce_ms),
            force: self.args.force,
        };

        out.message(&format!(
            "Watching {} (publishing to {}). Press Ctrl-C to stop.",
            self.root.display(),
            client.base_url()
        ));

        watch(
            &self.root,
            &client,
            options,
            &mut |outcome| match outcome {
                WatchOutcome::Published { model, at } => {
                    out.success(&format!(
                        "Published '{}' {} at {}",
                        model.identifier,
                        model.version,
                        at.format("%H:%M:%S")
                    ));
                }
                WatchOutcome::Unchanged => {
                    out.detail("No content change; skipping publish");
                }
                WatchOutcome::Rejected(findings) => {
                    for finding in findings {
                        match finding.severity {
                            Severity::Error => out.error(&finding.to_string()),
                            Severity::Warning => out.warning(&finding.to_string()),
                        }
                    }
                    out.warning("Validation failed; publish skipped until fixed.");
                }
            },
            &mut |error| {
                out.error(&error.to_string());
            },
        )?;

        Ok(CommandResult::success())
    }
}
