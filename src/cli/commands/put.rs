//! Put command implementation.
//!
//! `tdk put` validates the local tree and publishes it to the registry.
//! Any `Error` finding rejects the publish before the registry is
//! touched; a registry `VersionConflict` is surfaced, never retried.

use std::path::{Path, PathBuf};

use crate::cli::args::PutArgs;
use crate::config::RegistryConfig;
use crate::error::{Result, TdkError};
use crate::registry::HttpRegistryClient;
use crate::sync::{PutOutcome, SyncEngine};
use crate::ui::{Output, OutputMode, ProgressSpinner};
use crate::validate::{self, Severity};

use super::dispatcher::{Command, CommandResult};

/// The put command implementation.
pub struct PutCommand {
    root: PathBuf,
    config: RegistryConfig,
    args: PutArgs,
}

impl PutCommand {
    /// Create a new put command.
    pub fn new(root: &Path, config: &RegistryConfig, args: PutArgs) -> Self {
        Self {
            root: root.to_path_buf(),
            config: config.clone(),
            args,
        }
    }
}

impl Command for PutCommand {
    fn execute(&self, out: &Output) -> Result<CommandResult> {
        let client = HttpRegistryClient::new(&self.config)?;
        let mut engine = SyncEngine::new(&client);

        let spinner = ProgressSpinner::maybe(
            &format!("Publishing {} to {}", self.root.display(), client.base_url()),
            out.mode() != OutputMode::Quiet,
        );
        let outcome = engine.put(&self.root, self.args.force);
        spinner.finish_clear();

        match outcome? {
            PutOutcome::Published { model, warnings } => {
                for finding in warnings
                    .iter()
                    .filter(|f| f.severity == Severity::Warning)
                {
                    out.warning(&finding.to_string());
                }
                out.success(&format!(
                    "Published '{}' {}",
                    model.identifier, model.version
                ));
                Ok(CommandResult::success())
            }
            PutOutcome::Rejected { model, findings } => {
                for finding in &findings {
                    match finding.severity {
                        Severity::Error => out.error(&finding.to_string()),
                        Severity::Warning => out.warning(&finding.to_string()),
                    }
                }
                out.error("Nothing was published.");
                Err(TdkError::ValidationFailed {
                    identifier: model.identifier,
                    count: validate::error_count(&findings),
                })
            }
        }
    }
}
