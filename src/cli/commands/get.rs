//! Get command implementation.
//!
//! `tdk get` fetches a template from the registry into the local tree.
//! Divergent local content is never overwritten silently: the command
//! reports the diff and, when interactive, asks for a directional choice.

use std::path::{Path, PathBuf};

use console::Term;

use crate::cli::args::GetArgs;
use crate::config::RegistryConfig;
use crate::error::{Result, TdkError};
use crate::registry::HttpRegistryClient;
use crate::sync::{GetOutcome, SyncEngine};
use crate::ui::{conflict_prompt, Output, OutputMode, ProgressSpinner, Resolution};

use super::dispatcher::{Command, CommandResult};

/// The get command implementation.
pub struct GetCommand {
    root: PathBuf,
    config: RegistryConfig,
    args: GetArgs,
}

impl GetCommand {
    /// Create a new get command.
    pub fn new(root: &Path, config: &RegistryConfig, args: GetArgs) -> Self {
        Self {
            root: root.to_path_buf(),
            config: config.clone(),
            args,
        }
    }

    fn run_get(&self, overwrite: bool, out: &Output) -> Result<GetOutcome> {
        let client = HttpRegistryClient::new(&self.config)?;
        let mut engine = SyncEngine::new(&client);

        let spinner = ProgressSpinner::maybe(
            &format!("Fetching {} {}", self.args.identifier, self.args.version),
            out.mode() != OutputMode::Quiet,
        );
        let outcome = engine.get(&self.root, &self.args.identifier, &self.args.version, overwrite);
        spinner.finish_clear();
        outcome
    }

    fn report(&self, outcome: &GetOutcome, out: &Output) {
        match outcome {
            GetOutcome::Fetched(model) => {
                for path in model.files().keys().chain(model.assets().keys()) {
                    out.detail(&format!("  wrote {}", path));
                }
                out.success(&format!(
                    "Fetched '{}' {} into {}",
                    model.identifier,
                    model.version,
                    self.root.display()
                ));
            }
            GetOutcome::AlreadyInSync(model) => {
                out.success(&format!(
                    "'{}' {} is already in sync",
                    model.identifier, model.version
                ));
            }
        }
    }
}

impl Command for GetCommand {
    fn execute(&self, out: &Output) -> Result<CommandResult> {
        match self.run_get(self.args.overwrite, out) {
            Ok(outcome) => {
                self.report(&outcome, out);
                Ok(CommandResult::success())
            }
            Err(TdkError::Conflicted {
                identifier,
                version,
                diff,
            }) => {
                out.warning(&format!(
                    "Local copy of '{}' {} differs from the registry:",
                    identifier, version
                ));
                out.message(&diff.to_json());

                let term = Term::stderr();
                if term.is_term() {
                    match conflict_prompt(&identifier, &version, &term)? {
                        Resolution::TakeRemote => {
                            let outcome = self.run_get(true, out)?;
                            self.report(&outcome, out);
                            return Ok(CommandResult::success());
                        }
                        Resolution::KeepLocal => {
                            out.message("Keeping local copy; registry untouched.");
                            return Ok(CommandResult::success());
                        }
                        Resolution::Abort => {}
                    }
                } else {
                    out.message("Re-run with --overwrite to take the registry copy.");
                }

                Ok(CommandResult::failure(1))
            }
            Err(e) => Err(e),
        }
    }
}
