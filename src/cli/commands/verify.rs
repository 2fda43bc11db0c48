//! Verify command implementation.
//!
//! `tdk verify` loads the local tree and runs the validation pass.
//! Exit is success iff no `Error`-tagged finding exists (`--strict`
//! promotes warnings).

use std::path::{Path, PathBuf};

use crate::cli::args::VerifyArgs;
use crate::error::Result;
use crate::store;
use crate::ui::Output;
use crate::validate::{self, Severity};

use super::dispatcher::{Command, CommandResult};

/// The verify command implementation.
pub struct VerifyCommand {
    root: PathBuf,
    args: VerifyArgs,
}

impl VerifyCommand {
    /// Create a new verify command.
    pub fn new(root: &Path, args: VerifyArgs) -> Self {
        Self {
            root: root.to_path_buf(),
            args,
        }
    }
}

impl Command for VerifyCommand {
    fn execute(&self, out: &Output) -> Result<CommandResult> {
        let model = store::load(&self.root)?;
        let findings = model.validate();

        if self.args.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&findings).unwrap_or_default()
            );
        } else {
            for finding in &findings {
                match finding.severity {
                    Severity::Error => out.error(&finding.to_string()),
                    Severity::Warning => out.warning(&finding.to_string()),
                }
            }
        }

        let errors = validate::error_count(&findings);
        let warnings = findings.len() - errors;
        let failed = errors > 0 || (self.args.strict && warnings > 0);

        if failed {
            if !self.args.json {
                out.error(&format!(
                    "'{}' failed verification: {} error(s), {} warning(s)",
                    model.identifier, errors, warnings
                ));
            }
            return Ok(CommandResult::failure(1));
        }

        if !self.args.json {
            if warnings > 0 {
                out.success(&format!(
                    "'{}' verified with {} warning(s)",
                    model.identifier, warnings
                ));
            } else {
                out.success(&format!("'{}' verified", model.identifier));
            }
        }
        Ok(CommandResult::success())
    }
}
