//! Package command implementation.
//!
//! `tdk package` bundles the local tree into a portable archive. `Error`
//! findings block packaging, matching `put`.

use std::path::{Path, PathBuf};

use crate::archive::{self, ARCHIVE_EXTENSION};
use crate::cli::args::PackageArgs;
use crate::error::{Result, TdkError};
use crate::store;
use crate::ui::Output;
use crate::validate::{self, Severity};

use super::dispatcher::{Command, CommandResult};

/// The package command implementation.
pub struct PackageCommand {
    root: PathBuf,
    args: PackageArgs,
}

impl PackageCommand {
    /// Create a new package command.
    pub fn new(root: &Path, args: PackageArgs) -> Self {
        Self {
            root: root.to_path_buf(),
            args,
        }
    }

    /// The archive path, defaulting to `<identifier>-<version>.tdk` in
    /// the current directory.
    fn output_path(&self, identifier: &str, version: &str) -> PathBuf {
        self.args.output.clone().unwrap_or_else(|| {
            PathBuf::from(format!("{}-{}.{}", identifier, version, ARCHIVE_EXTENSION))
        })
    }
}

impl Command for PackageCommand {
    fn execute(&self, out: &Output) -> Result<CommandResult> {
        let model = store::load(&self.root)?;

        let findings = validate::run(&model);
        for finding in &findings {
            match finding.severity {
                Severity::Error => out.error(&finding.to_string()),
                Severity::Warning => out.warning(&finding.to_string()),
            }
        }
        if validate::has_errors(&findings) {
            out.error("Nothing was packaged.");
            return Err(TdkError::ValidationFailed {
                identifier: model.identifier,
                count: validate::error_count(&findings),
            });
        }

        let output = self.output_path(&model.identifier, &model.version);
        archive::write_archive_file(&output, &model)?;

        out.detail(&format!(
            "  {} file(s), {} asset(s)",
            model.files().len(),
            model.assets().len()
        ));
        out.success(&format!(
            "Packaged '{}' {} into {}",
            model.identifier,
            model.version,
            output.display()
        ));

        Ok(CommandResult::success())
    }
}
