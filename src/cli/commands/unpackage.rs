//! Unpackage command implementation.
//!
//! `tdk unpackage` materializes an archive as a local tree. The write is
//! authoritative (pruning mode), but an existing template is never
//! replaced without `--force`.

use std::path::{Path, PathBuf};

use crate::archive;
use crate::cli::args::UnpackageArgs;
use crate::error::Result;
use crate::store::{self, SaveMode};
use crate::ui::Output;

use super::dispatcher::{Command, CommandResult};

/// The unpackage command implementation.
pub struct UnpackageCommand {
    root: PathBuf,
    dir_explicit: bool,
    args: UnpackageArgs,
}

impl UnpackageCommand {
    /// Create a new unpackage command.
    ///
    /// `dir_explicit` records whether the user passed `--dir`; without
    /// it, the archive unpacks into `<root>/<identifier>`.
    pub fn new(root: &Path, dir_explicit: bool, args: UnpackageArgs) -> Self {
        Self {
            root: root.to_path_buf(),
            dir_explicit,
            args,
        }
    }

    fn target_dir(&self, identifier: &str) -> PathBuf {
        if self.dir_explicit {
            self.root.clone()
        } else {
            self.root.join(identifier)
        }
    }
}

impl Command for UnpackageCommand {
    fn execute(&self, out: &Output) -> Result<CommandResult> {
        let model = archive::read_archive_file(&self.args.archive)?;
        let target = self.target_dir(&model.identifier);

        if store::is_template_root(&target) && !self.args.force {
            out.warning(&format!(
                "A template already exists at {}. Use --force to overwrite.",
                target.display()
            ));
            return Ok(CommandResult::failure(1));
        }

        store::save(&target, &model, SaveMode::Prune)?;

        for path in model.files().keys().chain(model.assets().keys()) {
            out.detail(&format!("  wrote {}", path));
        }
        out.success(&format!(
            "Unpackaged '{}' {} into {}",
            model.identifier,
            model.version,
            target.display()
        ));

        Ok(CommandResult::success())
    }
}
