//! New command implementation.
//!
//! `tdk new` scaffolds a template from starter files embedded at compile
//! time. The scaffolded tree verifies clean: required metadata is filled
//! with non-empty defaults and every scaffold file gets a format
//! descriptor.

use std::path::{Path, PathBuf};

use include_dir::{include_dir, Dir};

use crate::cli::args::NewArgs;
use crate::error::{Result, TdkError};
use crate::store::{self, SaveMode};
use crate::template::model::{is_valid_identifier, Metadata, TemplateModel};
use crate::ui::Output;

use super::dispatcher::{Command, CommandResult};

/// Starter files embedded into the binary.
static SCAFFOLD: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/scaffold");

/// Version every scaffolded template starts at.
const INITIAL_VERSION: &str = "0.1.0";

/// The new command implementation.
pub struct NewCommand {
    root: PathBuf,
    dir_explicit: bool,
    args: NewArgs,
}

impl NewCommand {
    /// Create a new command for the given root.
    ///
    /// `dir_explicit` records whether the user passed `--dir`; without
    /// it, the template is scaffolded into `<root>/<identifier>`.
    pub fn new(root: &Path, dir_explicit: bool, args: NewArgs) -> Self {
        Self {
            root: root.to_path_buf(),
            dir_explicit,
            args,
        }
    }

    /// The directory the template is scaffolded into.
    pub fn target_dir(&self) -> PathBuf {
        if self.dir_explicit {
            self.root.clone()
        } else {
            self.root.join(&self.args.identifier)
        }
    }

    /// Build the scaffolded model for this command's arguments.
    fn build_model(&self) -> Result<TemplateModel> {
        let identifier = &self.args.identifier;
        let last_segment = identifier.rsplit('.').next().unwrap_or(identifier);

        let mut formats: Vec<String> = Vec::new();
        for file in SCAFFOLD.files() {
            if let Some(ext) = file.path().extension().and_then(|e| e.to_str()) {
                if !formats.iter().any(|f| f == ext) {
                    formats.push(ext.to_string());
                }
            }
        }

        let metadata = Metadata {
            name: self
                .args
                .name
                .clone()
                .unwrap_or_else(|| last_segment.to_string()),
            description: self
                .args
                .description
                .clone()
                .unwrap_or_else(|| format!("Document template {}", identifier)),
            license: None,
            allowed_formats: formats,
        };

        let mut model = TemplateModel::new(identifier.clone(), INITIAL_VERSION, metadata);
        for file in SCAFFOLD.files() {
            let path = file.path().to_string_lossy().to_string();
            if let Some(ext) = file.path().extension().and_then(|e| e.to_str()) {
                model.add_format(&path, ext);
            }
            model.add_file(path, file.contents().to_vec())?;
        }

        Ok(model)
    }
}

impl Command for NewCommand {
    fn execute(&self, out: &Output) -> Result<CommandResult> {
        if !is_valid_identifier(&self.args.identifier) {
            return Err(TdkError::InvalidIdentifier {
                identifier: self.args.identifier.clone(),
            });
        }

        let target = self.target_dir();
        if store::is_template_root(&target) && !self.args.force {
            out.warning(&format!(
                "A template already exists at {}. Use --force to overwrite.",
                target.display()
            ));
            return Ok(CommandResult::failure(1));
        }

        let model = self.build_model()?;
        store::save(&target, &model, SaveMode::Merge)?;

        for path in model.files().keys() {
            out.detail(&format!("  created {}", path));
        }
        out.success(&format!(
            "Created template '{}' {} at {}",
            model.identifier,
            model.version,
            target.display()
        ));
        out.message("Edit template.json and the template files, then run 'tdk verify'.");

        Ok(CommandResult::success())
    }
}
