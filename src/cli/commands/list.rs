//! List command implementation.
//!
//! `tdk list` prints the registry's published template versions.

use crate::cli::args::ListArgs;
use crate::config::RegistryConfig;
use crate::error::Result;
use crate::registry::{HttpRegistryClient, RegistryClient, RemoteEntry};
use crate::ui::{Output, OutputMode, ProgressSpinner};

use super::dispatcher::{Command, CommandResult};

/// The list command implementation.
pub struct ListCommand {
    config: RegistryConfig,
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(config: &RegistryConfig, args: ListArgs) -> Self {
        Self {
            config: config.clone(),
            args,
        }
    }

    /// Render entries as aligned columns.
    fn render_table(entries: &[RemoteEntry], out: &Output) {
        let id_width = entries
            .iter()
            .map(|e| e.identifier.len())
            .max()
            .unwrap_or(0)
            .max("IDENTIFIER".len());
        let version_width = entries
            .iter()
            .map(|e| e.version.len())
            .max()
            .unwrap_or(0)
            .max("VERSION".len());

        out.message(&format!(
            "{:id_width$}  {:version_width$}  PUBLISHED",
            "IDENTIFIER", "VERSION"
        ));
        for entry in entries {
            let published = entry
                .published_at
                .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
                .unwrap_or_else(|| "-".to_string());
            out.message(&format!(
                "{:id_width$}  {:version_width$}  {}",
                entry.identifier, entry.version, published
            ));
        }
    }
}

impl Command for ListCommand {
    fn execute(&self, out: &Output) -> Result<CommandResult> {
        let client = HttpRegistryClient::new(&self.config)?;

        let spinner = ProgressSpinner::maybe(
            &format!("Listing templates from {}", client.base_url()),
            out.mode() != OutputMode::Quiet && !self.args.json,
        );
        let result = client.list();
        spinner.finish_clear();
        let entries = result?;

        if self.args.json {
            println!("{}", serde_json::to_string_pretty(&entries).unwrap_or_default());
            return Ok(CommandResult::success());
        }

        if entries.is_empty() {
            out.message("No templates published.");
        } else {
            Self::render_table(&entries, out);
        }

        Ok(CommandResult::success())
    }
}
