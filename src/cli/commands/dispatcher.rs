//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::config::RegistryConfig;
use crate::error::Result;
use crate::ui::Output;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution
/// logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `out` - Output writer for status and error messages
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, out: &Output) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    root: PathBuf,
    config: RegistryConfig,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given template root and registry
    /// configuration.
    pub fn new(root: PathBuf, config: RegistryConfig) -> Self {
        Self { root, config }
    }

    /// Get the template root path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the resolved registry configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, out: &Output) -> Result<CommandResult> {
        match &cli.command {
            Commands::New(args) => {
                let cmd = super::new::NewCommand::new(&self.root, cli.dir.is_some(), args.clone());
                cmd.execute(out)
            }
            Commands::List(args) => {
                let cmd = super::list::ListCommand::new(&self.config, args.clone());
                cmd.execute(out)
            }
            Commands::Get(args) => {
                let cmd = super::get::GetCommand::new(&self.root, &self.config, args.clone());
                cmd.execute(out)
            }
            Commands::Put(args) => {
                let cmd = super::put::PutCommand::new(&self.root, &self.config, args.clone());
                cmd.execute(out)
            }
            Commands::Verify(args) => {
                let cmd = super::verify::VerifyCommand::new(&self.root, args.clone());
                cmd.execute(out)
            }
            Commands::Package(args) => {
                let cmd = super::package::PackageCommand::new(&self.root, args.clone());
                cmd.execute(out)
            }
            Commands::Unpackage(args) => {
                let cmd = super::unpackage::UnpackageCommand::new(
                    &self.root,
                    cli.dir.is_some(),
                    args.clone(),
                );
                cmd.execute(out)
            }
            Commands::Watch(args) => {
                let cmd = super::watch::WatchCommand::new(&self.root, &self.config, args.clone());
                cmd.execute(out)
            }
            Commands::Completions(args) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(out)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(1);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn dispatcher_creation() {
        let dispatcher =
            CommandDispatcher::new(PathBuf::from("/work/demo"), RegistryConfig::default());
        assert_eq!(dispatcher.root(), Path::new("/work/demo"));
        assert_eq!(dispatcher.config().url, RegistryConfig::default().url);
    }
}
