//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// TDK - Template development kit.
#[derive(Debug, Parser)]
#[command(name = "tdk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Registry endpoint (overrides .tdk/config.yml)
    #[arg(short, long, global = true, env = "TDK_REGISTRY")]
    pub registry: Option<String>,

    /// Path to the template root (overrides current directory)
    #[arg(short, long, global = true)]
    pub dir: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scaffold a new template
    New(NewArgs),

    /// List templates published in the registry
    List(ListArgs),

    /// Fetch a template from the registry into the local tree
    Get(GetArgs),

    /// Validate and publish the local tree to the registry
    Put(PutArgs),

    /// Check the local tree for consistency and schema conformance
    Verify(VerifyArgs),

    /// Bundle the local tree into a portable archive
    Package(PackageArgs),

    /// Unbundle an archive into a local tree
    Unpackage(UnpackageArgs),

    /// Republish automatically when local files change
    Watch(WatchArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `new` command.
#[derive(Debug, Clone, clap::Args)]
pub struct NewArgs {
    /// Identifier for the new template (lowercase, dot-segmented)
    pub identifier: String,

    /// Display name (defaults to the identifier's last segment)
    #[arg(long)]
    pub name: Option<String>,

    /// Short description
    #[arg(long)]
    pub description: Option<String>,

    /// Overwrite an existing template at the target directory
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `get` command.
#[derive(Debug, Clone, clap::Args)]
#[command(disable_version_flag = true)]
pub struct GetArgs {
    /// Template identifier
    pub identifier: String,

    /// Template version
    pub version: String,

    /// Overwrite diverged local content with the registry copy
    #[arg(long)]
    pub overwrite: bool,
}

/// Arguments for the `put` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct PutArgs {
    /// Publish even if a different fingerprint exists at this version
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `verify` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct VerifyArgs {
    /// Output findings as JSON
    #[arg(long)]
    pub json: bool,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the `package` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct PackageArgs {
    /// Archive path (defaults to <identifier>-<version>.tdk)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `unpackage` command.
#[derive(Debug, Clone, clap::Args)]
pub struct UnpackageArgs {
    /// Archive file to unbundle
    pub archive: PathBuf,

    /// Overwrite an existing template at the target directory
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `watch` command.
#[derive(Debug, Clone, clap::Args)]
pub struct WatchArgs {
    /// Quiet period in milliseconds before a change triggers a republish
    #[arg(long, default_value_t = 500)]
    pub debounce_ms: u64,

    /// Publish even if a different fingerprint exists at this version
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
