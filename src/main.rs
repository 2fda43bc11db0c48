//! TDK CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tdk::cli::{Cli, CommandDispatcher};
use tdk::config::RegistryConfig;
use tdk::ui::{Output, OutputMode};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("tdk=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tdk=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("tdk starting with args: {:?}", cli);

    // Determine output mode
    let output_mode = if cli.quiet {
        OutputMode::Quiet
    } else if cli.verbose {
        OutputMode::Verbose
    } else {
        OutputMode::Normal
    };

    // Handle --no-color
    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    // Determine the template root
    let root = cli
        .dir
        .as_ref()
        .cloned()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());

    let out = Output::new(output_mode);

    // Resolve the registry endpoint (flag/env > config file > defaults)
    let config = match RegistryConfig::resolve(&root, cli.registry.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            out.error(&format!("Error: {}", e));
            return ExitCode::from(1);
        }
    };

    // Dispatch command
    let dispatcher = CommandDispatcher::new(root, config);

    match dispatcher.dispatch(&cli, &out) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            out.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
