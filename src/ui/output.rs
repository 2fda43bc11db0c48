//! Output mode and writer.

use std::str::FromStr;

use super::theme::{should_use_colors, TdkTheme};

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show all output including per-file detail.
    Verbose,
    /// Show progress and status only.
    #[default]
    Normal,
    /// Show minimal output (final status only).
    Quiet,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "verbose" => Ok(Self::Verbose),
            "normal" => Ok(Self::Normal),
            "quiet" => Ok(Self::Quiet),
            _ => Err(format!("unknown output mode: {}", s)),
        }
    }
}

impl OutputMode {
    /// Check if this mode shows per-file detail.
    pub fn shows_detail(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Check if this mode shows status messages.
    pub fn shows_status(&self) -> bool {
        !matches!(self, Self::Quiet)
    }
}

/// Output writer that respects output mode.
#[derive(Debug)]
pub struct Output {
    mode: OutputMode,
    theme: TdkTheme,
}

impl Output {
    /// Create a new output writer, picking colors from the environment.
    pub fn new(mode: OutputMode) -> Self {
        let theme = if should_use_colors() {
            TdkTheme::new()
        } else {
            TdkTheme::plain()
        };
        Self { mode, theme }
    }

    /// Get the output mode.
    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Write a plain status line.
    pub fn message(&self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    /// Write a success line; shown in every mode.
    pub fn success(&self, msg: &str) {
        println!("{}", self.theme.format_success(msg));
    }

    /// Write a warning line.
    pub fn warning(&self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_warning(msg));
        }
    }

    /// Write an error line to stderr; shown in every mode.
    pub fn error(&self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    /// Write per-file detail in verbose mode.
    pub fn detail(&self, msg: &str) {
        if self.mode.shows_detail() {
            println!("{}", self.theme.dim.apply_to(msg));
        }
    }
}
