//! Progress spinners.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use super::theme::TdkTheme;

/// A progress spinner for long-running registry operations.
pub struct ProgressSpinner {
    bar: ProgressBar,
}

impl ProgressSpinner {
    /// Create a new spinner with a message.
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        Self { bar }
    }

    /// Create a spinner that doesn't show (for quiet mode).
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Create a spinner respecting the quiet flag.
    pub fn maybe(message: &str, visible: bool) -> Self {
        if visible {
            Self::new(message)
        } else {
            Self::hidden()
        }
    }

    /// Update the spinner message.
    pub fn set_message(&self, msg: &str) {
        self.bar.set_message(msg.to_string());
    }

    /// Finish and replace the spinner with a success line.
    pub fn finish_success(&self, msg: &str) {
        let theme = TdkTheme::new();
        self.bar
            .set_style(ProgressStyle::default_spinner().template("{msg}").unwrap());
        self.bar.finish_with_message(theme.format_success(msg));
    }

    /// Finish and clear the spinner, leaving output to the caller.
    pub fn finish_clear(&self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_spinner_is_hidden() {
        let spinner = ProgressSpinner::hidden();
        assert!(spinner.bar.is_hidden());
    }

    #[test]
    fn maybe_respects_visibility() {
        let spinner = ProgressSpinner::maybe("working", false);
        assert!(spinner.bar.is_hidden());
    }
}
