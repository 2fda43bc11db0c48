//! Terminal output and prompts.
//!
//! This module provides:
//! - [`Output`] and [`OutputMode`] for mode-aware status messages
//! - [`TdkTheme`] for styled terminal output
//! - [`ProgressSpinner`] for long-running network operations
//! - the conflict-resolution prompt used by `get`

pub mod output;
pub mod prompts;
pub mod spinner;
pub mod theme;

pub use output::{Output, OutputMode};
pub use prompts::{conflict_prompt, Resolution};
pub use spinner::ProgressSpinner;
pub use theme::{should_use_colors, TdkTheme};
