//! Interactive prompts.

use console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;

use crate::error::{Result, TdkError};

/// Convert dialoguer errors to TdkError.
fn map_dialoguer_err(e: dialoguer::Error) -> TdkError {
    TdkError::Io(e.into())
}

/// Dialoguer theme without the default yellow `?` prefix.
fn prompt_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("".to_string()),
        ..ColorfulTheme::default()
    }
}

/// The caller's directional choice for a diverged template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Keep the local tree; the registry copy stays as-is.
    KeepLocal,
    /// Overwrite the local tree with the registry copy.
    TakeRemote,
    /// Do nothing and fail the operation.
    Abort,
}

/// Ask the user how to resolve a local/remote divergence.
///
/// Divergent content is never merged; this prompt is the explicit
/// directional choice the sync engine requires.
pub fn conflict_prompt(identifier: &str, version: &str, term: &Term) -> Result<Resolution> {
    let choices = [
        "Keep local (leave the working tree as-is)",
        "Take remote (overwrite local files)",
        "Abort",
    ];

    let selection = Select::with_theme(&prompt_theme())
        .with_prompt(format!(
            "'{}' {} differs between local and registry",
            identifier, version
        ))
        .items(&choices)
        .default(0)
        .interact_on(term)
        .map_err(map_dialoguer_err)?;

    Ok(match selection {
        0 => Resolution::KeepLocal,
        1 => Resolution::TakeRemote,
        _ => Resolution::Abort,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_is_copyable_and_comparable() {
        let choice = Resolution::TakeRemote;
        let copy = choice;
        assert_eq!(choice, copy);
        assert_ne!(Resolution::KeepLocal, Resolution::Abort);
    }
}
