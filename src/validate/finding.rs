//! Validation findings.
//!
//! A [`Finding`] is one issue discovered during validation, tagged with
//! the check that produced it and a severity. `Error` findings block
//! packaging and publishing; `Warning` findings are advisory only.

use serde::Serialize;

/// Unique identifier for a validation check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CheckId(pub String);

impl CheckId {
    /// Create a new check ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for CheckId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Severity of a validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Advisory; does not block packaging or publishing.
    Warning,
    /// Blocks packaging and publishing.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single issue found by a validation check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// The check that produced this finding.
    pub check: CheckId,
    /// Severity of this finding.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// Relative path the finding refers to, when it concerns one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl Finding {
    /// Create a new finding.
    pub fn new(check: CheckId, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            check,
            severity,
            message: message.into(),
            path: None,
        }
    }

    /// Attach the relative path this finding refers to.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.check, self.message)?;
        if let Some(ref path) = self.path {
            write!(f, " ({})", path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finding_creation() {
        let finding = Finding::new(CheckId::new("required-metadata"), Severity::Error, "missing");
        assert_eq!(finding.check, CheckId::new("required-metadata"));
        assert_eq!(finding.severity, Severity::Error);
        assert!(finding.path.is_none());
    }

    #[test]
    fn finding_with_path() {
        let finding = Finding::new(CheckId::new("format-refs"), Severity::Error, "missing file")
            .with_path("body.html");
        assert_eq!(finding.path.as_deref(), Some("body.html"));
    }

    #[test]
    fn finding_display_includes_severity_check_and_path() {
        let finding = Finding::new(CheckId::new("format-refs"), Severity::Warning, "odd format")
            .with_path("intro.txt");
        let rendered = finding.to_string();
        assert!(rendered.contains("warning"));
        assert!(rendered.contains("format-refs"));
        assert!(rendered.contains("intro.txt"));
    }

    #[test]
    fn severity_ordering() {
        assert!(Severity::Warning < Severity::Error);
    }

    #[test]
    fn severity_display() {
        assert_eq!(Severity::Error.to_string(), "error");
        assert_eq!(Severity::Warning.to_string(), "warning");
    }
}
