//! Template validation.
//!
//! Structural and semantic checks beyond what the model's insertion
//! invariants already guarantee. Each check is a [`ValidationRule`]; the
//! full pass runs every rule in a fixed order, so repeated runs over an
//! unmodified model yield identical findings.
//!
//! Findings are collected, never raised: `verify` and `put` decide
//! pass/fail by looking for `Error`-tagged findings.

pub mod finding;
pub mod rules;

pub use finding::{CheckId, Finding, Severity};
pub use rules::{all_rules, ValidationRule};

use crate::template::model::TemplateModel;

/// Run the full rule set over a model, in registration order.
pub fn run(model: &TemplateModel) -> Vec<Finding> {
    let mut findings = Vec::new();
    for rule in all_rules() {
        findings.extend(rule.check(model));
    }
    findings
}

/// Whether any finding blocks packaging/publishing.
pub fn has_errors(findings: &[Finding]) -> bool {
    findings.iter().any(|f| f.severity == Severity::Error)
}

/// Count of `Error`-tagged findings.
pub fn error_count(findings: &[Finding]) -> usize {
    findings
        .iter()
        .filter(|f| f.severity == Severity::Error)
        .count()
}
