//! Built-in validation rules.
//!
//! Each rule checks one concern and produces findings; [`all_rules`]
//! returns the fixed-order rule set that [`super::run`] executes. Order
//! matters only for finding stability, not correctness.

use std::collections::BTreeSet;

use super::finding::{CheckId, Finding, Severity};
use crate::template::model::{is_valid_identifier, TemplateModel};
use crate::template::paths::check_relative_path;
use crate::template::version::Version;

/// A validation rule over a template model.
pub trait ValidationRule: Send + Sync {
    /// Unique identifier for this rule.
    fn id(&self) -> CheckId;

    /// Description of what this rule checks.
    fn description(&self) -> &str;

    /// Check the model and return any findings.
    fn check(&self, model: &TemplateModel) -> Vec<Finding>;
}

/// The built-in rule set, in fixed execution order.
pub fn all_rules() -> Vec<Box<dyn ValidationRule>> {
    vec![
        Box::new(IdentifierPatternRule),
        Box::new(VersionSyntaxRule),
        Box::new(RequiredMetadataRule),
        Box::new(FormatReferencesRule),
        Box::new(AllowedFormatsRule),
        Box::new(PathSafetyRule),
        Box::new(DuplicateFormatFilesRule),
    ]
}

/// Identifier must be lowercase, dot-segmented, no whitespace.
pub struct IdentifierPatternRule;

impl ValidationRule for IdentifierPatternRule {
    fn id(&self) -> CheckId {
        CheckId::new("identifier-pattern")
    }

    fn description(&self) -> &str {
        "Identifier matches the registry naming pattern"
    }

    fn check(&self, model: &TemplateModel) -> Vec<Finding> {
        if is_valid_identifier(&model.identifier) {
            return vec![];
        }
        vec![Finding::new(
            self.id(),
            Severity::Error,
            format!(
                "identifier '{}' must be lowercase dot-segmented (e.g. org.demo)",
                model.identifier
            ),
        )]
    }
}

/// Version must parse as a semantic version.
pub struct VersionSyntaxRule;

impl ValidationRule for VersionSyntaxRule {
    fn id(&self) -> CheckId {
        CheckId::new("version-syntax")
    }

    fn description(&self) -> &str {
        "Version parses as a semantic version"
    }

    fn check(&self, model: &TemplateModel) -> Vec<Finding> {
        match Version::parse(&model.version) {
            Ok(_) => vec![],
            Err(_) => vec![Finding::new(
                self.id(),
                Severity::Error,
                format!(
                    "version '{}' is not a semantic version (MAJOR.MINOR.PATCH)",
                    model.version
                ),
            )],
        }
    }
}

/// Required metadata fields must be present and non-empty.
pub struct RequiredMetadataRule;

impl ValidationRule for RequiredMetadataRule {
    fn id(&self) -> CheckId {
        CheckId::new("required-metadata")
    }

    fn description(&self) -> &str {
        "Required metadata fields are present and non-empty"
    }

    fn check(&self, model: &TemplateModel) -> Vec<Finding> {
        let mut findings = Vec::new();
        if model.metadata.name.trim().is_empty() {
            findings.push(Finding::new(
                self.id(),
                Severity::Error,
                "metadata field 'name' is empty",
            ));
        }
        if model.metadata.description.trim().is_empty() {
            findings.push(Finding::new(
                self.id(),
                Severity::Error,
                "metadata field 'description' is empty",
            ));
        }
        if model
            .metadata
            .license
            .as_deref()
            .is_some_and(|l| l.trim().is_empty())
        {
            findings.push(Finding::new(
                self.id(),
                Severity::Warning,
                "metadata field 'license' is present but empty",
            ));
        }
        findings
    }
}

/// Every format descriptor must reference an existing, non-empty file.
pub struct FormatReferencesRule;

impl ValidationRule for FormatReferencesRule {
    fn id(&self) -> CheckId {
        CheckId::new("format-references")
    }

    fn description(&self) -> &str {
        "Format descriptors reference existing, non-empty template files"
    }

    fn check(&self, model: &TemplateModel) -> Vec<Finding> {
        let mut findings = Vec::new();
        for descriptor in &model.formats {
            match model.file(&descriptor.file) {
                None => findings.push(
                    Finding::new(
                        self.id(),
                        Severity::Error,
                        format!(
                            "format '{}' references '{}', which is not a template file",
                            descriptor.format, descriptor.file
                        ),
                    )
                    .with_path(&descriptor.file),
                ),
                Some(content) if content.is_empty() => findings.push(
                    Finding::new(
                        self.id(),
                        Severity::Error,
                        format!(
                            "format '{}' references '{}', which is empty",
                            descriptor.format, descriptor.file
                        ),
                    )
                    .with_path(&descriptor.file),
                ),
                Some(_) => {}
            }
        }
        findings
    }
}

/// Declared format ids should appear in `metadata.allowed_formats`.
pub struct AllowedFormatsRule;

impl ValidationRule for AllowedFormatsRule {
    fn id(&self) -> CheckId {
        CheckId::new("allowed-formats")
    }

    fn description(&self) -> &str {
        "Format ids appear in the metadata allow-list"
    }

    fn check(&self, model: &TemplateModel) -> Vec<Finding> {
        if model.metadata.allowed_formats.is_empty() {
            return vec![];
        }
        let allowed: BTreeSet<&str> = model
            .metadata
            .allowed_formats
            .iter()
            .map(String::as_str)
            .collect();
        model
            .formats
            .iter()
            .filter(|d| !allowed.contains(d.format.as_str()))
            .map(|d| {
                Finding::new(
                    self.id(),
                    Severity::Warning,
                    format!(
                        "format '{}' is not listed in metadata.allowed_formats",
                        d.format
                    ),
                )
                .with_path(&d.file)
            })
            .collect()
    }
}

/// All stored paths must stay inside the template root.
///
/// The model's checked insertion already guarantees this for content
/// trees; this rule re-checks format descriptor paths, which are plain
/// strings from the descriptor.
pub struct PathSafetyRule;

impl ValidationRule for PathSafetyRule {
    fn id(&self) -> CheckId {
        CheckId::new("path-safety")
    }

    fn description(&self) -> &str {
        "Relative paths stay within the template root"
    }

    fn check(&self, model: &TemplateModel) -> Vec<Finding> {
        model
            .formats
            .iter()
            .filter(|d| check_relative_path(&d.file).is_err())
            .map(|d| {
                Finding::new(
                    self.id(),
                    Severity::Error,
                    format!("format path '{}' escapes the template root", d.file),
                )
                .with_path(&d.file)
            })
            .collect()
    }
}

/// A file should be referenced by at most one format descriptor.
pub struct DuplicateFormatFilesRule;

impl ValidationRule for DuplicateFormatFilesRule {
    fn id(&self) -> CheckId {
        CheckId::new("duplicate-format-files")
    }

    fn description(&self) -> &str {
        "No file is referenced by more than one format descriptor"
    }

    fn check(&self, model: &TemplateModel) -> Vec<Finding> {
        let mut seen = BTreeSet::new();
        model
            .formats
            .iter()
            .filter(|d| !seen.insert(d.file.as_str()))
            .map(|d| {
                Finding::new(
                    self.id(),
                    Severity::Warning,
                    format!("file '{}' is referenced by multiple formats", d.file),
                )
                .with_path(&d.file)
            })
            .collect()
    }
}
