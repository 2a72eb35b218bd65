//! Validation for the filter catalog.
//!
//! Runs a suite of checks against a built catalog and reports errors and
//! warnings. Hosts run this once at startup; the crate's own tests keep
//! the builtin catalog clean.

use std::fmt;

use crate::filter::FilterRegistry;
use crate::types::ParamKind;

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single validation diagnostic.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Severity level.
    pub severity: Severity,
    /// Machine-readable diagnostic code (e.g. "brix::validate::bad-default").
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

/// Collects diagnostics from validation checks.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an error diagnostic.
    pub fn error(&mut self, code: impl Into<String>, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            severity: Severity::Error,
            code: code.into(),
            message: message.into(),
        });
    }

    /// Add a warning diagnostic.
    pub fn warning(&mut self, code: impl Into<String>, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            severity: Severity::Warning,
            code: code.into(),
            message: message.into(),
        });
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Check if there are no diagnostics at all.
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Count errors.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    /// Iterate over diagnostics.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }
}

/// Run all validation checks against a filter catalog.
pub fn validate_catalog(registry: &FilterRegistry) -> ValidationResult {
    let mut result = ValidationResult::new();

    for filter in registry.filters() {
        for spec in &filter.schema {
            match &spec.kind {
                ParamKind::Numeric { min, max, default } => {
                    if min > max {
                        result.error(
                            "brix::validate::inverted-bounds",
                            format!("{}.{}: min {} exceeds max {}", filter.id, spec.name, min, max),
                        );
                    }
                    if default < min || default > max {
                        result.error(
                            "brix::validate::bad-default",
                            format!(
                                "{}.{}: default {} outside [{}, {}]",
                                filter.id, spec.name, default, min, max
                            ),
                        );
                    }
                }
                ParamKind::Boolean { .. } => {}
                ParamKind::Choice { options, default } => {
                    if options.is_empty() {
                        result.error(
                            "brix::validate::empty-options",
                            format!("{}.{}: choice has no options", filter.id, spec.name),
                        );
                    } else if !options.contains(default) {
                        result.error(
                            "brix::validate::bad-default",
                            format!(
                                "{}.{}: default '{}' not in the options list",
                                filter.id, spec.name, default
                            ),
                        );
                    }
                    let mut deduped = options.clone();
                    deduped.sort_unstable();
                    deduped.dedup();
                    if deduped.len() != options.len() {
                        result.warning(
                            "brix::validate::duplicate-options",
                            format!("{}.{}: duplicate options", filter.id, spec.name),
                        );
                    }
                }
            }
        }

        // Duplicate parameter names within one schema
        let mut names: Vec<&str> = filter.schema.iter().map(|s| s.name).collect();
        names.sort_unstable();
        let before = names.len();
        names.dedup();
        if names.len() != before {
            result.error(
                "brix::validate::duplicate-params",
                format!("{}: duplicate parameter names", filter.id),
            );
        }
    }

    result
}
