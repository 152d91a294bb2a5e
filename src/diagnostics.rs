//! Diagnostics
//!
//! Schema errors are collected as data during assembly and returned with the
//! registry. Nothing in the assembly pass stops on the first error.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::definition::{Definition, Location};

// =============================================================================
// Rule Kinds
// =============================================================================

/// The rule an error record was raised by
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RuleKind {
    /// Identifiers and type names must be unique within their category
    TypeNamesAreUnique,
    /// Field imports must name a type that exists
    FieldImportsExist,
    /// Field imports must not form a cycle
    NoCircularFieldImports,
}

impl RuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TypeNamesAreUnique => "A001",
            Self::FieldImportsExist => "A002",
            Self::NoCircularFieldImports => "A003",
        }
    }

    /// Longer explanation shown next to the error
    pub fn explanation(&self) -> &'static str {
        match self {
            Self::TypeNamesAreUnique => {
                "References to types and directives must be unique: each identifier \
                 and each type name may only be declared once."
            }
            Self::FieldImportsExist => {
                "Fields can only be imported from types that are defined in the schema."
            }
            Self::NoCircularFieldImports => {
                "Types cannot import fields from each other in a cycle."
            }
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Error Records
// =============================================================================

/// What an error is about
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorData {
    /// Kind of thing that is wrong, e.g. "Type name"
    pub artifact: String,
    /// The offending identifier or name
    pub value: String,
}

impl ErrorData {
    pub fn new(artifact: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            artifact: artifact.into(),
            value: value.into(),
        }
    }
}

/// A single schema error
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub rule: RuleKind,
    pub location: Location,
    pub data: ErrorData,
}

impl ErrorRecord {
    pub fn new(rule: RuleKind, location: Location, data: ErrorData) -> Self {
        Self {
            rule,
            location,
            data,
        }
    }

    /// Error located at the declaration of `definition`
    pub fn at(rule: RuleKind, definition: &Definition, data: ErrorData) -> Self {
        Self::new(rule, definition.location.clone(), data)
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {:?} is not valid ({})\n  - {}",
            self.rule,
            self.data.artifact,
            self.data.value,
            self.location,
            self.rule.explanation()
        )
    }
}

/// Format a list of errors for display
pub fn format_all(errors: &[ErrorRecord]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
