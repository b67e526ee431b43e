//! Diagnostic severity levels ordered from least to most severe.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The severity level of a formatted diagnostic.
///
/// Ordered from least severe (`Warning`) to most severe (`Error`), matching the
/// derived `PartialOrd`/`Ord` implementation based on declaration order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A discrepancy reported by the analyzer.
    Warning,
    /// A finding the engine explicitly tagged as an error.
    Error,
}

impl Severity {
    /// Maps an engine kind tag to a severity.
    ///
    /// The analyzer reports warnings; only a kind tag of exactly `error`
    /// is treated as an error.
    pub fn from_kind(kind: &str) -> Self {
        if kind == "error" {
            Severity::Error
        } else {
            Severity::Warning
        }
    }

    /// Returns `true` if this severity is [`Error`](Severity::Error).
    pub fn is_error(self) -> bool {
        self == Severity::Error
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}
