//! Normalization of raw records into `(severity, file, line, message)` form.

use serde::{Deserialize, Serialize};

use crate::record::DiagnosticRecord;
use crate::severity::Severity;

/// Turns a record's opaque payload into a human-readable message.
///
/// Implemented by the analysis engine, which is the only party that knows
/// how its payloads are structured.
pub trait RecordRenderer {
    /// Renders the message for a single record.
    fn render(&self, record: &DiagnosticRecord) -> String;
}

/// A diagnostic in the uniform shape consumed by editor integrations.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct FormattedDiagnostic {
    /// Severity derived from the record's kind tag.
    pub severity: Severity,
    /// Path of the file the finding refers to.
    pub file: String,
    /// Line number within the file.
    pub line: u32,
    /// Rendered message text.
    pub message: String,
}

/// Maps each record 1:1 to a [`FormattedDiagnostic`], preserving order.
pub fn format<R>(renderer: &R, diagnostics: &[DiagnosticRecord]) -> Vec<FormattedDiagnostic>
where
    R: RecordRenderer + ?Sized,
{
    diagnostics
        .iter()
        .map(|rec| FormattedDiagnostic {
            severity: Severity::from_kind(&rec.kind),
            file: rec.location.file.clone(),
            line: rec.location.line,
            message: renderer.render(rec),
        })
        .collect()
}
