//! Diagnostic records, selection, and normalization for analysis results.
//!
//! The analysis engine produces raw [`DiagnosticRecord`]s. This crate narrows
//! them to the modules a caller asked about ([`filter`]), normalizes them into
//! [`FormattedDiagnostic`]s ([`format`]), and renders those for terminal or
//! JSON output ([`OutputRenderer`]).

#![warn(missing_docs)]

pub mod format;
pub mod record;
pub mod renderer;
pub mod selector;
pub mod severity;

pub use format::{format, FormattedDiagnostic, RecordRenderer};
pub use record::{DiagnosticRecord, Location};
pub use renderer::{JsonRenderer, OutputRenderer, TextRenderer};
pub use selector::{filter, ParseSelectorError, Selector};
pub use severity::Severity;
