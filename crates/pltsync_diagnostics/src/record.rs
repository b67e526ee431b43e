//! Raw diagnostic records as produced by the analysis engine.

use pltsync_common::ModuleName;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A source location: file path and 1-based line number.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Location {
    /// Path of the source file the finding refers to.
    pub file: String,
    /// Line number within the file.
    pub line: u32,
}

impl Location {
    /// Creates a new location.
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

/// One finding produced by a check run.
///
/// The kind tag and payload are engine-specific and opaque here; only the
/// location is interpreted, to attribute the record to a module.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct DiagnosticRecord {
    /// Engine-specific classification of the finding.
    pub kind: String,
    /// Where the finding was reported.
    pub location: Location,
    /// Engine-specific detail, turned into text by a [`RecordRenderer`](crate::RecordRenderer).
    pub payload: serde_json::Value,
}

impl DiagnosticRecord {
    /// Creates a new record.
    pub fn new(kind: impl Into<String>, location: Location, payload: serde_json::Value) -> Self {
        Self {
            kind: kind.into(),
            location,
            payload,
        }
    }

    /// Returns the module this record belongs to, derived from the basename
    /// of its file.
    pub fn module(&self) -> Option<ModuleName> {
        ModuleName::from_path(Path::new(&self.location.file))
    }
}
