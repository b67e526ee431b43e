//! The analysis engine abstraction.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use pltsync_diagnostics::{DiagnosticRecord, RecordRenderer};

use crate::error::EngineError;
use crate::request::EngineRequest;

/// A static analyzer operating on a persisted lookup table.
///
/// Every call is a blocking request/response. Implementations must not be
/// invoked concurrently for the same PLT; callers serialize access with a
/// per-PLT lock.
pub trait AnalysisEngine: RecordRenderer {
    /// Executes one request.
    ///
    /// Build, add and remove return no records on success. Check returns
    /// the findings in engine order.
    fn run(&self, request: &EngineRequest) -> Result<Vec<DiagnosticRecord>, EngineError>;

    /// Returns the object files currently recorded in `plt`.
    fn plt_files(&self, plt: &Path) -> Result<BTreeSet<PathBuf>, EngineError>;
}
