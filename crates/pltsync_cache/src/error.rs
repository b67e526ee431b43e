//! Error types for PLT synchronization and checking.

use std::fmt;
use std::path::PathBuf;

use pltsync_engine::EngineError;

/// The stage of a run in which an error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Bringing the PLT in line with the live files.
    Synchronize,
    /// Checking the selected modules against the PLT.
    Check,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Synchronize => f.write_str("synchronize"),
            Stage::Check => f.write_str("check"),
        }
    }
}

/// Errors that abort a synchronize/check run.
///
/// Each engine failure is tagged with the stage it happened in. Nothing is
/// rolled back: after a [`Sync`](CacheError::Sync) failure the PLT holds
/// whatever the engine left behind, and the caller decides whether to
/// discard and rebuild it.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// Building or incrementally updating the PLT failed.
    #[error("PLT synchronization failed: {0}")]
    Sync(#[source] EngineError),

    /// The files recorded in an existing PLT could not be read.
    #[error("cannot read PLT contents during {stage}: {source}")]
    Inspect {
        /// The stage that needed the PLT's contents.
        stage: Stage,
        /// The engine's report.
        source: EngineError,
    },

    /// Checking modules against the PLT failed.
    #[error("check failed: {0}")]
    Check(#[source] EngineError),

    /// Another process holds the PLT's lock.
    #[error("PLT is locked by another process (lock file {path})")]
    Locked {
        /// The lock file another process has locked.
        path: PathBuf,
    },

    /// An I/O error occurred while preparing the PLT location.
    #[error("cache I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pltsync_engine::Operation;

    fn engine_failure() -> EngineError {
        EngineError::Failed {
            operation: Operation::Add,
            status: Some(1),
            stderr: "bad beam".to_string(),
        }
    }

    #[test]
    fn sync_display_names_stage() {
        let msg = CacheError::Sync(engine_failure()).to_string();
        assert!(msg.starts_with("PLT synchronization failed"));
        assert!(msg.contains("bad beam"));
    }

    #[test]
    fn check_display_names_stage() {
        let msg = CacheError::Check(engine_failure()).to_string();
        assert!(msg.starts_with("check failed"));
    }

    #[test]
    fn source_is_engine_error() {
        use std::error::Error;
        let err = CacheError::Inspect {
            stage: Stage::Check,
            source: engine_failure(),
        };
        assert!(err.source().is_some());
    }

    #[test]
    fn inspect_display_names_stage() {
        let err = CacheError::Inspect {
            stage: Stage::Synchronize,
            source: engine_failure(),
        };
        assert!(err
            .to_string()
            .starts_with("cannot read PLT contents during synchronize"));
    }

    #[test]
    fn locked_display() {
        let err = CacheError::Locked {
            path: PathBuf::from("/c/app.plt.lock"),
        };
        assert!(err.to_string().contains("/c/app.plt.lock"));
    }

    #[test]
    fn io_display() {
        let err = CacheError::Io {
            path: PathBuf::from("/c"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("cache I/O error"));
        assert!(msg.contains("denied"));
    }
}
