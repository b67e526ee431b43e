//! Error types for engine invocations.

use std::path::PathBuf;

use crate::request::Operation;

/// Errors reported by the analysis engine.
///
/// None of these are retried: a failed mutation may have left the PLT
/// partially updated, and only the caller can decide what to do with it.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The engine executable could not be started.
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        /// The executable that failed to start.
        program: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The engine ran but reported failure.
    #[error("{operation} failed (exit status {}): {stderr}", status_text(.status))]
    Failed {
        /// The operation that failed.
        operation: Operation,
        /// Exit code, or `None` if the process was killed by a signal.
        status: Option<i32>,
        /// Captured diagnostic output from the engine.
        stderr: String,
    },

    /// A PLT's recorded file list could not be read.
    #[error("unreadable PLT info for {plt}: {reason}")]
    MalformedPltInfo {
        /// The PLT that was inspected.
        plt: PathBuf,
        /// Description of what was wrong.
        reason: String,
    },

    /// The runtime did not report a usable standard-library root.
    #[error("could not determine the OTP library root: {0}")]
    OtpRoot(String),
}

fn status_text(status: &Option<i32>) -> String {
    match status {
        Some(code) => code.to_string(),
        None => "signal".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_display() {
        let err = EngineError::Spawn {
            program: "dialyzer".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let msg = err.to_string();
        assert!(msg.contains("failed to run `dialyzer`"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn failed_display() {
        let err = EngineError::Failed {
            operation: Operation::Add,
            status: Some(1),
            stderr: "Could not scan the following file(s)".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "add failed (exit status 1): Could not scan the following file(s)"
        );
    }

    #[test]
    fn failed_by_signal_display() {
        let err = EngineError::Failed {
            operation: Operation::Check,
            status: None,
            stderr: String::new(),
        };
        assert!(err.to_string().contains("exit status signal"));
    }

    #[test]
    fn malformed_plt_info_display() {
        let err = EngineError::MalformedPltInfo {
            plt: PathBuf::from("/tmp/app.plt"),
            reason: "missing file list".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/app.plt"));
        assert!(msg.contains("missing file list"));
    }
}
