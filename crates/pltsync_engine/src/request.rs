//! Engine operation modes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// The operations the engine performs, without their parameters.
///
/// The first four are the [`EngineRequest`] modes; `Inspect` reads a PLT's
/// recorded file list.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Create a PLT from scratch.
    Build,
    /// Add files to an existing PLT.
    Add,
    /// Remove files from an existing PLT.
    Remove,
    /// Analyze files against an existing PLT.
    Check,
    /// Read the files an existing PLT records.
    Inspect,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Build => write!(f, "build"),
            Operation::Add => write!(f, "add"),
            Operation::Remove => write!(f, "remove"),
            Operation::Check => write!(f, "check"),
            Operation::Inspect => write!(f, "inspect"),
        }
    }
}

/// A single engine invocation.
///
/// Each variant carries exactly the parameters its mode requires. For the
/// incremental modes and for checking, the PLT is both the input and the
/// output; only a build may merge base PLTs.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "lowercase")]
pub enum EngineRequest {
    /// Build `output_plt` from `files`, merging the analyses in `plts`.
    Build {
        /// Object files to analyze into the new PLT.
        files: Vec<PathBuf>,
        /// Where to write the new PLT.
        output_plt: PathBuf,
        /// Base PLTs to merge.
        plts: Vec<PathBuf>,
    },
    /// Add `files` to `plt` in place.
    Add {
        /// Object files to add.
        files: Vec<PathBuf>,
        /// The PLT to update.
        plt: PathBuf,
    },
    /// Remove `files` from `plt` in place.
    Remove {
        /// Object files to remove.
        files: Vec<PathBuf>,
        /// The PLT to update.
        plt: PathBuf,
    },
    /// Check `files` against `plt` without changing its contents.
    Check {
        /// Object files to check.
        files: Vec<PathBuf>,
        /// The PLT to check against.
        plt: PathBuf,
    },
}

impl EngineRequest {
    /// Returns which mode this request is.
    pub fn operation(&self) -> Operation {
        match self {
            EngineRequest::Build { .. } => Operation::Build,
            EngineRequest::Add { .. } => Operation::Add,
            EngineRequest::Remove { .. } => Operation::Remove,
            EngineRequest::Check { .. } => Operation::Check,
        }
    }

    /// Returns the files this request operates on.
    pub fn files(&self) -> &[PathBuf] {
        match self {
            EngineRequest::Build { files, .. }
            | EngineRequest::Add { files, .. }
            | EngineRequest::Remove { files, .. }
            | EngineRequest::Check { files, .. } => files,
        }
    }

    /// Returns the PLT this request writes to (or checks against).
    pub fn plt(&self) -> &Path {
        match self {
            EngineRequest::Build { output_plt, .. } => output_plt,
            EngineRequest::Add { plt, .. }
            | EngineRequest::Remove { plt, .. }
            | EngineRequest::Check { plt, .. } => plt,
        }
    }

    /// Returns `true` if the request changes the PLT's contents.
    pub fn mutates_plt(&self) -> bool {
        !matches!(self, EngineRequest::Check { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files() -> Vec<PathBuf> {
        vec![PathBuf::from("a.beam"), PathBuf::from("b.beam")]
    }

    #[test]
    fn accessors() {
        let req = EngineRequest::Build {
            files: files(),
            output_plt: PathBuf::from("out.plt"),
            plts: vec![PathBuf::from("base.plt")],
        };
        assert_eq!(req.operation(), Operation::Build);
        assert_eq!(req.files().len(), 2);
        assert_eq!(req.plt(), Path::new("out.plt"));
        assert!(req.mutates_plt());

        let req = EngineRequest::Check {
            files: files(),
            plt: PathBuf::from("p.plt"),
        };
        assert_eq!(req.operation(), Operation::Check);
        assert_eq!(req.plt(), Path::new("p.plt"));
        assert!(!req.mutates_plt());
    }

    #[test]
    fn incremental_modes_mutate() {
        let add = EngineRequest::Add {
            files: files(),
            plt: PathBuf::from("p.plt"),
        };
        let remove = EngineRequest::Remove {
            files: files(),
            plt: PathBuf::from("p.plt"),
        };
        assert!(add.mutates_plt());
        assert!(remove.mutates_plt());
        assert_eq!(remove.operation().to_string(), "remove");
    }

    #[test]
    fn serde_tagged() {
        let req = EngineRequest::Remove {
            files: vec![PathBuf::from("x.beam")],
            plt: PathBuf::from("p.plt"),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"operation\":\"remove\""));
        let back: EngineRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, req);
    }
}
