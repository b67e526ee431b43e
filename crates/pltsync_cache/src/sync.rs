//! Bringing a PLT in line with the live project files.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use pltsync_engine::{AnalysisEngine, EngineRequest};
use tracing::info;

use crate::diff::PltDiff;
use crate::error::{CacheError, Stage};

/// What a synchronization pass did to the PLT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The PLT did not exist and was built from scratch.
    Built {
        /// Number of project files analyzed into it.
        files: usize,
    },
    /// The PLT existed and was updated incrementally.
    Updated {
        /// Number of files added.
        added: usize,
        /// Number of files removed.
        removed: usize,
    },
    /// The PLT already covered exactly the live files.
    UpToDate,
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncOutcome::Built { files } => write!(f, "built PLT from {files} file(s)"),
            SyncOutcome::Updated { added, removed } => {
                write!(f, "updated PLT: {added} added, {removed} removed")
            }
            SyncOutcome::UpToDate => write!(f, "PLT is up to date"),
        }
    }
}

/// Makes the PLT at `plt` cover exactly `live`.
///
/// If the PLT file does not exist it is built from `live`, merging
/// `base_plts`. Otherwise its recorded files are read back and only the
/// difference is added and removed; with no difference the engine is not
/// asked to change anything.
///
/// Any engine failure aborts the pass. A failure after a successful add
/// leaves the PLT with those additions applied.
pub fn synchronize<E>(
    engine: &E,
    live: &BTreeSet<PathBuf>,
    plt: &Path,
    base_plts: &[PathBuf],
) -> Result<SyncOutcome, CacheError>
where
    E: AnalysisEngine + ?Sized,
{
    if !plt.exists() {
        if let Some(parent) = plt.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| CacheError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        info!(plt = %plt.display(), files = live.len(), bases = base_plts.len(), "building PLT");
        engine
            .run(&EngineRequest::Build {
                files: live.iter().cloned().collect(),
                output_plt: plt.to_path_buf(),
                plts: base_plts.to_vec(),
            })
            .map_err(CacheError::Sync)?;
        return Ok(SyncOutcome::Built { files: live.len() });
    }

    let recorded = engine
        .plt_files(plt)
        .map_err(|source| CacheError::Inspect {
            stage: Stage::Synchronize,
            source,
        })?;
    let diff = PltDiff::between(live, &recorded);
    if diff.is_empty() {
        info!(plt = %plt.display(), "PLT is up to date");
        return Ok(SyncOutcome::UpToDate);
    }

    info!(
        plt = %plt.display(),
        add = diff.to_add.len(),
        remove = diff.to_remove.len(),
        "updating PLT"
    );

    if !diff.to_add.is_empty() {
        engine
            .run(&EngineRequest::Add {
                files: diff.to_add.iter().cloned().collect(),
                plt: plt.to_path_buf(),
            })
            .map_err(CacheError::Sync)?;
    }
    if !diff.to_remove.is_empty() {
        engine
            .run(&EngineRequest::Remove {
                files: diff.to_remove.iter().cloned().collect(),
                plt: plt.to_path_buf(),
            })
            .map_err(CacheError::Sync)?;
    }

    Ok(SyncOutcome::Updated {
        added: diff.to_add.len(),
        removed: diff.to_remove.len(),
    })
}
