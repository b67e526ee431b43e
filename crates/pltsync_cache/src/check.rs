//! Checking selected modules against a synchronized PLT.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use pltsync_common::{ModuleRegistry, Origin};
use pltsync_diagnostics::{DiagnosticRecord, Selector};
use pltsync_engine::{AnalysisEngine, EngineRequest};
use tracing::{debug, info};

use crate::error::{CacheError, Stage};

/// Returns the object files of selected, loaded modules that the PLT records.
///
/// Modules that are not loaded, not file-backed, or not yet in the PLT are
/// skipped.
pub fn check_files<R>(
    registry: &R,
    selector: &Selector,
    recorded: &BTreeSet<PathBuf>,
) -> BTreeSet<PathBuf>
where
    R: ModuleRegistry + ?Sized,
{
    let origins: Vec<Origin> = match selector {
        Selector::All => registry.loaded().into_iter().map(|m| m.origin).collect(),
        Selector::Modules(names) => names.iter().filter_map(|n| registry.origin(n)).collect(),
    };

    origins
        .iter()
        .filter_map(Origin::as_path)
        .map(PathBuf::from)
        .filter(|p| recorded.contains(p))
        .collect()
}

/// Checks the selected modules against `plt` and returns the engine's
/// findings unfiltered, in engine order.
///
/// The engine is not invoked when no selected module is in the PLT.
pub fn check<E, R>(
    engine: &E,
    registry: &R,
    selector: &Selector,
    plt: &Path,
) -> Result<Vec<DiagnosticRecord>, CacheError>
where
    E: AnalysisEngine + ?Sized,
    R: ModuleRegistry + ?Sized,
{
    let recorded = engine
        .plt_files(plt)
        .map_err(|source| CacheError::Inspect {
            stage: Stage::Check,
            source,
        })?;
    let files = check_files(registry, selector, &recorded);
    if files.is_empty() {
        debug!(%selector, "no selected modules in PLT, skipping check");
        return Ok(Vec::new());
    }

    info!(files = files.len(), plt = %plt.display(), "checking modules");
    let records = engine
        .run(&EngineRequest::Check {
            files: files.into_iter().collect(),
            plt: plt.to_path_buf(),
        })
        .map_err(CacheError::Check)?;
    info!(records = records.len(), "check finished");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pltsync_common::{LoadedModule, StaticRegistry};

    fn registry() -> StaticRegistry {
        StaticRegistry::new(vec![
            LoadedModule::from_file("a", "/p/a.beam"),
            LoadedModule::from_file("b", "/p/b.beam"),
            LoadedModule::from_file("unsynced", "/p/unsynced.beam"),
            LoadedModule::preloaded("erlang"),
        ])
    }

    fn recorded() -> BTreeSet<PathBuf> {
        ["/p/a.beam", "/p/b.beam"]
            .into_iter()
            .map(PathBuf::from)
            .collect()
    }

    #[test]
    fn all_intersects_loaded_with_recorded() {
        let files = check_files(&registry(), &Selector::All, &recorded());
        assert_eq!(files, recorded());
    }

    #[test]
    fn explicit_selection() {
        let files = check_files(&registry(), &Selector::modules(["b"]), &recorded());
        assert_eq!(files.into_iter().collect::<Vec<_>>(), vec![PathBuf::from("/p/b.beam")]);
    }

    #[test]
    fn unsynced_and_unknown_modules_are_skipped() {
        let selector = Selector::modules(["unsynced", "missing", "erlang"]);
        assert!(check_files(&registry(), &selector, &recorded()).is_empty());
    }
}
