//! The end-to-end classify → synchronize → check → filter → format run.

use std::path::PathBuf;

use pltsync_common::ModuleRegistry;
use pltsync_diagnostics::{filter, format, FormattedDiagnostic, Selector};
use pltsync_engine::AnalysisEngine;
use tracing::info;

use crate::check::check;
use crate::classify::{classify, ClassifyOptions};
use crate::error::CacheError;
use crate::lock::PltLock;
use crate::sync::{synchronize, SyncOutcome};

/// Locations and settings for one run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Directory under which every standard-library module resides.
    pub otp_root: PathBuf,
    /// The PLT to create or update.
    pub plt: PathBuf,
    /// Base PLTs merged into a freshly built PLT.
    pub base_plts: Vec<PathBuf>,
    /// How the standard-library root is matched.
    pub classify: ClassifyOptions,
}

/// Synchronizes the PLT with the registry's project modules, checks the
/// selected modules, and returns their findings in uniform form.
///
/// The PLT is locked for the whole run. On failure no diagnostics are
/// returned and the error names the stage that failed.
pub fn run<E, R>(
    engine: &E,
    registry: &R,
    options: &RunOptions,
    selector: &Selector,
) -> Result<Vec<FormattedDiagnostic>, CacheError>
where
    E: AnalysisEngine + ?Sized,
    R: ModuleRegistry + ?Sized,
{
    let _lock = PltLock::acquire(&options.plt)?;

    sync_unlocked(engine, registry, options)?;
    let raw = check(engine, registry, selector, &options.plt)?;
    let selected = filter(selector, raw);
    let diagnostics = format(engine, &selected);

    info!(%selector, diagnostics = diagnostics.len(), "run finished");
    Ok(diagnostics)
}

/// Synchronizes the PLT without checking anything.
pub fn run_sync<E, R>(
    engine: &E,
    registry: &R,
    options: &RunOptions,
) -> Result<SyncOutcome, CacheError>
where
    E: AnalysisEngine + ?Sized,
    R: ModuleRegistry + ?Sized,
{
    let _lock = PltLock::acquire(&options.plt)?;
    sync_unlocked(engine, registry, options)
}

fn sync_unlocked<E, R>(
    engine: &E,
    registry: &R,
    options: &RunOptions,
) -> Result<SyncOutcome, CacheError>
where
    E: AnalysisEngine + ?Sized,
    R: ModuleRegistry + ?Sized,
{
    let live = classify(&options.otp_root, &registry.loaded(), options.classify);
    let outcome = synchronize(engine, &live, &options.plt, &options.base_plts)?;
    info!(%outcome, "synchronized PLT");
    Ok(outcome)
}
