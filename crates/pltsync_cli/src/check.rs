//! `pltsync check`: synchronize the PLT and report diagnostics.
//!
//! 1. Find project root (walk up looking for `pltsync.toml`)
//! 2. Load config and resolve paths
//! 3. Scan code paths into a module registry
//! 4. Lock, classify, synchronize, check, filter and format
//! 5. Render diagnostics to stdout

use std::io::Write;

use pltsync_diagnostics::{JsonRenderer, OutputRenderer, TextRenderer};

use crate::project::Project;
use crate::{CheckArgs, GlobalArgs, ReportFormat};

/// Exit code when the check reported at least one diagnostic.
const EXIT_DIAGNOSTICS: i32 = 2;

/// Runs the `pltsync check` command.
///
/// Returns exit code 0 if there are no diagnostics, 2 if there are.
pub fn run(args: &CheckArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project = Project::load(global)?;

    if !global.quiet {
        eprintln!("   Checking {} ({})", project.config.project.name, args.modules);
    }

    let engine = project.engine();
    let registry = project.registry();
    let options = project.run_options()?;
    let diagnostics = pltsync_cache::run(&engine, &registry, &options, &args.modules)?;

    let renderer: &dyn OutputRenderer = match args.format {
        ReportFormat::Text => &TextRenderer,
        ReportFormat::Json => &JsonRenderer,
    };
    let mut stdout = std::io::stdout().lock();
    renderer.render_all(&mut stdout, &diagnostics)?;
    stdout.flush()?;

    if !global.quiet && args.format == ReportFormat::Text {
        let errors = diagnostics.iter().filter(|d| d.severity.is_error()).count();
        eprintln!(
            "   Result: {} error(s), {} warning(s)",
            errors,
            diagnostics.len() - errors
        );
    }

    if diagnostics.is_empty() {
        Ok(0)
    } else {
        Ok(EXIT_DIAGNOSTICS)
    }
}
