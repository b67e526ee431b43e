//! `pltsync sync`: bring the PLT in line with the project's modules.

use crate::project::Project;
use crate::GlobalArgs;

/// Runs the `pltsync sync` command.
pub fn run(global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project = Project::load(global)?;
    let engine = project.engine();
    let registry = project.registry();
    let options = project.run_options()?;

    let outcome = pltsync_cache::run_sync(&engine, &registry, &options)?;
    if !global.quiet {
        eprintln!("   {outcome} ({})", options.plt.display());
    }
    Ok(0)
}
