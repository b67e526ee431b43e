//! `pltsync modules`: list the project-owned object files.

use pltsync_cache::classify;
use pltsync_common::ModuleRegistry;

use crate::project::Project;
use crate::GlobalArgs;

/// Runs the `pltsync modules` command.
///
/// Prints the files a sync would make the PLT cover, one per line.
pub fn run(global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project = Project::load(global)?;
    let otp_root = project.otp_root()?;
    let loaded = project.registry().loaded();

    let files = classify(&otp_root, &loaded, project.classify_options());
    for file in &files {
        println!("{}", file.display());
    }
    if !global.quiet {
        eprintln!(
            "   {} of {} loaded module(s) are project-owned",
            files.len(),
            loaded.len()
        );
    }
    Ok(0)
}
