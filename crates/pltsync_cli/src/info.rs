//! `pltsync info`: show where the PLT lives and what it records.

use pltsync_engine::AnalysisEngine;

use crate::project::Project;
use crate::GlobalArgs;

/// Runs the `pltsync info` command.
///
/// Prints one recorded file per line on stdout. A PLT that has not been
/// built yet records nothing.
pub fn run(global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project = Project::load(global)?;
    let plt = &project.paths.plt;

    if !global.quiet {
        eprintln!("   Project: {}", project.root.display());
        eprintln!("   PLT:     {}", plt.display());
        for base in &project.paths.base_plts {
            eprintln!("   Base:    {}", base.display());
        }
    }

    if !plt.exists() {
        if !global.quiet {
            eprintln!("   PLT has not been built yet");
        }
        return Ok(0);
    }

    let files = project.engine().plt_files(plt)?;
    for file in &files {
        println!("{}", file.display());
    }
    if !global.quiet {
        eprintln!("   {} file(s) recorded", files.len());
    }
    Ok(0)
}
