//! Path resolution: turning configured relative paths into absolute ones.

use crate::types::ProjectConfig;
use std::path::{Path, PathBuf};

/// Directory, relative to the project root, holding per-application build output.
const BUILD_LIB_DIR: &str = "_build/default/lib";

/// Every filesystem location the synchronizer needs, resolved against the
/// project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    /// The PLT to create or update.
    pub plt: PathBuf,
    /// Base PLTs merged into a fresh build.
    pub base_plts: Vec<PathBuf>,
    /// Configured standard-library root, if any.
    pub otp_root: Option<PathBuf>,
    /// Ordered code-path directories.
    pub code_paths: Vec<PathBuf>,
}

/// Resolves every configured path against `project_root`.
///
/// Absolute paths are kept as-is. When no code paths are configured,
/// `_build/default/lib/*/ebin` directories are discovered instead.
pub fn resolve_paths(config: &ProjectConfig, project_root: &Path) -> ResolvedPaths {
    let plt = match &config.plt.output {
        Some(p) => project_root.join(p),
        None => project_root
            .join("_build")
            .join("pltsync")
            .join(format!("{}.plt", config.project.name)),
    };

    let base_plts = config
        .plt
        .base
        .iter()
        .map(|p| project_root.join(p))
        .collect();

    let otp_root = config.otp.root.as_ref().map(|r| project_root.join(r));

    let code_paths = if config.code.paths.is_empty() {
        discover_code_paths(project_root)
    } else {
        config
            .code
            .paths
            .iter()
            .map(|p| project_root.join(p))
            .collect()
    };

    ResolvedPaths {
        plt,
        base_plts,
        otp_root,
        code_paths,
    }
}

/// Finds `<project_root>/_build/default/lib/<app>/ebin` directories, sorted.
pub fn discover_code_paths(project_root: &Path) -> Vec<PathBuf> {
    let lib_dir = project_root.join(BUILD_LIB_DIR);
    let Ok(entries) = std::fs::read_dir(&lib_dir) else {
        return Vec::new();
    };
    let mut dirs: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path().join("ebin"))
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();
    dirs
}
