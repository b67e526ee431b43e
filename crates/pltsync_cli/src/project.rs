//! Shared project setup for CLI commands.
//!
//! Locates the project root and its `pltsync.toml`, resolves configured
//! paths, and builds the engine, module registry and run options every
//! command needs.

use std::path::{Path, PathBuf};

use pltsync_cache::{ClassifyOptions, RunOptions};
use pltsync_common::CodePathRegistry;
use pltsync_config::{ProjectConfig, ResolvedPaths, CONFIG_FILE};
use pltsync_engine::DialyzerEngine;
use tracing::debug;

use crate::GlobalArgs;

/// A loaded project: its root, configuration and resolved paths.
pub struct Project {
    /// Directory containing `pltsync.toml`.
    pub root: PathBuf,
    /// Parsed configuration.
    pub config: ProjectConfig,
    /// Configured paths resolved against `root`.
    pub paths: ResolvedPaths,
}

impl Project {
    /// Loads the project selected by the global CLI args.
    pub fn load(global: &GlobalArgs) -> Result<Self, Box<dyn std::error::Error>> {
        let (root, config_file) = resolve_config_file(global)?;
        // Every path derived from the root must be comparable with the
        // absolute names the engine records in the PLT.
        let root = std::path::absolute(&root)?;
        let config = pltsync_config::load_config_file(&config_file)?;
        let paths = pltsync_config::resolve_paths(&config, &root);
        debug!(root = %root.display(), plt = %paths.plt.display(), "loaded project");
        Ok(Self {
            root,
            config,
            paths,
        })
    }

    /// Returns the engine configured for this project.
    pub fn engine(&self) -> DialyzerEngine {
        DialyzerEngine::new(
            self.config.engine.dialyzer.clone(),
            self.config.engine.args.clone(),
        )
    }

    /// Scans the project's code paths into a module registry.
    pub fn registry(&self) -> CodePathRegistry {
        CodePathRegistry::scan(&self.paths.code_paths, &self.config.code.preloaded)
    }

    /// Returns the configured standard-library root, or asks `erl` for it.
    pub fn otp_root(&self) -> Result<PathBuf, Box<dyn std::error::Error>> {
        match &self.paths.otp_root {
            Some(root) => Ok(root.clone()),
            None => Ok(pltsync_engine::discover_otp_root(&self.config.engine.erl)?),
        }
    }

    /// Returns the classification options from `[otp]`.
    pub fn classify_options(&self) -> ClassifyOptions {
        ClassifyOptions {
            strict_prefix: self.config.otp.strict_prefix,
        }
    }

    /// Assembles the options for a synchronize/check run.
    pub fn run_options(&self) -> Result<RunOptions, Box<dyn std::error::Error>> {
        Ok(RunOptions {
            otp_root: self.otp_root()?,
            plt: self.paths.plt.clone(),
            base_plts: self.paths.base_plts.clone(),
            classify: self.classify_options(),
        })
    }
}

/// Walks up from `start` looking for the nearest directory containing `pltsync.toml`.
///
/// Returns the directory containing `pltsync.toml`, or an error if none is found.
pub fn find_project_root(start: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(CONFIG_FILE).exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(format!(
                "could not find {CONFIG_FILE} in {} or any parent directory",
                start.display()
            )
            .into());
        }
    }
}

/// Resolves the project root and config file from global CLI args.
///
/// If `--config` names a file, that file is used and its directory is the
/// root. If it names a directory, `pltsync.toml` inside it is used.
/// Otherwise walks up from the current directory looking for `pltsync.toml`.
fn resolve_config_file(
    global: &GlobalArgs,
) -> Result<(PathBuf, PathBuf), Box<dyn std::error::Error>> {
    match global.config {
        Some(ref config_path) => Ok(split_config_path(Path::new(config_path))),
        None => {
            let root = find_project_root(&std::env::current_dir()?)?;
            let file = root.join(CONFIG_FILE);
            Ok((root, file))
        }
    }
}

fn split_config_path(path: &Path) -> (PathBuf, PathBuf) {
    if path.is_file() {
        let root = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        (root, path.to_path_buf())
    } else {
        (path.to_path_buf(), path.join(CONFIG_FILE))
    }
}
