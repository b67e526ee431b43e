//! Parsing and validation of `pltsync.toml` project configuration files.
//!
//! This crate reads the project configuration file and produces a strongly-typed
//! [`ProjectConfig`], then resolves its relative paths against the project root
//! into a [`ResolvedPaths`] ready for the synchronizer.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod resolve;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config_file, load_config_from_str, CONFIG_FILE};
pub use resolve::{discover_code_paths, resolve_paths, ResolvedPaths};
pub use types::*;
