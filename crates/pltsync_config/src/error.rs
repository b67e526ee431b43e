//! Error types for reading and validating `pltsync.toml`.

use std::path::PathBuf;

/// Errors that can occur when loading or validating a `pltsync.toml` configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// The configuration file that was requested.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid TOML or does not match the schema.
    #[error("invalid pltsync.toml: {0}")]
    ParseError(String),

    /// A required field is missing or empty.
    #[error("pltsync.toml is missing `{0}`")]
    MissingField(String),

    /// A value is present but unusable, such as an empty executable name.
    #[error("invalid value in pltsync.toml: {0}")]
    ValidationError(String),
}
