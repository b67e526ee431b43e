//! Module identifiers and the origins the module registry reports for them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// File extension of compiled module artifacts.
pub const BEAM_EXT: &str = "beam";

/// The symbolic name of a compiled module (e.g. `lists`, `my_app_sup`).
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleName(String);

impl ModuleName {
    /// Creates a module name from any string-like value.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Derives the module name implied by a file path: the basename with
    /// its directory and extension stripped.
    ///
    /// Returns `None` if the path has no file name component.
    pub fn from_path(path: &Path) -> Option<Self> {
        let stem = path.file_stem()?.to_str()?;
        Some(Self(stem.to_string()))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModuleName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ModuleName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Where a loaded module's code came from.
///
/// Only [`Origin::Path`] is file-backed. [`Origin::Preloaded`] is the
/// "not file-backed" sentinel; the remaining variants are origins the
/// registry may report that carry no usable path either.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// Loaded from the object file at this path.
    Path(String),
    /// Built into the runtime image, never loaded from disk.
    Preloaded,
    /// Recompiled in memory by a coverage tool.
    CoverCompiled,
    /// Registered but no longer resolvable to an object file.
    NonExisting,
}

impl Origin {
    /// Returns the object file path if this origin is file-backed.
    pub fn as_path(&self) -> Option<&str> {
        match self {
            Origin::Path(p) => Some(p),
            _ => None,
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Path(p) => f.write_str(p),
            Origin::Preloaded => f.write_str("preloaded"),
            Origin::CoverCompiled => f.write_str("cover_compiled"),
            Origin::NonExisting => f.write_str("non_existing"),
        }
    }
}

/// A snapshot of one currently loaded module.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct LoadedModule {
    /// The module's symbolic name.
    pub name: ModuleName,
    /// Where the module's code was loaded from.
    pub origin: Origin,
}

impl LoadedModule {
    /// Creates a file-backed module entry.
    pub fn from_file(name: impl Into<ModuleName>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            origin: Origin::Path(path.into()),
        }
    }

    /// Creates a preloaded (not file-backed) module entry.
    pub fn preloaded(name: impl Into<ModuleName>) -> Self {
        Self {
            name: name.into(),
            origin: Origin::Preloaded,
        }
    }
}
