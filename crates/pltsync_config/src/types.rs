//! Configuration types deserialized from `pltsync.toml`.

use serde::Deserialize;

/// The top-level project configuration parsed from `pltsync.toml`.
#[derive(Debug, Deserialize)]
pub struct ProjectConfig {
    /// Core project metadata.
    pub project: ProjectMeta,
    /// Where the PLT lives and what it is seeded from.
    #[serde(default)]
    pub plt: PltConfig,
    /// Standard-library location and classification strictness.
    #[serde(default)]
    pub otp: OtpConfig,
    /// Code-path directories and preloaded modules.
    #[serde(default)]
    pub code: CodeConfig,
    /// Analysis engine executables and extra arguments.
    #[serde(default)]
    pub engine: EngineConfig,
}

/// Core project metadata required in every `pltsync.toml`.
#[derive(Debug, Deserialize)]
pub struct ProjectMeta {
    /// The project name. Used to name the default PLT file.
    pub name: String,
}

/// PLT location settings.
#[derive(Debug, Default, Deserialize)]
pub struct PltConfig {
    /// Path of the PLT this project creates or updates.
    /// Defaults to `_build/pltsync/<name>.plt`.
    pub output: Option<String>,
    /// Base PLTs merged into a freshly built PLT.
    #[serde(default)]
    pub base: Vec<String>,
}

/// Standard-library settings.
#[derive(Debug, Default, Deserialize)]
pub struct OtpConfig {
    /// Directory under which every standard-library module resides.
    /// Discovered from the runtime when absent.
    pub root: Option<String>,
    /// Compare the root by path components instead of as a plain string prefix.
    #[serde(default)]
    pub strict_prefix: bool,
}

/// Code-path settings.
#[derive(Debug, Default, Deserialize)]
pub struct CodeConfig {
    /// Ordered directories holding compiled modules. Discovered from the
    /// build directory when empty.
    #[serde(default)]
    pub paths: Vec<String>,
    /// Modules built into the runtime image.
    #[serde(default)]
    pub preloaded: Vec<String>,
}

/// Analysis engine settings.
#[derive(Debug, Deserialize)]
pub struct EngineConfig {
    /// The analyzer executable.
    #[serde(default = "default_dialyzer")]
    pub dialyzer: String,
    /// The runtime executable, used to discover the standard-library root.
    #[serde(default = "default_erl")]
    pub erl: String,
    /// Extra arguments passed to every analyzer invocation.
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dialyzer: default_dialyzer(),
            erl: default_erl(),
            args: Vec::new(),
        }
    }
}

fn default_dialyzer() -> String {
    "dialyzer".to_string()
}

fn default_erl() -> String {
    "erl".to_string()
}
