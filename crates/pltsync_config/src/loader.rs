//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::ProjectConfig;
use std::path::Path;

/// Name of the configuration file at the project root.
pub const CONFIG_FILE: &str = "pltsync.toml";

/// Loads and validates the configuration file at `path`.
pub fn load_config_file(path: &Path) -> Result<ProjectConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    load_config_from_str(&content)
}

/// Parses and validates a `pltsync.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<ProjectConfig, ConfigError> {
    let config: ProjectConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that required fields are present and configuration values are consistent.
fn validate_config(config: &ProjectConfig) -> Result<(), ConfigError> {
    if config.project.name.is_empty() {
        return Err(ConfigError::MissingField("project.name".to_string()));
    }
    if config.engine.dialyzer.is_empty() {
        return Err(ConfigError::ValidationError(
            "engine.dialyzer is empty".to_string(),
        ));
    }
    if config.engine.erl.is_empty() {
        return Err(ConfigError::ValidationError("engine.erl is empty".to_string()));
    }
    if config.plt.output.as_deref() == Some("") {
        return Err(ConfigError::ValidationError("plt.output is empty".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let toml = r#"
[project]
name = "myapp"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.project.name, "myapp");
        assert!(config.plt.output.is_none());
        assert!(config.plt.base.is_empty());
        assert!(config.otp.root.is_none());
        assert!(!config.otp.strict_prefix);
        assert!(config.code.paths.is_empty());
        assert_eq!(config.engine.dialyzer, "dialyzer");
        assert_eq!(config.engine.erl, "erl");
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
[project]
name = "myapp"

[plt]
output = "_build/myapp.plt"
base = ["/home/me/.dialyzer_plt"]

[otp]
root = "/usr/lib/erlang/lib"
strict_prefix = true

[code]
paths = ["_build/default/lib/myapp/ebin"]
preloaded = ["erlang", "init"]

[engine]
dialyzer = "/opt/otp/bin/dialyzer"
erl = "/opt/otp/bin/erl"
args = ["-Wunmatched_returns"]
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.plt.output.as_deref(), Some("_build/myapp.plt"));
        assert_eq!(config.plt.base, vec!["/home/me/.dialyzer_plt"]);
        assert_eq!(config.otp.root.as_deref(), Some("/usr/lib/erlang/lib"));
        assert!(config.otp.strict_prefix);
        assert_eq!(config.code.paths.len(), 1);
        assert_eq!(config.code.preloaded, vec!["erlang", "init"]);
        assert_eq!(config.engine.dialyzer, "/opt/otp/bin/dialyzer");
        assert_eq!(config.engine.args, vec!["-Wunmatched_returns"]);
    }

    #[test]
    fn missing_name_errors() {
        let toml = r#"
[project]
name = ""
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(_)));
    }

    #[test]
    fn missing_project_table_errors() {
        let err = load_config_from_str("[plt]\nbase = []\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn empty_dialyzer_errors() {
        let toml = r#"
[project]
name = "x"

[engine]
dialyzer = ""
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn empty_plt_output_errors() {
        let toml = r#"
[project]
name = "x"

[plt]
output = ""
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn invalid_toml_errors() {
        let toml = "this is not valid toml {{{}}}";
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[project]\nname = \"d\"\n").unwrap();
        let config = load_config_file(&path).unwrap();
        assert_eq!(config.project.name, "d");
    }

    #[test]
    fn io_error_carries_path() {
        let path = Path::new("/nonexistent/dir/pltsync.toml");
        match load_config_file(path).unwrap_err() {
            ConfigError::Io { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected Io, got {other:?}"),
        }
    }
}
