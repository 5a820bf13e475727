use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::parse::spec::LoadMode;

/// Project configuration loaded from `.gopen.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GopenConfig {
    pub input: String,
    pub output: String,
    /// Go package name; defaults to the base name of `output`.
    pub package: Option<String>,
    /// Go module path; defaults to an existing `go.mod`, then `package`.
    pub module: Option<String>,
    pub mode: LoadMode,
}

impl Default for GopenConfig {
    fn default() -> Self {
        Self {
            input: "openapi.yaml".to_string(),
            output: ".".to_string(),
            package: None,
            module: None,
            mode: LoadMode::Lenient,
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".gopen.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<GopenConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# gopen configuration
input: openapi.yaml
output: .

# package: myservice          # Go package name (defaults to the output directory name)
# module: github.com/you/svc  # Go module path (defaults to go.mod, then package)

mode: lenient                 # lenient | strict (strict requires openapi, info, paths, components.schemas)
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GopenConfig::default();
        assert_eq!(config.input, "openapi.yaml");
        assert_eq!(config.output, ".");
        assert!(config.package.is_none());
        assert!(config.module.is_none());
        assert_eq!(config.mode, LoadMode::Lenient);
    }

    #[test]
    fn test_parse_config_yaml() {
        let yaml = r#"
input: api/spec.json
output: out/petstore
package: petstore
module: github.com/acme/petstore
mode: strict
"#;
        let config: GopenConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.input, "api/spec.json");
        assert_eq!(config.output, "out/petstore");
        assert_eq!(config.package.as_deref(), Some("petstore"));
        assert_eq!(config.module.as_deref(), Some("github.com/acme/petstore"));
        assert_eq!(config.mode, LoadMode::Strict);
    }

    #[test]
    fn test_default_content_parses_to_defaults() {
        let config: GopenConfig = serde_yaml_ng::from_str(default_config_content()).unwrap();
        assert_eq!(config, GopenConfig::default());
    }

    #[test]
    fn test_load_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_load_config_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "mode: sometimes\n").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
