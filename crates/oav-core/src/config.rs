use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::view::endpoints::GroupBy;

/// Top-level project configuration loaded from `.oav.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OavConfig {
    pub input: String,
    pub format: OutputFormat,
    pub endpoints: EndpointsConfig,
}

impl Default for OavConfig {
    fn default() -> Self {
        Self {
            input: "openapi.yaml".to_string(),
            format: OutputFormat::Yaml,
            endpoints: EndpointsConfig::default(),
        }
    }
}

/// How resolved output is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

/// Endpoint-listing options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EndpointsConfig {
    pub group_by: GroupBy,
    pub show_deprecated: bool,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            group_by: GroupBy::Path,
            show_deprecated: true,
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".oav.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<OavConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: OavConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# oav configuration
input: openapi.yaml
format: yaml          # yaml | json

endpoints:
  group_by: path        # path | tag
  show_deprecated: true # hide deprecated operations with false
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OavConfig::default();
        assert_eq!(config.input, "openapi.yaml");
        assert_eq!(config.format, OutputFormat::Yaml);
        assert_eq!(config.endpoints.group_by, GroupBy::Path);
        assert!(config.endpoints.show_deprecated);
    }

    #[test]
    fn test_parse_config_yaml() {
        let yaml = r#"
input: spec.yaml
format: json
endpoints:
  group_by: tag
  show_deprecated: false
"#;
        let config: OavConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.input, "spec.yaml");
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.endpoints.group_by, GroupBy::Tag);
        assert!(!config.endpoints.show_deprecated);
    }

    #[test]
    fn test_parse_minimal_config() {
        let yaml = "input: api.yaml\n";
        let config: OavConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.input, "api.yaml");
        // Defaults applied
        assert_eq!(config.format, OutputFormat::Yaml);
        assert_eq!(config.endpoints.group_by, GroupBy::Path);
    }

    #[test]
    fn test_load_config_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        // Missing file is not an error
        assert!(load_config(&path).unwrap().is_none());

        fs::write(&path, default_config_content()).unwrap();
        let config = load_config(&path).unwrap().expect("config should load");
        assert_eq!(config.input, "openapi.yaml");
        assert_eq!(config.endpoints.group_by, GroupBy::Path);
    }
}
