use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::route::Protocol;

/// Display name used when none is configured.
pub const DEFAULT_NAME: &str = "API接口文档";

/// Local document asset advertised in the service descriptor.
pub const DEFAULT_LOCATION: &str = "./swagger.json";

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".tagdoc.yaml";

/// Adapter configuration loaded from `.tagdoc.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Display name shown by the viewer.
    pub name: String,
    /// Prefix the viewer UI is mounted under; empty for the root.
    pub prefix: String,
    pub protocol: Protocol,
    /// `location` field of the service descriptor.
    pub location: String,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            prefix: String::new(),
            protocol: Protocol::Current,
            location: DEFAULT_LOCATION.to_string(),
        }
    }
}

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<AdapterConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&content).map_err(|source| ConfigError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(config))
}

/// Parse config from YAML text. An empty document yields the defaults.
pub fn parse_config(content: &str) -> Result<AdapterConfig, serde_yaml_ng::Error> {
    if content.trim().is_empty() {
        return Ok(AdapterConfig::default());
    }
    serde_yaml_ng::from_str(content)
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# tagdoc configuration
name: API接口文档
prefix: ""              # where the viewer UI is mounted, e.g. /docs
protocol: current       # current | legacy | both
location: ./swagger.json
"#
}
