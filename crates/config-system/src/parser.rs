//! Configuration file parser for multiple formats

use crate::{ConfigError, Result, TimelineConfig};
use std::fs;
use std::path::Path;

/// Configuration format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

impl ConfigFormat {
    /// Detect configuration format from file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            let name = path.display();
            return Err(ConfigError::UnsupportedFormat(format!("no extension on {name}")));
        };

        match ext.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            "json" => Ok(ConfigFormat::Json),
            "toml" => Ok(ConfigFormat::Toml),
            _ => Err(ConfigError::UnsupportedFormat(ext.to_string())),
        }
    }
}

/// Configuration parser
pub struct ConfigParser;

impl ConfigParser {
    /// Parse configuration from a file
    pub fn parse_file(path: impl AsRef<Path>) -> Result<TimelineConfig> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let content = fs::read_to_string(path)?;
        log::debug!("[Config] Parsing {} as {:?}", path.display(), format);
        Self::parse_string(&content, format)
    }

    /// Parse configuration from a string
    pub fn parse_string(content: &str, format: ConfigFormat) -> Result<TimelineConfig> {
        match format {
            ConfigFormat::Yaml => serde_yaml::from_str(content)
                .map_err(|e| ConfigError::Parse(format!("YAML parse error: {e}"))),
            ConfigFormat::Json => serde_json::from_str(content)
                .map_err(|e| ConfigError::Parse(format!("JSON parse error: {e}"))),
            ConfigFormat::Toml => toml::from_str(content)
                .map_err(|e| ConfigError::Parse(format!("TOML parse error: {e}"))),
        }
    }
}

/// Configuration serializer
pub struct ConfigSerializer;

impl ConfigSerializer {
    /// Serialize configuration to a file
    pub fn serialize_file(config: &TimelineConfig, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let content = Self::serialize_string(config, format)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Serialize configuration to a string
    pub fn serialize_string(config: &TimelineConfig, format: ConfigFormat) -> Result<String> {
        match format {
            ConfigFormat::Yaml => serde_yaml::to_string(config)
                .map_err(|e| ConfigError::Parse(format!("YAML serialize error: {e}"))),
            ConfigFormat::Json => serde_json::to_string_pretty(config)
                .map_err(|e| ConfigError::Parse(format!("JSON serialize error: {e}"))),
            ConfigFormat::Toml => toml::to_string_pretty(config)
                .map_err(|e| ConfigError::Parse(format!("TOML serialize error: {e}"))),
        }
    }
}
