//! Configuration for the timeline scrubber
//! Gesture tuning, label patterns and the archive refresh cadence

use serde::{Deserialize, Serialize};
use thiserror::Error;
use timeline_shared::{InteractionConfig, LabelConfig};

pub mod parser;
pub mod validation;

pub use parser::{ConfigFormat, ConfigParser, ConfigSerializer};
pub use validation::ConfigValidator;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// How often the host pushes archive bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    pub archive_poll_interval_ms: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            archive_poll_interval_ms: 1000,
        }
    }
}

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub interaction: InteractionConfig,
    pub labels: LabelConfig,
    pub refresh: RefreshConfig,
}

impl TimelineConfig {
    /// Parse and validate a config file; format from the extension
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let config = ConfigParser::parse_file(path)?;
        ConfigValidator::validate(&config)?;
        Ok(config)
    }
}
