//! Store configuration
//!
//! Loaded from a JSON file:
//!
//! ```json
//! { "data_dir": "./_env/data", "format": "csv" }
//! ```
//!
//! `schema_dir` and table paths are resolved relative to `data_dir`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::{log_event_with_fields, Event};
use crate::store::RawFormat;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(String),

    #[error("Invalid config JSON: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding table files (required)
    pub data_dir: PathBuf,

    /// Directory holding schema files (default: "schemas")
    #[serde(default = "default_schema_dir")]
    pub schema_dir: PathBuf,

    /// Table file format (default: csv)
    #[serde(default)]
    pub format: RawFormat,
}

fn default_schema_dir() -> PathBuf {
    PathBuf::from("schemas")
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            schema_dir: default_schema_dir(),
            format: RawFormat::default(),
        }
    }

    /// Load configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read(e.to_string()))?;
        let config: StoreConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;

        let data_dir = config.data_dir.display().to_string();
        log_event_with_fields(
            Event::ConfigLoaded,
            &[("data_dir", &data_dir), ("format", config.format.name())],
        );

        Ok(config)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("data_dir must not be empty".into()));
        }

        if self.schema_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("schema_dir must not be empty".into()));
        }

        Ok(())
    }

    /// Absolute or data_dir-relative schema directory
    pub fn schema_path(&self) -> PathBuf {
        self.data_dir.join(&self.schema_dir)
    }

    /// Store-relative file name of a table
    pub fn table_file(&self, table: &str) -> String {
        format!("{}.{}", table, self.format.extension())
    }
}
