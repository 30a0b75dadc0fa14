//! Configuration management for techstack
//!
//! This module handles loading and validating configuration from environment
//! variables and TOML files. Command-line flags are applied on top by the
//! binary.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default dataset location, relative to the working directory
pub const DEFAULT_DATASET_PATH: &str = "technologies.csv";

/// Log formats understood by the binary
pub const LOG_FORMATS: [&str; 2] = ["text", "json"];

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dataset configuration
    pub dataset: DatasetConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Dataset store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// CSV file holding the merged technology records
    pub path: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let path = lookup("TECHSTACK_DATASET")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.dataset.path);

        let level = lookup("TECHSTACK_LOG_LEVEL").unwrap_or(defaults.logging.level);
        let format = lookup("TECHSTACK_LOG_FORMAT").unwrap_or(defaults.logging.format);

        Self {
            dataset: DatasetConfig { path },
            logging: LoggingConfig { level, format },
        }
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.dataset.path.as_os_str().is_empty() {
            anyhow::bail!("dataset path must not be empty");
        }

        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            anyhow::bail!(
                "unknown log format '{}' (expected one of: {})",
                self.logging.format,
                LOG_FORMATS.join(", ")
            );
        }

        self.logging
            .level
            .parse::<tracing::Level>()
            .map_err(|_| anyhow::anyhow!("unknown log level '{}'", self.logging.level))?;

        Ok(())
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATASET_PATH),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("warn"),
            format: String::from("text"),
        }
    }
}
