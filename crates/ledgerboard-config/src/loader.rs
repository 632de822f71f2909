//! Configuration loading utilities

use crate::schema::Config;
use ledgerboard_common::LedgerError;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_VAR: &str = "LEDGERBOARD_CONFIG_PATH";

/// Configuration files probed in the working directory, in order.
pub const DEFAULT_CONFIG_FILES: [&str; 2] = ["ledgerboard.yaml", "ledgerboard.yml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParse {
        /// Variable that failed to parse.
        var: String,
        /// Parse failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    Invalid(String),
}

impl From<ConfigError> for LedgerError {
    fn from(err: ConfigError) -> Self {
        let message = err.to_string();
        Self::config_with_source(message, err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or parsed, an override does not
    /// parse, or the result does not validate.
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config: Config = serde_yaml::from_str(&content)?;
        debug!(path = %path.as_ref().display(), "Parsed configuration file");

        Self::apply_env_overrides(&mut config)?;
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from the environment and the working directory.
    ///
    /// Uses `LEDGERBOARD_CONFIG_PATH` when set, then the first existing file of
    /// [`DEFAULT_CONFIG_FILES`], and finally defaults plus overrides.
    ///
    /// # Errors
    ///
    /// See [`ConfigLoader::load_config`].
    pub fn load() -> Result<Config, ConfigError> {
        if let Ok(config_path) = env::var(CONFIG_PATH_VAR) {
            info!(path = %config_path, "Loading configuration from {CONFIG_PATH_VAR}");
            return Self::load_config(config_path);
        }

        if let Some(found) = DEFAULT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|candidate| candidate.exists())
        {
            info!(path = %found.display(), "Loading configuration file");
            return Self::load_config(found);
        }

        info!("No configuration file found, using defaults");
        let mut config = Config::default();
        Self::apply_env_overrides(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply process environment overrides to configuration
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EnvParse`] when a numeric override does not parse.
    pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides_with(config, |var| env::var(var).ok())
    }

    /// Apply overrides read through `lookup` instead of the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EnvParse`] when a numeric override does not parse.
    pub fn apply_overrides_with<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("LEDGERBOARD_DATA_PATH") {
            config.data.path = Some(PathBuf::from(path));
        }

        if let Some(path) = lookup("LEDGERBOARD_CATALOG_PATH") {
            config.dashboard.catalog_path = Some(PathBuf::from(path));
        }

        if let Some(path) = lookup("LEDGERBOARD_OUTPUT_PATH") {
            config.output.path = Some(PathBuf::from(path));
        }

        if let Some(columns) = lookup("LEDGERBOARD_COLUMNS") {
            config.dashboard.columns =
                columns.trim().parse().map_err(|e| ConfigError::EnvParse {
                    var: "LEDGERBOARD_COLUMNS".to_string(),
                    source: Box::new(e),
                })?;
        }

        if let Some(level) = lookup("LEDGERBOARD_LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(())
    }
}
