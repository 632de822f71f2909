//! Runtime validation of a loaded configuration.

use crate::defaults::MAX_COLUMNS;
use crate::loader::ConfigError;
use crate::schema::Config;
use tracing::debug;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first rule violated.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.data.path.is_none() {
            return Err(ConfigError::Invalid(
                "data.path must point at a record file".to_string(),
            ));
        }

        if config.dashboard.title.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "dashboard.title cannot be empty".to_string(),
            ));
        }

        if !(1..=MAX_COLUMNS).contains(&config.dashboard.columns) {
            return Err(ConfigError::Invalid(format!(
                "dashboard.columns must be between 1 and {MAX_COLUMNS}, got {}",
                config.dashboard.columns
            )));
        }

        if config.logging.level.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "logging.level cannot be empty".to_string(),
            ));
        }

        debug!("Configuration validated");
        Ok(())
    }
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// See [`ConfigValidator::validate`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigValidator::validate(self)
    }
}
