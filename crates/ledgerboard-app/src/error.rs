//! Application-wide error types using thiserror.

use ledgerboard_common::LedgerError;
use ledgerboard_config::ConfigError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Loading, aggregation, or composition error.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Blocking task failure.
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Ledger(err.into())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Ledger(err.into())
    }
}

/// Result type for the application.
pub type AppResult<T> = Result<T, AppError>;
