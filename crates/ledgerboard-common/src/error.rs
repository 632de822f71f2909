//! Error types and utilities for Ledgerboard.

use thiserror::Error;

/// Result type alias for Ledgerboard operations.
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Main error type for Ledgerboard operations.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// A raw input row is missing a required field or carries a value of the wrong type.
    #[error("Malformed record at row {row}: {message}")]
    MalformedRecord {
        /// Zero-based index of the offending row.
        row: usize,
        /// Field that failed, when one can be named.
        field: Option<String>,
        /// Human readable description.
        message: String,
    },

    /// A view or operation referenced a field the record set does not carry.
    #[error("Field '{field}' not found ({context})")]
    FieldNotFound {
        /// Name of the missing field.
        field: String,
        /// Where the lookup failed, e.g. the date label of the record.
        context: String,
    },

    /// Aggregation, difference, or composition was requested over zero records.
    #[error("Cannot run {operation} on an empty record set")]
    EmptyRecordSet {
        /// Operation that was attempted.
        operation: String,
    },

    /// Configuration related errors.
    #[error("Configuration error: {message}")]
    Config {
        /// Human readable description.
        message: String,
        /// Underlying cause.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML serialization/deserialization errors.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl LedgerError {
    /// Create a new malformed record error.
    pub fn malformed(row: usize, field: Option<&str>, msg: impl Into<String>) -> Self {
        Self::MalformedRecord {
            row,
            field: field.map(str::to_string),
            message: msg.into(),
        }
    }

    /// Create a new field-not-found error.
    pub fn field_not_found(field: impl Into<String>, context: impl Into<String>) -> Self {
        Self::FieldNotFound {
            field: field.into(),
            context: context.into(),
        }
    }

    /// Create a new empty record set error.
    pub fn empty(operation: impl Into<String>) -> Self {
        Self::EmptyRecordSet {
            operation: operation.into(),
        }
    }

    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source.
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Check if this is a malformed record error.
    #[must_use]
    pub const fn is_malformed_record(&self) -> bool {
        matches!(self, Self::MalformedRecord { .. })
    }

    /// Check if this is a field-not-found error.
    #[must_use]
    pub const fn is_field_not_found(&self) -> bool {
        matches!(self, Self::FieldNotFound { .. })
    }

    /// Check if this is an empty record set error.
    #[must_use]
    pub const fn is_empty_record_set(&self) -> bool {
        matches!(self, Self::EmptyRecordSet { .. })
    }

    /// Check if this is a configuration error.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_display() {
        let err = LedgerError::malformed(3, Some("revenue"), "expected a number");
        assert_eq!(
            err.to_string(),
            "Malformed record at row 3: expected a number"
        );
        assert!(err.is_malformed_record());
        assert!(!err.is_field_not_found());
    }

    #[test]
    fn test_field_not_found_display() {
        let err = LedgerError::field_not_found("margin", "record '3일'");
        assert_eq!(err.to_string(), "Field 'margin' not found (record '3일')");
        assert!(err.is_field_not_found());
    }

    #[test]
    fn test_empty_display() {
        let err = LedgerError::empty("difference");
        assert_eq!(
            err.to_string(),
            "Cannot run difference on an empty record set"
        );
        assert!(err.is_empty_record_set());
    }

    #[test]
    fn test_config_with_source_keeps_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = LedgerError::config_with_source("catalog unreadable", io);
        assert!(err.is_config());
        assert!(std::error::Error::source(&err).is_some());
    }
}
