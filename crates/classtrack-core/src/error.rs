//! Core error types for classtrack-core.
//!
//! Validation failures are local to a single descriptor and never abort a
//! whole timetable refresh; configuration failures surface to the caller.

use std::path::PathBuf;

use chrono::NaiveTime;
use thiserror::Error;

/// Core error type for classtrack-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown config key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// The data directory could not be created
    #[error("Failed to prepare data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Validation errors raised while building events from descriptors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Event ends at or before it starts
    #[error("Invalid time range for '{label}': end ({end}) must be after start ({start})")]
    InvalidTimeRange {
        label: String,
        start: NaiveTime,
        end: NaiveTime,
    },

    /// Clock text could not be parsed
    #[error("Unparsable time for '{field}': {value:?}")]
    UnparsableTime { field: String, value: String },

    /// Display window is empty or inverted
    #[error("Invalid display window: end ({end}) must be after start ({start})")]
    InvalidWindow { start: NaiveTime, end: NaiveTime },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_wraps_into_core_error() {
        let err: CoreError = ValidationError::UnparsableTime {
            field: "start".into(),
            value: "noon-ish".into(),
        }
        .into();
        assert!(err.to_string().contains("noon-ish"));
    }

    #[test]
    fn invalid_range_message_names_the_event() {
        let at = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let err = ValidationError::InvalidTimeRange {
            label: "Maths".into(),
            start: at,
            end: at,
        };
        assert_eq!(
            err.to_string(),
            "Invalid time range for 'Maths': end (09:00:00) must be after start (09:00:00)"
        );
    }
}
