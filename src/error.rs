//! Custom error types for txn-series
//!
//! This module defines the error hierarchy for the crate using thiserror
//! for ergonomic error definitions. The aggregation core never fails; these
//! errors come from configuration, ingestion and export.

use thiserror::Error;

/// The main error type for txn-series operations
#[derive(Error, Debug)]
pub enum SeriesError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML serialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// CSV reader errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Event ingestion errors
    #[error("Import error: {0}")]
    Import(String),

    /// Report export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Invalid user input (dates, filters, modes)
    #[error("Validation error: {0}")]
    Validation(String),
}

impl SeriesError {
    /// Create an import error for a specific record of a JSON document
    pub fn import_at_event(position: usize, message: impl Into<String>) -> Self {
        Self::Import(format!("event {}: {}", position, message.into()))
    }

    /// Check if this is an import error
    pub fn is_import(&self) -> bool {
        matches!(self, Self::Import(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for SeriesError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SeriesError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for SeriesError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

impl From<csv::Error> for SeriesError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for txn-series operations
pub type SeriesResult<T> = Result<T, SeriesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SeriesError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_import_at_event() {
        let err = SeriesError::import_at_event(2, "bad start");
        assert_eq!(err.to_string(), "Import error: event 2: bad start");
        assert!(err.is_import());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let series_err: SeriesError = io_err.into();
        assert!(matches!(series_err, SeriesError::Io(_)));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let series_err: SeriesError = json_err.into();
        assert!(matches!(series_err, SeriesError::Json(_)));
    }
}
