//! Domain error types
//!
//! This module defines the error hierarchy for geobundle.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main geobundle error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum BundleError {
    /// Configuration or wiring errors (missing endpoint, invalid setting)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Requested entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Database-related errors
    #[error("Database error: {0}")]
    Database(String),

    /// Blob storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// The conversion program could not be started or awaited
    #[error("Conversion error: {0}")]
    Conversion(String),

    /// The conversion program exited with a non-zero status
    #[error("Conversion to {format} failed with exit code {exit_code}")]
    ConversionFailed {
        /// Short name of the format that failed
        format: String,
        /// Process exit code
        exit_code: i32,
    },

    /// No registered task accepted the submitted name and payload
    #[error("Unhandled task: no handler accepts '{name}'")]
    UnhandledTask {
        /// The submitted task name
        name: String,
    },

    /// The job observed a shutdown signal
    #[error("Job cancelled")]
    Cancelled,

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl BundleError {
    /// Whether this error was caused by cancellation rather than a failure
    pub fn is_cancelled(&self) -> bool {
        matches!(self, BundleError::Cancelled)
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for BundleError {
    fn from(err: std::io::Error) -> Self {
        BundleError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for BundleError {
    fn from(err: serde_json::Error) -> Self {
        BundleError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for BundleError {
    fn from(err: toml::de::Error) -> Self {
        BundleError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_error_display() {
        let err = BundleError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_conversion_failed_names_format() {
        let err = BundleError::ConversionFailed {
            format: "SHP".to_string(),
            exit_code: 1,
        };
        assert_eq!(
            err.to_string(),
            "Conversion to SHP failed with exit code 1"
        );
    }

    #[test]
    fn test_unhandled_task_display() {
        let err = BundleError::UnhandledTask {
            name: "UNKNOWN".to_string(),
        };
        assert!(err.to_string().contains("UNKNOWN"));
    }

    #[test]
    fn test_is_cancelled() {
        assert!(BundleError::Cancelled.is_cancelled());
        assert!(!BundleError::Storage("x".to_string()).is_cancelled());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: BundleError = io_err.into();
        assert!(matches!(err, BundleError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: BundleError = json_err.into();
        assert!(matches!(err, BundleError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: BundleError = toml_err.into();
        assert!(matches!(err, BundleError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }
}
