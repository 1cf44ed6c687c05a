//! Domain error types
//!
//! This module defines the error hierarchy for Portico. All errors are
//! domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Portico error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum PorticoError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Data-source errors (row cursor broken, source file unreadable)
    #[error("Source error: {0}")]
    Source(String),

    /// Validation errors (configuration values that parse but are invalid)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors (sink cannot be opened or written)
    #[error("I/O error: {0}")]
    Io(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for PorticoError {
    fn from(err: std::io::Error) -> Self {
        PorticoError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for PorticoError {
    fn from(err: serde_json::Error) -> Self {
        PorticoError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for PorticoError {
    fn from(err: toml::de::Error) -> Self {
        PorticoError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portico_error_display() {
        let err = PorticoError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: PorticoError = io_err.into();
        assert!(matches!(err, PorticoError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: PorticoError = json_err.into();
        assert!(matches!(err, PorticoError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: PorticoError = toml_err.into();
        assert!(matches!(err, PorticoError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_portico_error_implements_std_error() {
        let err = PorticoError::Validation("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
