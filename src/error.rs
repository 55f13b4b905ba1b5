//! Error types for Hey
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Hey operations
///
/// This enum encompasses all possible errors that can occur while talking
/// to the completion provider, rendering markdown, loading configuration,
/// and reading or writing the chat history store.
#[derive(Error, Debug)]
pub enum HeyError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider-related errors (API calls, authentication, quota)
    #[error("Provider error: {0}")]
    Provider(String),

    /// External markdown renderer errors
    ///
    /// These are absorbed at the render layer (the renderer is purely
    /// presentational) and never abort an invocation.
    #[error("Render error: {0}")]
    Render(String),

    /// The persisted chat history document is structurally invalid
    #[error("Corrupt chat history: {0}")]
    StoreCorrupt(String),

    /// A requested conversation does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Terminal I/O errors (raw mode, key reads)
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Hey operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = HeyError::Config("invalid page size".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid page size");
    }

    #[test]
    fn test_provider_error_display() {
        let error = HeyError::Provider("API timeout".to_string());
        assert_eq!(error.to_string(), "Provider error: API timeout");
    }

    #[test]
    fn test_render_error_display() {
        let error = HeyError::Render("glow exited with signal".to_string());
        assert_eq!(error.to_string(), "Render error: glow exited with signal");
    }

    #[test]
    fn test_store_corrupt_error_display() {
        let error = HeyError::StoreCorrupt("expected a list".to_string());
        assert_eq!(error.to_string(), "Corrupt chat history: expected a list");
    }

    #[test]
    fn test_not_found_error_display() {
        let error = HeyError::NotFound("conversation abc123".to_string());
        assert_eq!(error.to_string(), "Not found: conversation abc123");
    }

    #[test]
    fn test_terminal_error_display() {
        let error = HeyError::Terminal("stdin closed".to_string());
        assert_eq!(error.to_string(), "Terminal error: stdin closed");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: HeyError = io_error.into();
        assert!(matches!(error, HeyError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_str = "{invalid json}";
        let json_error = serde_json::from_str::<serde_json::Value>(json_str).unwrap_err();
        let error: HeyError = json_error.into();
        assert!(matches!(error, HeyError::Serialization(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_str = "invalid: : yaml";
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let error: HeyError = yaml_error.into();
        assert!(matches!(error, HeyError::Yaml(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HeyError>();
    }
}
