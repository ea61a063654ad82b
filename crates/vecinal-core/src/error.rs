//! Error types for the vecinal platform.

use thiserror::Error;

/// Result type alias using vecinal's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for vecinal operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Directory store read failed
    #[error("Store error: {0}")]
    Store(String),

    /// Invalid input from the caller
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error (missing credential, bad env value)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Completion provider rejected the request with HTTP 429
    #[error("Provider rate limited")]
    RateLimited,

    /// Completion provider returned a non-429 client or server error
    #[error("Provider returned {status}: {message}")]
    Provider { status: u16, message: String },

    /// Network failure reaching the completion provider
    #[error("Network error: {0}")]
    Network(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Network(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_store() {
        let err = Error::Store("connection refused".to_string());
        assert_eq!(err.to_string(), "Store error: connection refused");
    }

    #[test]
    fn test_error_display_invalid_input() {
        let err = Error::InvalidInput("empty question".to_string());
        assert_eq!(err.to_string(), "Invalid input: empty question");
    }

    #[test]
    fn test_error_display_config() {
        let err = Error::Config("missing API key".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing API key");
    }

    #[test]
    fn test_error_display_rate_limited() {
        assert_eq!(Error::RateLimited.to_string(), "Provider rate limited");
    }

    #[test]
    fn test_error_display_provider() {
        let err = Error::Provider {
            status: 503,
            message: "overloaded".to_string(),
        };
        assert_eq!(err.to_string(), "Provider returned 503: overloaded");
    }

    #[test]
    fn test_error_display_network() {
        let err = Error::Network("connection reset".to_string());
        assert_eq!(err.to_string(), "Network error: connection reset");
    }

    #[test]
    fn test_error_display_serialization() {
        let err = Error::Serialization("invalid JSON".to_string());
        assert_eq!(err.to_string(), "Serialization error: invalid JSON");
    }

    #[test]
    fn test_error_display_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::Io(io_err);
        assert!(err.to_string().contains("I/O error:"));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number");
        assert!(json_err.is_err());

        let err: Error = json_err.unwrap_err().into();
        match err {
            Error::Serialization(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err: Error = io_err.into();
        match err {
            Error::Io(_) => {}
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_result_type_ok() {
        fn get_result() -> Result<i32> {
            Ok(42)
        }
        assert_eq!(get_result().unwrap(), 42);
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }

    #[test]
    fn test_error_debug_format() {
        let err = Error::RateLimited;
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("RateLimited"));
    }
}
