//! Error types for the bookstore query runner.
//!
//! Defines the main error enum used throughout the application.

use thiserror::Error;

/// Main error type for bookstore operations.
#[derive(Error, Debug)]
pub enum BookstoreError {
    /// Store connection errors (host unreachable, auth failed, ping rejected, etc.)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Operation errors (find, update, delete, or count rejected by the store)
    #[error("Query error: {0}")]
    Query(String),

    /// Configuration errors (invalid config file, bad URI, unreadable seed file, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal application errors (unexpected states, bugs, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BookstoreError {
    /// Creates a connection error with the given message.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a query error with the given message.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Connection(_) => "Connection Error",
            Self::Query(_) => "Query Error",
            Self::Config(_) => "Configuration Error",
            Self::Internal(_) => "Internal Error",
        }
    }
}

/// Result type alias using BookstoreError.
pub type Result<T> = std::result::Result<T, BookstoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_connection() {
        let err = BookstoreError::connection("Server selection timeout: localhost:27017");
        assert_eq!(
            err.to_string(),
            "Connection error: Server selection timeout: localhost:27017"
        );
        assert_eq!(err.category(), "Connection Error");
    }

    #[test]
    fn test_error_display_query() {
        let err = BookstoreError::query("unknown operator: $gtt");
        assert_eq!(err.to_string(), "Query error: unknown operator: $gtt");
        assert_eq!(err.category(), "Query Error");
    }

    #[test]
    fn test_error_display_config() {
        let err = BookstoreError::config("Invalid scheme 'http'");
        assert_eq!(
            err.to_string(),
            "Configuration error: Invalid scheme 'http'"
        );
        assert_eq!(err.category(), "Configuration Error");
    }

    #[test]
    fn test_error_display_internal() {
        let err = BookstoreError::internal("unexpected state");
        assert_eq!(err.to_string(), "Internal error: unexpected state");
        assert_eq!(err.category(), "Internal Error");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BookstoreError>();
    }
}
