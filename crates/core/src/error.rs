//! Error types for the RAG chat workspace.
//!
//! This module defines a unified error enum that covers all error categories
//! surfaced to the command line: configuration, I/O, relay, engine, chat
//! and serialization errors.

use thiserror::Error;

/// Unified error type for the RAG chat CLI.
///
/// Component crates keep their own narrow error enums and convert into
/// `AppError` at the binary boundary.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Relay server errors (bind, serve)
    #[error("Relay error: {0}")]
    Relay(String),

    /// External query engine errors
    #[error("Engine error: {0}")]
    Engine(String),

    /// Chat UI errors
    #[error("Chat error: {0}")]
    Chat(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::Config("bad bind".to_string());
        assert_eq!(err.to_string(), "Configuration error: bad bind");

        let err = AppError::Other("plain".to_string());
        assert_eq!(err.to_string(), "plain");
    }

    #[test]
    fn test_from_serde_json() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: AppError = parse_err.into();
        assert!(matches!(err, AppError::Serialization(_)));
    }
}
