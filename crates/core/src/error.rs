//! Error types for the prompt registry.
//!
//! This module defines a unified error enum covering configuration, I/O,
//! prompt parsing, workflow patching, and serialization failures.

use thiserror::Error;

/// Unified error type for the prompt registry.
///
/// All fallible functions in the workspace return `Result<T, AppError>`.
/// Per-file scan failures are logged by the registry and never reach callers
/// as an `AppError`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Prompt file and header errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Workflow document errors
    #[error("Workflow error: {0}")]
    Workflow(String),

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
