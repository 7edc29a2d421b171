//! Centralized error types for Scout.

use thiserror::Error;

/// Main error type for Scout operations.
#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unknown workflow: {0}")]
    UnknownWorkflow(String),

    #[error("Unknown field '{field}' for workflow '{workflow}'")]
    UnknownField { workflow: String, field: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for Scout operations.
pub type ScoutResult<T> = Result<T, ScoutError>;

impl ScoutError {
    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
