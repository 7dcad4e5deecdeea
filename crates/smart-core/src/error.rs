//! Error types for the SMART core library.

use thiserror::Error;

/// Result type alias using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error types for the theme enhancements.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration parsing or validation error.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A CSS token (duration or length) that could not be interpreted.
    #[error("Invalid CSS token for {name}: {value:?}")]
    InvalidToken { name: String, value: String },

    /// A clipboard write attempt failed.
    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

impl CoreError {
    /// Create a new configuration error with a message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source.
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new invalid token error.
    pub fn invalid_token(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidToken {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Create a new clipboard error.
    pub fn clipboard(message: impl Into<String>) -> Self {
        Self::Clipboard(message.into())
    }
}
