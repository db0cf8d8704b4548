//! Custom error types for open-with
//!
//! This module provides a unified error type used by the registry, the
//! settings store, the platform layer and the command-line host.

use thiserror::Error;

/// Main error type for open-with operations
#[derive(Error, Debug)]
pub enum OpenWithError {
    /// IO-related errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Entity not found errors
    #[error("{entity} not found: {id}")]
    NotFound {
        entity: &'static str,
        id: String,
    },

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Platform-specific errors (process launch, clipboard, file browser)
    #[error("Platform error: {0}")]
    Platform(String),

    /// The plugin was used while not activated
    #[error("Plugin is not active: {0}")]
    PluginState(String),

    /// General errors with a message
    #[error("{0}")]
    General(String),
}

impl OpenWithError {
    /// Create a not found error
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a platform error
    pub fn platform(msg: impl Into<String>) -> Self {
        Self::Platform(msg.into())
    }

    /// Create a plugin state error
    pub fn plugin_state(msg: impl Into<String>) -> Self {
        Self::PluginState(msg.into())
    }
}

impl From<String> for OpenWithError {
    fn from(s: String) -> Self {
        Self::General(s)
    }
}

impl From<&str> for OpenWithError {
    fn from(s: &str) -> Self {
        Self::General(s.to_string())
    }
}

/// Result type alias using OpenWithError
pub type Result<T> = std::result::Result<T, OpenWithError>;
