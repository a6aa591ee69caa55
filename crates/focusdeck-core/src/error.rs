//! Core error types for focusdeck-core.
//!
//! Nothing in the core is fatal: validation errors are surfaced next to the
//! offending field, environment errors are logged and degrade silently.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for focusdeck-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Host environment could not provide a capability
    #[error("Environment unavailable: {0}")]
    Environment(#[from] EnvironmentError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// User input that cannot be accepted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Track title was empty after trimming
    #[error("A title is required")]
    TitleRequired,

    /// No video identifier could be extracted from the URL
    #[error("Not a recognizable YouTube URL")]
    InvalidUrl,

    /// Minute input was not a number
    #[error("Invalid minutes value '{input}'")]
    InvalidMinutes { input: String },
}

impl ValidationError {
    /// Stable machine-readable code for the field-level message.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::TitleRequired => "TITLE_REQUIRED",
            ValidationError::InvalidUrl => "INVALID_URL",
            ValidationError::InvalidMinutes { .. } => "INVALID_MINUTES",
        }
    }
}

/// A host capability is missing or refused the request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvironmentError {
    #[error("Wake lock unavailable: {0}")]
    WakeLockUnavailable(String),

    #[error("Playback blocked: {0}")]
    PlaybackBlocked(String),
}

/// Key-value storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the backing database
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(#[from] rusqlite::Error),

    /// Serialization of a stored value failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Data directory could not be prepared
    #[error("Data directory unavailable: {0}")]
    DataDir(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
