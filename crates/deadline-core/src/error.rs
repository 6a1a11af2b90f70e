//! Core error types for deadline-core.
//!
//! Evaluation itself never fails; these errors describe the configuration
//! layer around it (settings file, date strings, window construction).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for deadline-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Date parsing and resolution errors
    #[error("Date error: {0}")]
    Date(#[from] DateError),

    /// Countdown window errors
    #[error("Window error: {0}")]
    Window(#[from] WindowError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML encoding errors
    #[error("TOML error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Missing required configuration key
    #[error("Missing required configuration key: {0}")]
    MissingKey(String),
}

/// Date-specific errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Input does not follow the expected layout
    #[error("Invalid date '{input}': expected {expected}")]
    InvalidFormat { input: String, expected: &'static str },

    /// Components are well-formed but do not name a real calendar instant
    #[error("Date out of range: {0}")]
    OutOfRange(String),

    /// Local midnight skipped by a clock change
    #[error("Local time does not exist: {0}")]
    Nonexistent(String),
}

/// Countdown window errors.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowError {
    /// Begin and end resolve to the same instant
    #[error("Empty window: begin and end are both {0}")]
    Empty(i64),

    /// The window is longer than an `i64` number of seconds
    #[error("Window from {begin} to {end} is too long")]
    TooLong { begin: i64, end: i64 },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
