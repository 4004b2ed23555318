//! Core error types for posttime-core.
//!
//! The engine and the shell are total and never return errors. Everything
//! here concerns building schedule tables and loading configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for posttime-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML serialization errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),
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

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Schedule table and format validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A peak-hour table has no entries
    #[error("Empty table: {0}")]
    EmptyTable(String),

    /// Hour outside 0-23
    #[error("Hour {hour} in {table} is out of range (0-23)")]
    HourOutOfRange { table: String, hour: u8 },

    /// Low-engagement hour also listed as a peak hour
    #[error("Hour {hour} is both a low-engagement hour and a {table} peak hour")]
    OverlappingHours { table: String, hour: u8 },

    /// Display pattern chrono cannot render
    #[error("Invalid time format '{0}'")]
    InvalidTimeFormat(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
