//! Core error types for dailythree-core.
//!
//! Refused domain operations (adding past the task cap, editing a locked
//! task, ...) are not errors: they return `None` and leave state untouched.
//! The types here cover fallible construction, configuration I/O and the
//! feedback handoff.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for dailythree-core.
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

    /// A holder of the shared planner panicked mid-update
    #[error("Planner state lock poisoned")]
    Poisoned,
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

    /// Key does not name a configuration field
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Time slot hours out of range or not ordered
    #[error("Invalid time slot: start ({start}) must be before end ({end}), both within 0..=23")]
    InvalidTimeSlot { start: u8, end: u8 },

    /// Text is empty after trimming whitespace
    #[error("'{field}' must not be empty")]
    EmptyText { field: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
