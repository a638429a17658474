//! Core error types for caffeine-core.
//!
//! This module defines the error hierarchy using thiserror so that the
//! model, the dose log and the configuration layer report failures in a
//! uniform way.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for caffeine-core.
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

    /// TOML parse errors
    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("TOML serialize error: {0}")]
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

    /// Key does not exist in the configuration tree
    #[error("unknown config key: {0}")]
    UnknownKey(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A model parameter that must be strictly positive and finite was not
    #[error("Invalid parameter '{name}': {value} (must be a positive, finite number)")]
    InvalidParameter { name: &'static str, value: f64 },

    /// Horizon and resolution describe a grid too large to sample
    #[error("Sample grid of {samples} points exceeds the limit of {max}; raise resolution_hours or lower horizon_hours")]
    TooManySamples { samples: f64, max: usize },

    /// Dose hour could not be parsed or is outside 0-23
    #[error("Invalid hour '{input}': expected a whole hour between 0 and 23")]
    InvalidHour { input: String },

    /// No hours were supplied
    #[error("No dose hours given")]
    NoHours,

    /// Dose amount is not a positive, finite number
    #[error("Invalid amount {value}: must be greater than zero")]
    InvalidAmount { value: f64 },

    /// Out of bounds
    #[error("Index {index} out of bounds for {collection} (length: {len})")]
    OutOfBounds {
        collection: String,
        index: usize,
        len: usize,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
