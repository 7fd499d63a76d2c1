//! Core error types for availability-core.
//!
//! This module defines the error hierarchy using thiserror. Malformed time
//! text is deliberately absent: it degrades to zero minutes instead of
//! failing (see [`crate::time::minutes_of`]).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for availability-core.
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

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
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

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Home directory could not be determined
    #[error("Could not determine the configuration directory")]
    NoConfigDir,
}

/// Validation errors raised before a schedule is generated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Step resolves to zero or a negative duration
    #[error("Time step must be positive, got '{0}'")]
    NonPositiveStep(String),

    /// No days requested
    #[error("Day count must be at least 1")]
    ZeroDayCount,

    /// More days than one grid may cover
    #[error("Day count {count} exceeds the maximum of {max}")]
    DayCountTooLarge { count: u32, max: u32 },

    /// Work day is empty or reversed
    #[error("Work day must start before it ends ({start} >= {end})")]
    InvalidWorkDay { start: String, end: String },

    /// Work day runs past midnight
    #[error("Work day must end by 24:00, got {0}")]
    WorkDayPastMidnight(String),

    /// Lunch window ends after the work day
    #[error("Lunch window {start} + {duration} ends after work end {end}")]
    LunchOutsideWorkDay {
        start: String,
        duration: String,
        end: String,
    },

    /// Shortening removes the whole day
    #[error("Last day cannot be shortened by {shorten_by}: work day is only {span}")]
    ShortenTooLarge { shorten_by: String, span: String },

    /// Empty collection
    #[error("Empty collection: {0}")]
    EmptyCollection(String),

    /// Two catalog entries share a level number
    #[error("Duplicate workload level {0} in catalog")]
    DuplicateLevel(u32),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Stylesheet errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StyleError {
    /// Rule text could not be parsed as `selector { prop: value; }`
    #[error("Invalid style rule '{rule}': {reason}")]
    InvalidRule { rule: String, reason: String },

    /// Custom property name does not start with `--`
    #[error("Invalid custom property name '{0}'")]
    InvalidProperty(String),
}

impl From<toml::de::Error> for CoreError {
    fn from(err: toml::de::Error) -> Self {
        CoreError::Custom(format!("TOML parse error: {err}"))
    }
}

impl From<toml::ser::Error> for CoreError {
    fn from(err: toml::ser::Error) -> Self {
        CoreError::Custom(format!("TOML serialize error: {err}"))
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
