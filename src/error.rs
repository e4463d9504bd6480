// src/error.rs

//! Unified error handling for the hotel matching application.

use std::fmt;

use thiserror::Error;

/// Result type alias for hotelmatch operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Hotel data could not be loaded or was empty
    #[error("Failed to load hotel data: {0}")]
    DataUnavailable(String),

    /// Search host answered with something other than a usable result
    #[error("Search host {host} failed: {message}")]
    Host { host: String, message: String },

    /// Every configured search host failed
    #[error("All {attempts} search hosts failed")]
    AllHostsFailed { attempts: usize },
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a data-unavailable error.
    pub fn data_unavailable(message: impl fmt::Display) -> Self {
        Self::DataUnavailable(message.to_string())
    }

    /// Create a host error with context.
    pub fn host(host: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Host {
            host: host.into(),
            message: message.to_string(),
        }
    }
}
