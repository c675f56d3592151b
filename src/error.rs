// src/error.rs

//! Unified error handling for the digest application.
//!
//! Only conditions that must stop a run are represented here. Per-thread and
//! per-recipient problems are logged and degraded where they happen.

use std::fmt;

use thiserror::Error;

/// Result type alias for digest operations.
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

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// The bot token was rejected
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The configured forum channel does not exist or is not visible
    #[error("Channel {0} not found")]
    ChannelNotFound(String),

    /// The configured channel exists but is not a forum
    #[error("Channel {id} is not a forum channel (type {kind})")]
    NotAForum { id: String, kind: u8 },

    /// The platform refused the request
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-success API response
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Forum source failure with context
    #[error("Source error for {context}: {message}")]
    Source { context: String, message: String },
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

    /// Create a forum source error with context.
    pub fn source(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Source {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Whether the error means "this item is not there for us", as opposed
    /// to a transport or server failure.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Forbidden(_))
    }
}
