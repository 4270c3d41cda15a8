//! Error types for Easel.
//!
//! Defines the main error enum used throughout the application. The command
//! console itself never returns errors — every failure inside it is logged
//! and recovered from — so these variants cover the ambient edges only
//! (configuration, terminal I/O, internal invariants).

use thiserror::Error;

/// Main error type for Easel operations.
#[derive(Error, Debug)]
pub enum EaselError {
    /// Configuration errors (invalid config file, bad shortcut chord, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Terminal errors (raw mode, event polling, draw failures, etc.)
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Internal application errors (unexpected states, bugs, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl EaselError {
    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a terminal error with the given message.
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "Configuration Error",
            Self::Terminal(_) => "Terminal Error",
            Self::Internal(_) => "Internal Error",
        }
    }
}

/// Result type alias using EaselError.
pub type Result<T> = std::result::Result<T, EaselError>;
