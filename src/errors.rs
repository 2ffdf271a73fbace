//! Error handling for the hooklog facade
//!
//! Two families of errors live here. [`LoggerError`] covers configuration and
//! registration problems surfaced to the caller. [`HookError`] is what a hook
//! returns from `install` or `run`; the logger never propagates it, it only
//! reports and collects it.

use std::any::Any;
use thiserror::Error;

/// Main error type for logger configuration and lookup
#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("Invalid log level: {value:?} (expected one of debug, info, warn, error, log)")]
    InvalidLevel { value: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to load logger settings: {0}")]
    Settings(#[from] Box<figment::Error>),

    #[error("No logger registered under {key}")]
    NotRegistered { key: String },
}

/// Type alias for Result with LoggerError
pub type LoggerResult<T> = Result<T, LoggerError>;

impl LoggerError {
    /// Create an invalid level error
    pub fn invalid_level(value: impl Into<String>) -> Self {
        Self::InvalidLevel {
            value: value.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a not registered error
    pub fn not_registered(key: impl Into<String>) -> Self {
        Self::NotRegistered { key: key.into() }
    }
}

/// Convert from figment errors
impl From<figment::Error> for LoggerError {
    fn from(err: figment::Error) -> Self {
        LoggerError::Settings(Box::new(err))
    }
}

/// Failure raised by a hook while installing or running.
#[derive(Error, Debug)]
pub enum HookError {
    #[error("Hook failed: {message}")]
    Failed { message: String },

    #[error("Hook panicked: {message}")]
    Panicked { message: String },

    #[error("Hook I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl HookError {
    /// Create a generic hook failure
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    /// Build a hook error from a panic payload caught by `catch_unwind`.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        Self::Panicked { message }
    }
}

impl From<serde_json::Error> for HookError {
    fn from(err: serde_json::Error) -> Self {
        HookError::failed(format!("serialization failed: {err}"))
    }
}
