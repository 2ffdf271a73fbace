use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::LoggerError;

/// LogLevel is the fixed, positionally ordered severity sequence
/// `debug < info < warn < error < log`.
///
/// Ordering is by position only. `Log` sorts above `Error` and therefore
/// passes every threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum LogLevel {
    #[default]
    Debug,
    Info,
    Warn,
    Error,
    Log,
}

impl LogLevel {
    /// Every level in threshold order.
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Log,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Log => "log",
        }
    }

    /// Position of the level in [`LogLevel::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether a call at `self` clears the configured `threshold`.
    pub const fn passes(self, threshold: LogLevel) -> bool {
        self.index() >= threshold.index()
    }

    /// The `"<level> | "` prefix written ahead of every emitted message.
    pub fn prefix(self) -> String {
        format!("{} | ", self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(input: &str) -> Result<LogLevel, Self::Err> {
        match input.trim().to_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "log" => Ok(LogLevel::Log),
            _ => Err(LoggerError::invalid_level(input)),
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = LoggerError;

    fn try_from(value: String) -> Result<Self, LoggerError> {
        value.parse()
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// `log` has no tracing counterpart; it is reported at INFO.
impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info | LogLevel::Log => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Info | LogLevel::Log => log::Level::Info,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Error => log::Level::Error,
        }
    }
}
