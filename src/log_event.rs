// log_event.rs - Loggable values and the event handed to hooks

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::log_level::LogLevel;

/// A single argument of a log call.
///
/// Serialized untagged, so reading a value back picks the first variant whose
/// shape matches: a JSON string or number wrapped in `Json` comes back as
/// `Str`, `Int` or `Float`, and a `u64` beyond `i64::MAX` is already stored as
/// `Float`. Arrays and objects stay `Json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LogValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Json(serde_json::Value),
}

impl fmt::Display for LogValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogValue::Null => f.write_str("null"),
            LogValue::Bool(b) => write!(f, "{b}"),
            LogValue::Int(i) => write!(f, "{i}"),
            LogValue::Float(x) => write!(f, "{x}"),
            LogValue::Str(s) => f.write_str(s),
            LogValue::Json(v) => write!(f, "{v}"),
        }
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for LogValue {
            fn from(v: $t) -> Self {
                LogValue::Int(i64::from(v))
            }
        })*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<usize> for LogValue {
    fn from(v: usize) -> Self {
        i64::try_from(v).map_or(LogValue::Float(v as f64), LogValue::Int)
    }
}

impl From<u64> for LogValue {
    fn from(v: u64) -> Self {
        i64::try_from(v).map_or(LogValue::Float(v as f64), LogValue::Int)
    }
}

impl From<f32> for LogValue {
    fn from(v: f32) -> Self {
        LogValue::Float(f64::from(v))
    }
}

impl From<f64> for LogValue {
    fn from(v: f64) -> Self {
        LogValue::Float(v)
    }
}

impl From<bool> for LogValue {
    fn from(v: bool) -> Self {
        LogValue::Bool(v)
    }
}

impl From<&str> for LogValue {
    fn from(v: &str) -> Self {
        LogValue::Str(v.to_string())
    }
}

impl From<String> for LogValue {
    fn from(v: String) -> Self {
        LogValue::Str(v)
    }
}

impl From<&String> for LogValue {
    fn from(v: &String) -> Self {
        LogValue::Str(v.clone())
    }
}

impl From<serde_json::Value> for LogValue {
    fn from(v: serde_json::Value) -> Self {
        LogValue::Json(v)
    }
}

impl<T: Into<LogValue>> From<Option<T>> for LogValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(LogValue::Null, Into::into)
    }
}

/// Build a `Vec<LogValue>` from heterogeneous arguments.
///
/// ```
/// use hooklog::{log_args, LogValue};
///
/// let args = log_args!["user", 42, true];
/// assert_eq!(args[1], LogValue::Int(42));
/// ```
#[macro_export]
macro_rules! log_args {
    () => {
        ::std::vec::Vec::<$crate::LogValue>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::LogValue::from($arg)),+]
    };
}

/// Join arguments with single spaces, the way the sinks render them.
pub fn join_args(args: &[LogValue]) -> String {
    args.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// LogEvent is the level and argument bundle passed to hooks.
///
/// Built fresh for every call that clears the level guard; the logger never
/// keeps it after the after-hooks return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEvent {
    pub level: LogLevel,
    pub argument_array: Vec<LogValue>,
    pub timestamp: DateTime<Utc>,
}

impl LogEvent {
    pub fn new(level: LogLevel, argument_array: Vec<LogValue>) -> Self {
        Self {
            level,
            argument_array,
            timestamp: Utc::now(),
        }
    }

    /// Arguments rendered as one space-separated message, without prefix.
    pub fn message(&self) -> String {
        join_args(&self.argument_array)
    }
}
