//! Library root for the `hooklog` crate
//!
//! A leveled logging facade: calls are filtered by an enabled flag and a
//! minimum level, written to a sink with a `"<level> | "` prefix, and
//! bracketed by caller-supplied before and after hooks.

// Core error handling
pub mod errors;

// Levels, values and events
pub mod log_event;
pub mod log_level;

// Output sinks
pub mod log_bridge;
pub mod log_sink;

// Hooks & configuration
pub mod config;
pub mod config_loader;
pub mod hooks;

// The facade itself
pub mod logger;
pub mod registry;

// Diagnostics
pub mod diagnostics;


pub use config::{LoggerOptions, OptionsPatch};
pub use config_loader::{load_settings, LoggerSettings};
pub use errors::{HookError, LoggerError, LoggerResult};
pub use hooks::{FnHook, HookFailure, LoggerHook, RecordingHook};
pub use log_bridge::{LogFacadeSink, TracingSink};
pub use log_event::{LogEvent, LogValue};
pub use log_level::LogLevel;
pub use log_sink::{Channel, ConsoleSink, LogSink, MemorySink, SinkCapabilities, WriterSink};
pub use logger::{create_logger, Dispatch, Logger};
pub use registry::{use_logger, AppContext, InjectionKey};
