//! Sinks forwarding into the `tracing` and `log` ecosystems.
//!
//! Both bridges expose dedicated outputs for `debug`, `info`, `warn` and
//! `error`. Neither ecosystem has a `log` severity, so calls at that level take
//! the generic output, which is emitted at info.

use crate::log_event::LogValue;
use crate::log_level::LogLevel;
use crate::log_sink::{render_line, LogSink};

/// Target used for every record emitted by the bridges.
pub const BRIDGE_TARGET: &str = "hooklog";

fn has_native_level(level: LogLevel) -> bool {
    !matches!(level, LogLevel::Log)
}

/// Forwards messages as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn supports(&self, level: LogLevel) -> bool {
        has_native_level(level)
    }

    fn write_level(&self, level: LogLevel, prefix: &str, args: &[LogValue]) {
        let line = render_line(prefix, args);
        match level {
            LogLevel::Debug => tracing::debug!(target: BRIDGE_TARGET, "{line}"),
            LogLevel::Info => tracing::info!(target: BRIDGE_TARGET, "{line}"),
            LogLevel::Warn => tracing::warn!(target: BRIDGE_TARGET, "{line}"),
            LogLevel::Error => tracing::error!(target: BRIDGE_TARGET, "{line}"),
            LogLevel::Log => self.write_log(prefix, args),
        }
    }

    fn write_log(&self, prefix: &str, args: &[LogValue]) {
        tracing::info!(target: BRIDGE_TARGET, channel = "log", "{}", render_line(prefix, args));
    }
}

/// Forwards messages to whatever `log` implementation is installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogFacadeSink;

impl LogSink for LogFacadeSink {
    fn supports(&self, level: LogLevel) -> bool {
        has_native_level(level)
    }

    fn write_level(&self, level: LogLevel, prefix: &str, args: &[LogValue]) {
        let line = render_line(prefix, args);
        log::log!(target: BRIDGE_TARGET, log::Level::from(level), "{line}");
    }

    fn write_log(&self, prefix: &str, args: &[LogValue]) {
        log::info!(target: BRIDGE_TARGET, "{}", render_line(prefix, args));
    }
}
