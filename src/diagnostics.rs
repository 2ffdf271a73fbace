// diagnostics.rs - Output for the crate's own warnings
// Hook failures and missing registrations are reported through `tracing`;
// this installs a formatter so they reach stderr in programs without one.

use tracing::Level;

use crate::errors::{LoggerError, LoggerResult};
use crate::log_level::LogLevel;

/// Install a global `tracing_subscriber` formatter capped at `max_level`.
///
/// Fails when a global subscriber is already set.
pub fn init_diagnostics(max_level: LogLevel) -> LoggerResult<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::from(max_level))
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .map_err(|e| LoggerError::config(format!("failed to install diagnostics subscriber: {e}")))
}
