//! The leveled logging facade.
//!
//! A [`Logger`] holds its [`LoggerOptions`], a sink, and the sink's
//! capabilities probed once at construction. Each per-level call goes through
//! one dispatch routine:
//!
//! 1. the enabled flag and level threshold are checked, and a failing check
//!    returns [`Dispatch::Suppressed`] with no other effect;
//! 2. before hooks run in order;
//! 3. the message is written with its `"<level> | "` prefix, through the
//!    sink's dedicated output for that level when it has one and the generic
//!    output otherwise;
//! 4. after hooks run in order.
//!
//! Hook failures never reach the caller as errors. They are reported with
//! `tracing::warn!` and collected in the returned [`Dispatch`].
//!
//! ```
//! use std::sync::Arc;
//! use hooklog::{log_args, Logger, LogLevel, MemorySink, OptionsPatch};
//!
//! let sink = Arc::new(MemorySink::new());
//! let mut logger = Logger::new(OptionsPatch::new(), sink.clone());
//! logger.apply(OptionsPatch::new().with_level(LogLevel::Warn));
//!
//! logger.debug(["dropped"]);
//! logger.error(log_args!["disk full", 98]);
//!
//! assert_eq!(sink.lines(), vec!["error | disk full 98"]);
//! ```

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::config::{LoggerOptions, OptionsPatch};
use crate::hooks::{self, HookFailure, HookPhase};
use crate::log_event::{LogEvent, LogValue};
use crate::log_level::LogLevel;
use crate::log_sink::{Channel, ConsoleSink, LogSink, SinkCapabilities};

/// Outcome of a single log call.
#[derive(Debug)]
pub enum Dispatch {
    /// Logger disabled or level below threshold. Nothing ran.
    Suppressed,
    Emitted {
        channel: Channel,
        hook_failures: Vec<HookFailure>,
    },
}

impl Dispatch {
    pub fn is_emitted(&self) -> bool {
        matches!(self, Dispatch::Emitted { .. })
    }

    pub fn hook_failures(&self) -> &[HookFailure] {
        match self {
            Dispatch::Suppressed => &[],
            Dispatch::Emitted { hook_failures, .. } => hook_failures,
        }
    }
}

pub struct Logger {
    options: LoggerOptions,
    sink: Arc<dyn LogSink>,
    capabilities: SinkCapabilities,
}

impl Logger {
    /// Build a logger over `sink`, probing its outputs once, then apply
    /// `patch` over the built-in defaults.
    pub fn new(patch: OptionsPatch, sink: Arc<dyn LogSink>) -> Self {
        let capabilities = SinkCapabilities::probe(sink.as_ref());
        let mut logger = Logger {
            options: LoggerOptions::default(),
            sink,
            capabilities,
        };
        logger.apply(patch);
        logger
    }

    /// Merge `patch` over the current options and reinstall both hook lists.
    ///
    /// Returns the install failures, each of which has already been reported.
    pub fn apply(&mut self, patch: OptionsPatch) -> Vec<HookFailure> {
        self.options = self.options.merged(patch);

        let mut failures =
            hooks::install_hooks(HookPhase::Before, &self.options.before_hooks, &self.options);
        failures.extend(hooks::install_hooks(
            HookPhase::After,
            &self.options.after_hooks,
            &self.options,
        ));

        debug!(
            enabled = self.options.enabled,
            level = %self.options.level,
            before_hooks = self.options.before_hooks.len(),
            after_hooks = self.options.after_hooks.len(),
            install_failures = failures.len(),
            "logger options applied"
        );

        failures
    }

    pub fn debug<I, V>(&self, args: I) -> Dispatch
    where
        I: IntoIterator<Item = V>,
        V: Into<LogValue>,
    {
        self.log_at(LogLevel::Debug, args)
    }

    pub fn info<I, V>(&self, args: I) -> Dispatch
    where
        I: IntoIterator<Item = V>,
        V: Into<LogValue>,
    {
        self.log_at(LogLevel::Info, args)
    }

    pub fn warn<I, V>(&self, args: I) -> Dispatch
    where
        I: IntoIterator<Item = V>,
        V: Into<LogValue>,
    {
        self.log_at(LogLevel::Warn, args)
    }

    pub fn error<I, V>(&self, args: I) -> Dispatch
    where
        I: IntoIterator<Item = V>,
        V: Into<LogValue>,
    {
        self.log_at(LogLevel::Error, args)
    }

    pub fn log<I, V>(&self, args: I) -> Dispatch
    where
        I: IntoIterator<Item = V>,
        V: Into<LogValue>,
    {
        self.log_at(LogLevel::Log, args)
    }

    /// Log at a level chosen at runtime.
    pub fn log_at<I, V>(&self, level: LogLevel, args: I) -> Dispatch
    where
        I: IntoIterator<Item = V>,
        V: Into<LogValue>,
    {
        self.invoke(level, args.into_iter().map(Into::into).collect())
    }

    fn invoke(&self, level: LogLevel, args: Vec<LogValue>) -> Dispatch {
        if !self.options.enabled || !level.passes(self.options.level) {
            return Dispatch::Suppressed;
        }

        let event = LogEvent::new(level, args);
        let mut hook_failures =
            hooks::run_hooks(HookPhase::Before, &self.options.before_hooks, &event);

        let prefix = level.prefix();
        let channel = if self.capabilities.contains(level) {
            self.sink.write_level(level, &prefix, &event.argument_array);
            Channel::Dedicated(level)
        } else {
            self.sink.write_log(&prefix, &event.argument_array);
            Channel::Generic
        };

        hook_failures.extend(hooks::run_hooks(
            HookPhase::After,
            &self.options.after_hooks,
            &event,
        ));

        Dispatch::Emitted {
            channel,
            hook_failures,
        }
    }

    pub fn enabled(&self) -> bool {
        self.options.enabled
    }

    pub fn level(&self) -> LogLevel {
        self.options.level
    }

    pub fn options(&self) -> &LoggerOptions {
        &self.options
    }

    /// Sink outputs resolved at construction.
    pub fn capabilities(&self) -> SinkCapabilities {
        self.capabilities
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("options", &self.options)
            .field("capabilities", &self.capabilities)
            .finish_non_exhaustive()
    }
}

/// Logger writing to the process console.
pub fn create_logger(patch: OptionsPatch) -> Logger {
    Logger::new(patch, Arc::new(ConsoleSink))
}
