// log_sink.rs - Output sinks and one-time capability probing
// A sink exposes an optional dedicated output per level plus a generic `log`
// output that is always present.

use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::log_event::{join_args, LogValue};
use crate::log_level::LogLevel;

/// Output mechanism the logger writes prefixed messages to.
pub trait LogSink: Send + Sync {
    /// Whether the sink has a dedicated output for `level`.
    fn supports(&self, level: LogLevel) -> bool;

    /// Write through the dedicated output for `level`.
    fn write_level(&self, level: LogLevel, prefix: &str, args: &[LogValue]);

    /// Generic output every sink provides.
    fn write_log(&self, prefix: &str, args: &[LogValue]);
}

/// Which sink output a message went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Dedicated(LogLevel),
    Generic,
}

/// Set of levels a sink resolved a dedicated output for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SinkCapabilities {
    mask: u8,
}

impl SinkCapabilities {
    /// Resolve every level against the sink once.
    pub fn probe(sink: &dyn LogSink) -> Self {
        LogLevel::ALL
            .into_iter()
            .filter(|level| sink.supports(*level))
            .collect()
    }

    pub fn contains(&self, level: LogLevel) -> bool {
        self.mask & (1 << level.index()) != 0
    }

    pub fn levels(&self) -> impl Iterator<Item = LogLevel> + '_ {
        LogLevel::ALL.into_iter().filter(|level| self.contains(*level))
    }

    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }
}

impl FromIterator<LogLevel> for SinkCapabilities {
    fn from_iter<I: IntoIterator<Item = LogLevel>>(iter: I) -> Self {
        let mask = iter
            .into_iter()
            .fold(0u8, |mask, level| mask | (1 << level.index()));
        Self { mask }
    }
}

/// Render one output line: the prefix followed by space-joined arguments.
pub fn render_line(prefix: &str, args: &[LogValue]) -> String {
    format!("{prefix}{}", join_args(args))
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Process console: `debug`, `info` and `log` go to stdout, `warn` and
/// `error` to stderr. All five levels are dedicated.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn supports(&self, _level: LogLevel) -> bool {
        true
    }

    fn write_level(&self, level: LogLevel, prefix: &str, args: &[LogValue]) {
        let line = render_line(prefix, args);
        // A closed stdout/stderr must not take the caller down.
        let _ = match level {
            LogLevel::Warn | LogLevel::Error => writeln!(io::stderr().lock(), "{line}"),
            LogLevel::Debug | LogLevel::Info | LogLevel::Log => {
                writeln!(io::stdout().lock(), "{line}")
            }
        };
    }

    fn write_log(&self, prefix: &str, args: &[LogValue]) {
        self.write_level(LogLevel::Log, prefix, args);
    }
}

/// Sink over any [`io::Write`] target. A plain writer has a single output, so
/// only the generic one is exposed and every level falls back to it.
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> LogSink for WriterSink<W> {
    fn supports(&self, _level: LogLevel) -> bool {
        false
    }

    fn write_level(&self, _level: LogLevel, prefix: &str, args: &[LogValue]) {
        self.write_log(prefix, args);
    }

    fn write_log(&self, prefix: &str, args: &[LogValue]) {
        let mut writer = lock(&self.writer);
        let _ = writeln!(writer, "{}", render_line(prefix, args)).and_then(|_| writer.flush());
    }
}

/// One call recorded by a [`MemorySink`].
#[derive(Debug, Clone, PartialEq)]
pub struct SinkRecord {
    pub channel: Channel,
    pub prefix: String,
    pub args: Vec<LogValue>,
}

impl SinkRecord {
    pub fn line(&self) -> String {
        render_line(&self.prefix, &self.args)
    }
}

/// In-memory sink recording every call, with a configurable set of dedicated
/// outputs.
#[derive(Debug)]
pub struct MemorySink {
    channels: SinkCapabilities,
    records: Mutex<Vec<SinkRecord>>,
}

impl MemorySink {
    /// Sink with a dedicated output for every level.
    pub fn new() -> Self {
        Self::with_channels(LogLevel::ALL)
    }

    /// Sink exposing dedicated outputs only for `levels`.
    pub fn with_channels(levels: impl IntoIterator<Item = LogLevel>) -> Self {
        Self {
            channels: levels.into_iter().collect(),
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn records(&self) -> Vec<SinkRecord> {
        lock(&self.records).clone()
    }

    pub fn lines(&self) -> Vec<String> {
        lock(&self.records).iter().map(SinkRecord::line).collect()
    }

    pub fn len(&self) -> usize {
        lock(&self.records).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        lock(&self.records).clear();
    }

    fn push(&self, channel: Channel, prefix: &str, args: &[LogValue]) {
        lock(&self.records).push(SinkRecord {
            channel,
            prefix: prefix.to_string(),
            args: args.to_vec(),
        });
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for MemorySink {
    fn supports(&self, level: LogLevel) -> bool {
        self.channels.contains(level)
    }

    fn write_level(&self, level: LogLevel, prefix: &str, args: &[LogValue]) {
        self.push(Channel::Dedicated(level), prefix, args);
    }

    fn write_log(&self, prefix: &str, args: &[LogValue]) {
        self.push(Channel::Generic, prefix, args);
    }
}
