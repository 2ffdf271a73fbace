// hooks.rs - Hook contract and fault-isolated install/run loops
//
// Every hook call is wrapped so that an error result or a panic is reported,
// collected, and followed by the next hook.

use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::warn;

use crate::config::LoggerOptions;
use crate::errors::HookError;
use crate::log_event::LogEvent;

/// Caller-supplied extension invoked at install time and around every
/// emitted message.
pub trait LoggerHook: Send + Sync {
    /// Called each time the logger's options are applied. No-op by default.
    fn install(&self, _options: &LoggerOptions) -> Result<(), HookError> {
        Ok(())
    }

    /// Called with the event of every call that clears the level guard.
    fn run(&self, event: &LogEvent) -> Result<(), HookError>;

    /// Name used when reporting failures.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Hook list a hook belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookPhase {
    Before,
    After,
}

impl fmt::Display for HookPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookPhase::Before => f.write_str("before"),
            HookPhase::After => f.write_str("after"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookAction {
    Install,
    Run,
}

impl fmt::Display for HookAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookAction::Install => f.write_str("install"),
            HookAction::Run => f.write_str("run"),
        }
    }
}

/// A single hook failure, collected instead of propagated.
#[derive(Debug)]
pub struct HookFailure {
    pub action: HookAction,
    pub phase: HookPhase,
    /// Position of the hook in its list.
    pub index: usize,
    pub hook: String,
    pub error: HookError,
}

impl fmt::Display for HookFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} hook #{} ({}) {} failure: {}",
            self.phase, self.index, self.hook, self.action, self.error
        )
    }
}

fn guarded<F>(
    action: HookAction,
    phase: HookPhase,
    index: usize,
    hook: &dyn LoggerHook,
    call: F,
) -> Option<HookFailure>
where
    F: FnOnce() -> Result<(), HookError>,
{
    let error = match catch_unwind(AssertUnwindSafe(call)) {
        Ok(Ok(())) => return None,
        Ok(Err(err)) => err,
        Err(payload) => HookError::from_panic(payload),
    };

    warn!(
        hook = %hook.name(),
        phase = %phase,
        index,
        error = %error,
        "LoggerHook {} failure",
        action
    );

    Some(HookFailure {
        action,
        phase,
        index,
        hook: hook.name().to_string(),
        error,
    })
}

/// Install every hook in `hooks`, continuing past failures.
pub(crate) fn install_hooks(
    phase: HookPhase,
    hooks: &[Arc<dyn LoggerHook>],
    options: &LoggerOptions,
) -> Vec<HookFailure> {
    hooks
        .iter()
        .enumerate()
        .filter_map(|(index, hook)| {
            guarded(HookAction::Install, phase, index, hook.as_ref(), || hook.install(options))
        })
        .collect()
}

/// Run every hook in `hooks` against `event`, continuing past failures.
pub(crate) fn run_hooks(
    phase: HookPhase,
    hooks: &[Arc<dyn LoggerHook>],
    event: &LogEvent,
) -> Vec<HookFailure> {
    hooks
        .iter()
        .enumerate()
        .filter_map(|(index, hook)| {
            guarded(HookAction::Run, phase, index, hook.as_ref(), || hook.run(event))
        })
        .collect()
}

type InstallFn = Box<dyn Fn(&LoggerOptions) -> Result<(), HookError> + Send + Sync>;

/// Hook built from closures.
///
/// ```
/// use hooklog::hooks::FnHook;
///
/// let hook = FnHook::new("audit", |event| {
///     assert!(!event.argument_array.is_empty());
///     Ok(())
/// })
/// .on_install(|options| {
///     assert!(options.enabled);
///     Ok(())
/// });
/// # let _ = hook;
/// ```
pub struct FnHook<R> {
    name: String,
    run: R,
    install: Option<InstallFn>,
}

impl<R> FnHook<R>
where
    R: Fn(&LogEvent) -> Result<(), HookError> + Send + Sync,
{
    pub fn new(name: impl Into<String>, run: R) -> Self {
        Self {
            name: name.into(),
            run,
            install: None,
        }
    }

    pub fn on_install<I>(mut self, install: I) -> Self
    where
        I: Fn(&LoggerOptions) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.install = Some(Box::new(install));
        self
    }
}

impl<R> fmt::Debug for FnHook<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHook")
            .field("name", &self.name)
            .field("has_install", &self.install.is_some())
            .finish()
    }
}

impl<R> LoggerHook for FnHook<R>
where
    R: Fn(&LogEvent) -> Result<(), HookError> + Send + Sync,
{
    fn install(&self, options: &LoggerOptions) -> Result<(), HookError> {
        match &self.install {
            Some(install) => install(options),
            None => Ok(()),
        }
    }

    fn run(&self, event: &LogEvent) -> Result<(), HookError> {
        (self.run)(event)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Hook that keeps every event it is run with.
#[derive(Debug, Default)]
pub struct RecordingHook {
    events: Mutex<Vec<LogEvent>>,
    installs: AtomicUsize,
}

impl RecordingHook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<LogEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of times the hook has been installed.
    pub fn installs(&self) -> usize {
        self.installs.load(Ordering::SeqCst)
    }
}

impl LoggerHook for RecordingHook {
    fn install(&self, _options: &LoggerOptions) -> Result<(), HookError> {
        self.installs.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn run(&self, event: &LogEvent) -> Result<(), HookError> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}
