//! Shared helpers for the in-crate test modules

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::config::OptionsPatch;
use crate::errors::HookError;
use crate::hooks::LoggerHook;
use crate::log_event::LogEvent;
use crate::log_sink::MemorySink;
use crate::logger::Logger;

/// Logger over a fresh [`MemorySink`] with every level dedicated.
pub fn memory_logger(patch: OptionsPatch) -> (Logger, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    (Logger::new(patch, sink.clone()), sink)
}

/// Appends `"<label>:<level>"` to a shared journal so tests can assert the
/// relative order of hooks across both phases.
pub struct JournalHook {
    label: &'static str,
    journal: Arc<Mutex<Vec<String>>>,
}

impl JournalHook {
    pub fn new(label: &'static str, journal: &Arc<Mutex<Vec<String>>>) -> Arc<Self> {
        Arc::new(Self {
            label,
            journal: Arc::clone(journal),
        })
    }
}

impl LoggerHook for JournalHook {
    fn run(&self, event: &LogEvent) -> Result<(), HookError> {
        self.journal
            .lock()
            .unwrap()
            .push(format!("{}:{}", self.label, event.level));
        Ok(())
    }

    fn name(&self) -> &str {
        self.label
    }
}

/// Fails on every call, either with an error or by panicking.
pub struct FailingHook {
    pub panics: bool,
    pub runs: AtomicUsize,
    pub fail_install: bool,
}

impl FailingHook {
    pub fn erroring() -> Arc<Self> {
        Arc::new(Self {
            panics: false,
            runs: AtomicUsize::new(0),
            fail_install: false,
        })
    }

    pub fn panicking() -> Arc<Self> {
        Arc::new(Self {
            panics: true,
            runs: AtomicUsize::new(0),
            fail_install: false,
        })
    }

    pub fn bad_install() -> Arc<Self> {
        Arc::new(Self {
            panics: false,
            runs: AtomicUsize::new(0),
            fail_install: true,
        })
    }

    pub fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }
}

impl LoggerHook for FailingHook {
    fn install(&self, _options: &crate::config::LoggerOptions) -> Result<(), HookError> {
        if self.fail_install {
            return Err(HookError::failed("install rejected"));
        }
        Ok(())
    }

    fn run(&self, _event: &LogEvent) -> Result<(), HookError> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        if self.panics {
            panic!("failing hook panicked");
        }
        Err(HookError::failed("failing hook"))
    }

    fn name(&self) -> &str {
        if self.panics {
            "panicking"
        } else {
            "erroring"
        }
    }
}
