// config.rs - Logger options and partial updates
// Purpose: the full configuration a logger runs with, and the patch type
// `apply` merges over it field by field.

use std::fmt;
use std::sync::Arc;

use crate::hooks::LoggerHook;
use crate::log_level::LogLevel;

/// Complete logger configuration.
#[derive(Clone)]
pub struct LoggerOptions {
    pub enabled: bool,
    pub level: LogLevel,
    pub before_hooks: Vec<Arc<dyn LoggerHook>>,
    pub after_hooks: Vec<Arc<dyn LoggerHook>>,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        LoggerOptions {
            enabled: true,
            level: LogLevel::Debug,
            before_hooks: Vec::new(),
            after_hooks: Vec::new(),
        }
    }
}

impl LoggerOptions {
    /// Shallow merge: every field set on `patch` replaces the current one,
    /// hook lists included.
    pub fn merged(&self, patch: OptionsPatch) -> LoggerOptions {
        LoggerOptions {
            enabled: patch.enabled.unwrap_or(self.enabled),
            level: patch.level.unwrap_or(self.level),
            before_hooks: patch
                .before_hooks
                .unwrap_or_else(|| self.before_hooks.clone()),
            after_hooks: patch
                .after_hooks
                .unwrap_or_else(|| self.after_hooks.clone()),
        }
    }
}

fn hook_names(hooks: &[Arc<dyn LoggerHook>]) -> Vec<&str> {
    hooks.iter().map(|hook| hook.name()).collect()
}

impl fmt::Debug for LoggerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerOptions")
            .field("enabled", &self.enabled)
            .field("level", &self.level)
            .field("before_hooks", &hook_names(&self.before_hooks))
            .field("after_hooks", &hook_names(&self.after_hooks))
            .finish()
    }
}

/// Partial configuration accepted at construction and by `apply`.
#[derive(Clone, Default)]
pub struct OptionsPatch {
    pub enabled: Option<bool>,
    pub level: Option<LogLevel>,
    pub before_hooks: Option<Vec<Arc<dyn LoggerHook>>>,
    pub after_hooks: Option<Vec<Arc<dyn LoggerHook>>>,
}

impl OptionsPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_before_hooks(mut self, hooks: Vec<Arc<dyn LoggerHook>>) -> Self {
        self.before_hooks = Some(hooks);
        self
    }

    pub fn with_after_hooks(mut self, hooks: Vec<Arc<dyn LoggerHook>>) -> Self {
        self.after_hooks = Some(hooks);
        self
    }
}

impl fmt::Debug for OptionsPatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionsPatch")
            .field("enabled", &self.enabled)
            .field("level", &self.level)
            .field("before_hooks", &self.before_hooks.as_deref().map(hook_names))
            .field("after_hooks", &self.after_hooks.as_deref().map(hook_names))
            .finish()
    }
}
