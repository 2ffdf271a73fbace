// registry.rs - Explicit application context for sharing the logger
// A host builds one AppContext, installs the logger into it during setup, and
// hands the context to the components that need logging.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::warn;

use crate::errors::{LoggerError, LoggerResult};
use crate::logger::Logger;

/// Global property names the logger is aliased under.
pub const GLOBAL_ALIASES: [&str; 2] = ["$log", "$logger"];

type Shared = Arc<dyn Any + Send + Sync>;

/// Key under which a value is provided. Keys built from distinct marker types
/// never collide.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct InjectionKey {
    id: TypeId,
    label: &'static str,
}

impl InjectionKey {
    pub fn of<T: 'static>() -> Self {
        InjectionKey {
            id: TypeId::of::<T>(),
            label: std::any::type_name::<T>(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl fmt::Debug for InjectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InjectionKey({})", self.label)
    }
}

// Private marker; only this module can build the logger's key.
struct LoggerKey;

fn logger_key() -> InjectionKey {
    InjectionKey::of::<LoggerKey>()
}

/// Values provided by key plus named global properties.
#[derive(Default)]
pub struct AppContext {
    provided: HashMap<InjectionKey, Shared>,
    global_properties: HashMap<String, Shared>,
}

impl AppContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn provide<T: Any + Send + Sync>(&mut self, key: InjectionKey, value: Arc<T>) {
        self.provided.insert(key, value);
    }

    /// Value provided under `key`, if any and if it has type `T`.
    pub fn inject<T: Any + Send + Sync>(&self, key: InjectionKey) -> Option<Arc<T>> {
        self.provided
            .get(&key)
            .cloned()
            .and_then(|value| value.downcast::<T>().ok())
    }

    pub fn set_global_property<T: Any + Send + Sync>(
        &mut self,
        name: impl Into<String>,
        value: Arc<T>,
    ) {
        self.global_properties.insert(name.into(), value);
    }

    pub fn global_property<T: Any + Send + Sync>(&self, name: &str) -> Option<Arc<T>> {
        self.global_properties
            .get(name)
            .cloned()
            .and_then(|value| value.downcast::<T>().ok())
    }
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext")
            .field("provided", &self.provided.keys().collect::<Vec<_>>())
            .field("global_properties", &self.global_properties.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Logger {
    /// Register this logger with `app`: provided under its private key and
    /// aliased as the `$log` and `$logger` global properties.
    pub fn install(self: &Arc<Self>, app: &mut AppContext) {
        app.provide(logger_key(), Arc::clone(self));
        for alias in GLOBAL_ALIASES {
            app.set_global_property(alias, Arc::clone(self));
        }
    }
}

/// Look up the logger installed in `app`.
///
/// Emits one warning and returns [`LoggerError::NotRegistered`] when nothing
/// was installed.
pub fn use_logger(app: &AppContext) -> LoggerResult<Arc<Logger>> {
    let key = logger_key();
    app.inject::<Logger>(key).ok_or_else(|| {
        warn!(key = key.label(), "hooklog :: use_logger missing inject");
        LoggerError::not_registered(key.label())
    })
}
