use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::OptionsPatch;
use crate::errors::LoggerResult;
use crate::log_level::LogLevel;

/// File read when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "hooklog.toml";

/// Prefix of environment variables overriding file settings
/// (`HOOKLOG_ENABLED`, `HOOKLOG_LEVEL`).
pub const ENV_PREFIX: &str = "HOOKLOG_";

/// Settings that can come from outside the program. Hooks are code and are
/// only ever supplied through [`OptionsPatch`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggerSettings {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub level: LogLevel,
}

fn default_enabled() -> bool {
    true
}

impl Default for LoggerSettings {
    fn default() -> Self {
        LoggerSettings {
            enabled: default_enabled(),
            level: LogLevel::default(),
        }
    }
}

impl From<LoggerSettings> for OptionsPatch {
    fn from(settings: LoggerSettings) -> Self {
        OptionsPatch::new()
            .with_enabled(settings.enabled)
            .with_level(settings.level)
    }
}

/// Layered sources: built-in defaults, then the TOML file, then environment.
pub fn settings_figment(path: Option<&Path>) -> Figment {
    let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));

    Figment::from(Serialized::defaults(LoggerSettings::default()))
        .merge(Toml::file(file))
        .merge(Env::prefixed(ENV_PREFIX))
}

/// Load logger settings. A missing file is not an error; an unknown level
/// name is.
pub fn load_settings(path: Option<&Path>) -> LoggerResult<LoggerSettings> {
    let settings: LoggerSettings = settings_figment(path).extract()?;
    Ok(settings)
}
