//! Named, leveled loggers
//!
//! A [`LoggerRegistry`] is created once by the application and passed
//! to whatever needs a [`Logger`]. Each logger filters by its own level
//! and forwards to `tracing`, tagging every event with the logger name.
//! [`LoggerRegistry::set_global_level`] changes the level of every
//! logger handed out so far and of those created later.
//!
//! # Example
//!
//! ```
//! use tabset_core::logger::{LogLevel, LoggerRegistry};
//!
//! let registry = LoggerRegistry::new(LogLevel::Info);
//! let log = registry.get_or_create("settings");
//! log.info("settings tab opened");
//!
//! registry.set_global_level(LogLevel::Error);
//! assert!(!log.enabled(LogLevel::Warn));
//! ```

use crate::dropdown::{DropdownOption, DropdownOptions};
use crate::error::CoreResult;
use crate::setting::SettingValue;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// Severity of a log line, lowest first
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    /// Suppresses everything
    Off,
}

impl LogLevel {
    const fn as_u8(self) -> u8 {
        match self {
            LogLevel::Debug => 0,
            LogLevel::Info => 1,
            LogLevel::Warn => 2,
            LogLevel::Error => 3,
            LogLevel::Off => 4,
        }
    }

    const fn from_u8(raw: u8) -> Self {
        match raw {
            0 => LogLevel::Debug,
            1 => LogLevel::Info,
            2 => LogLevel::Warn,
            3 => LogLevel::Error,
            _ => LogLevel::Off,
        }
    }
}

impl LogLevel {
    /// Every level, most verbose first
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Off,
    ];

    /// Dropdown options keyed by the lowercase level name
    pub fn options() -> CoreResult<DropdownOptions<LogLevel>> {
        DropdownOptions::new(Self::ALL.iter().map(|level| {
            let key = level.to_string();
            let mut label = key.clone();
            label[..1].make_ascii_uppercase();
            DropdownOption::new(key, label, *level)
        }))
    }
}

impl SettingValue for LogLevel {}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "off" | "none" => Ok(LogLevel::Off),
            other => Err(format!("unknown log level: {}", other)),
        }
    }
}

/// Handle to one named logger
///
/// Cloning is cheap and clones share the same level.
#[derive(Clone)]
pub struct Logger {
    name: Arc<str>,
    level: Arc<AtomicU8>,
}

impl Logger {
    fn new(name: &str, level: LogLevel) -> Self {
        Logger {
            name: Arc::from(name),
            level: Arc::new(AtomicU8::new(level.as_u8())),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.level.load(Ordering::Relaxed))
    }

    /// Changes the level of this logger only.
    pub fn set_level(&self, level: LogLevel) {
        self.level.store(level.as_u8(), Ordering::Relaxed);
    }

    /// Whether a message at `level` would be emitted
    #[must_use]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level != LogLevel::Off && level >= self.level()
    }

    pub fn debug(&self, message: impl fmt::Display) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: impl fmt::Display) {
        self.log(LogLevel::Info, message);
    }

    pub fn warn(&self, message: impl fmt::Display) {
        self.log(LogLevel::Warn, message);
    }

    pub fn error(&self, message: impl fmt::Display) {
        self.log(LogLevel::Error, message);
    }

    pub fn log(&self, level: LogLevel, message: impl fmt::Display) {
        if !self.enabled(level) {
            return;
        }
        let name = &*self.name;
        match level {
            LogLevel::Debug => tracing::debug!(logger = name, "{}", message),
            LogLevel::Info => tracing::info!(logger = name, "{}", message),
            LogLevel::Warn => tracing::warn!(logger = name, "{}", message),
            LogLevel::Error => tracing::error!(logger = name, "{}", message),
            LogLevel::Off => {}
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level())
            .finish()
    }
}

/// Owner of all named loggers of one application
#[derive(Debug)]
pub struct LoggerRegistry {
    loggers: Mutex<HashMap<String, Logger>>,
    global: AtomicU8,
}

impl LoggerRegistry {
    /// Creates an empty registry whose loggers start at `level`
    #[must_use]
    pub fn new(level: LogLevel) -> Self {
        LoggerRegistry {
            loggers: Mutex::new(HashMap::new()),
            global: AtomicU8::new(level.as_u8()),
        }
    }

    /// Returns the logger called `name`, creating it at the global level.
    pub fn get_or_create(&self, name: &str) -> Logger {
        let mut loggers = self.loggers.lock();
        loggers
            .entry(name.to_string())
            .or_insert_with(|| Logger::new(name, self.global_level()))
            .clone()
    }

    /// Sets the level of every existing logger and of loggers created later.
    pub fn set_global_level(&self, level: LogLevel) {
        let loggers = self.loggers.lock();
        self.global.store(level.as_u8(), Ordering::Relaxed);
        for logger in loggers.values() {
            logger.set_level(level);
        }
    }

    #[must_use]
    pub fn global_level(&self) -> LogLevel {
        LogLevel::from_u8(self.global.load(Ordering::Relaxed))
    }

    /// Names of all loggers created so far, sorted
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.loggers.lock().keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        LoggerRegistry::new(LogLevel::default())
    }
}
