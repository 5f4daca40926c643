//! Store configuration.
//!
//! # Responsibility
//! - Name the slot, database location and log level used to open a store.
//! - Apply environment overrides on top of defaults.

use crate::logging::default_log_level;
use crate::repo::snapshot::DEFAULT_SLOT_KEY;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_SLOT_KEY: &str = "REMINDER_SLOT_KEY";
pub const ENV_DB_PATH: &str = "REMINDER_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "REMINDER_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "REMINDER_LOG_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptySlotKey,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySlotKey => write!(f, "slot key cannot be empty"),
        }
    }
}

impl Error for ConfigError {}

/// Settings for opening a reminder store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Slot holding the JSON snapshot.
    pub slot_key: String,
    /// SQLite file; `None` keeps everything in memory.
    pub db_path: Option<PathBuf>,
    pub log_level: String,
    /// Absolute directory for rolling log files; `None` disables file logs.
    pub log_dir: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            slot_key: DEFAULT_SLOT_KEY.to_string(),
            db_path: None,
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl StoreConfig {
    /// Defaults overridden by `REMINDER_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`Self::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(key) = lookup(ENV_SLOT_KEY) {
            config.slot_key = key.trim().to_string();
        }
        if let Some(path) = lookup(ENV_DB_PATH).filter(|path| !path.trim().is_empty()) {
            config.db_path = Some(PathBuf::from(path.trim()));
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            config.log_level = level.trim().to_string();
        }
        if let Some(dir) = lookup(ENV_LOG_DIR).filter(|dir| !dir.trim().is_empty()) {
            config.log_dir = Some(PathBuf::from(dir.trim()));
        }
        config
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slot_key.trim().is_empty() {
            return Err(ConfigError::EmptySlotKey);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, StoreConfig, ENV_DB_PATH, ENV_LOG_DIR, ENV_SLOT_KEY};
    use std::path::PathBuf;

    #[test]
    fn defaults_use_reminders_slot_in_memory() {
        let config = StoreConfig::default();
        assert_eq!(config.slot_key, "reminders");
        assert_eq!(config.db_path, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn lookup_overrides_defaults() {
        let config = StoreConfig::from_lookup(|name| match name {
            ENV_SLOT_KEY => Some(" work ".to_string()),
            ENV_DB_PATH => Some("/tmp/reminders.db".to_string()),
            ENV_LOG_DIR => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.slot_key, "work");
        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/reminders.db")));
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn blank_slot_key_is_rejected() {
        let config = StoreConfig::from_lookup(|name| {
            (name == ENV_SLOT_KEY).then(|| "   ".to_string())
        });
        assert_eq!(config.validate(), Err(ConfigError::EmptySlotKey));
    }
}
