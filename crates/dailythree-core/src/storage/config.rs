//! TOML-based application configuration.
//!
//! Stores:
//! - the account entitlement (`account.is_pro`), read but never written by the core
//! - the focus tick period
//! - the default log filter
//!
//! Configuration is stored at `~/.config/dailythree/config.toml`.
//! Day state itself is never written to disk.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::{data_dir, data_dir_path};
use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountConfig {
    /// Raises the daily task cap from 3 to 4.
    #[serde(default)]
    pub is_pro: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusConfig {
    /// Wall-clock period between countdown ticks. Each tick is one second
    /// of session time regardless of this value.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter used when DAILYTHREE_LOG is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/dailythree/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub account: AccountConfig,
    #[serde(default)]
    pub focus: FocusConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_tick_interval_ms() -> u64 {
    1000
}
fn default_log_level() -> String {
    "warn".into()
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => serde_json::Value::Number(
                        value
                            .parse::<u64>()
                            .map_err(|e| invalid(e.to_string()))?
                            .into(),
                    ),
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(invalid("not a leaf value".into()));
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(path, &content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Read from the default location without creating the directory or
    /// writing defaults.
    pub fn read() -> Result<Self> {
        Self::read_from(&data_dir_path().join("config.toml"))
    }

    /// A missing file yields defaults and stays missing.
    pub fn read_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(path, &content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn parse(path: &Path, content: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(content).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(cfg)
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key, in memory only.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not parse
    /// as the field's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json)?;
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.focus.tick_interval_ms.max(1))
    }

    /// Read from disk without writing, returning default on error.
    pub fn read_or_default() -> Self {
        Self::read().unwrap_or_default()
    }
}
