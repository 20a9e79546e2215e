mod config;

pub use config::{AccountConfig, Config, FocusConfig, LoggingConfig};

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/dailythree[-dev]/` based on DAILYTHREE_ENV, creating it.
///
/// Set DAILYTHREE_ENV=dev to use the development directory, and
/// DAILYTHREE_HOME to replace `~/.config` as the base.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = data_dir_path();
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Same location as [`data_dir`], without touching the filesystem.
pub(crate) fn data_dir_path() -> PathBuf {
    let base_dir = match std::env::var_os("DAILYTHREE_HOME") {
        Some(home) => PathBuf::from(home),
        None => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config"),
    };

    let env = std::env::var("DAILYTHREE_ENV").unwrap_or_else(|_| "production".to_string());

    if env == "dev" {
        base_dir.join("dailythree-dev")
    } else {
        base_dir.join("dailythree")
    }
}
