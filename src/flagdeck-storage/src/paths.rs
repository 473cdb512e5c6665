//! OS-aware path detection for flagdeck storage.
//!
//! - **Windows**: `%APPDATA%\flagdeck\`
//! - **macOS**: `~/Library/Application Support/flagdeck/`
//! - **Linux**: `~/.local/share/flagdeck/`
//!
//! Both the data and the config directory can be redirected with
//! `FLAGDECK_DATA_DIR` and `FLAGDECK_CONFIG_DIR`. Empty values are ignored.

use std::path::PathBuf;
use tracing::debug;

use crate::error::{Result, StorageError};

/// Application name used for storage directories.
pub const APP_NAME: &str = "flagdeck";

/// Subdirectory holding one JSON file per option.
pub const OPTIONS_DIR: &str = "options";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "FLAGDECK_DATA_DIR";

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "FLAGDECK_CONFIG_DIR";

/// Flagdeck storage paths container.
#[derive(Debug, Clone)]
pub struct FlagdeckPaths {
    /// Root data directory (platform-specific).
    pub data_dir: PathBuf,
    /// Option files directory.
    pub options_dir: PathBuf,
}

impl FlagdeckPaths {
    /// Create paths with automatic OS detection.
    pub fn new() -> Result<Self> {
        let data_dir = flagdeck_data_dir()?;
        Ok(Self::from_root(data_dir))
    }

    /// Create paths from a custom root directory.
    pub fn from_root(data_dir: PathBuf) -> Self {
        Self {
            options_dir: data_dir.join(OPTIONS_DIR),
            data_dir,
        }
    }

    /// Ensure all directories exist.
    pub fn ensure_dirs(&self) -> Result<()> {
        std::fs::create_dir_all(&self.options_dir)?;
        debug!(data_dir = %self.data_dir.display(), "flagdeck storage directories initialized");
        Ok(())
    }

    /// Get the path of an option file.
    ///
    /// The name is not validated here; callers go through
    /// [`validate_option_name`](crate::validate_option_name) first.
    pub fn option_path(&self, name: &str) -> PathBuf {
        self.options_dir.join(format!("{}.json", name))
    }
}

fn dir_from_env(var: &str) -> Option<PathBuf> {
    match std::env::var(var) {
        Ok(val) if !val.is_empty() => {
            let path = PathBuf::from(val);
            debug!(var, path = %path.display(), "Using directory override");
            Some(path)
        }
        _ => None,
    }
}

/// Get the flagdeck data directory based on the current OS.
pub fn flagdeck_data_dir() -> Result<PathBuf> {
    if let Some(path) = dir_from_env(DATA_DIR_ENV) {
        return Ok(path);
    }

    let base = dirs::data_dir().ok_or(StorageError::HomeDirNotFound)?;
    Ok(base.join(APP_NAME))
}

/// Get the flagdeck config directory based on the current OS.
///
/// Definition files (`flags.toml`, `flags.local.toml`) and `flagdeck.toml`
/// live here.
pub fn flagdeck_config_dir() -> Result<PathBuf> {
    if let Some(path) = dir_from_env(CONFIG_DIR_ENV) {
        return Ok(path);
    }

    let base = dirs::config_dir().ok_or(StorageError::HomeDirNotFound)?;
    Ok(base.join(APP_NAME))
}
