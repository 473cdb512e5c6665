//! `flagdeck.toml` loading.
//!
//! ```toml
//! # Candidate definition files, first existing one wins.
//! definitions = ["flags.local.toml", "flags.toml"]
//! data_dir = "/var/lib/flagdeck"
//! option_name = "feature_flags"
//! ```
//!
//! Relative paths are resolved against the directory holding the config file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use flagdeck_engine::DEFAULT_OPTION_NAME;
use flagdeck_engine::source::{DEFINITIONS_FILE, LOCAL_DEFINITIONS_FILE};
use flagdeck_storage::{flagdeck_config_dir, flagdeck_data_dir};
use serde::Deserialize;
use tracing::debug;

/// Name of the config file inside the config directory.
pub const CONFIG_FILE: &str = "flagdeck.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    definitions: Option<Vec<PathBuf>>,
    data_dir: Option<PathBuf>,
    option_name: Option<String>,
}

/// Resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagdeckConfig {
    /// Candidate definition files in priority order.
    pub definitions: Vec<PathBuf>,
    /// Root of the option store.
    pub data_dir: PathBuf,
    /// Option holding the override record.
    pub option_name: String,
}

impl FlagdeckConfig {
    /// Load `explicit` (which must exist) or the optional default config file.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let dir = flagdeck_config_dir()?;
                let path = dir.join(CONFIG_FILE);
                if path.is_file() {
                    Self::from_file(&path)
                } else {
                    debug!(path = %path.display(), "No config file, using defaults");
                    Self::resolve(RawConfig::default(), &dir)
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let raw: RawConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Self::resolve(raw, base)
    }

    fn resolve(raw: RawConfig, base: &Path) -> Result<Self> {
        let definitions = match raw.definitions {
            Some(paths) => paths.into_iter().map(|p| base.join(p)).collect(),
            None => vec![base.join(LOCAL_DEFINITIONS_FILE), base.join(DEFINITIONS_FILE)],
        };
        let data_dir = match raw.data_dir {
            Some(dir) => base.join(dir),
            None => flagdeck_data_dir()?,
        };

        Ok(Self {
            definitions,
            data_dir,
            option_name: raw
                .option_name
                .unwrap_or_else(|| DEFAULT_OPTION_NAME.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_relative_paths_resolve_against_config_dir() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(
            &path,
            "definitions = [\"defs/flags.toml\"]\ndata_dir = \"state\"\noption_name = \"wp_feature_flags\"\n",
        )
        .unwrap();

        let config = FlagdeckConfig::load(Some(&path)).unwrap();
        assert_eq!(
            config,
            FlagdeckConfig {
                definitions: vec![dir.path().join("defs/flags.toml")],
                data_dir: dir.path().join("state"),
                option_name: "wp_feature_flags".to_string(),
            }
        );
    }

    #[test]
    fn test_default_definition_candidates() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "data_dir = \"/srv/flagdeck\"\n").unwrap();

        let config = FlagdeckConfig::load(Some(&path)).unwrap();
        assert_eq!(
            config.definitions,
            vec![
                dir.path().join(LOCAL_DEFINITIONS_FILE),
                dir.path().join(DEFINITIONS_FILE),
            ]
        );
        assert_eq!(config.data_dir, PathBuf::from("/srv/flagdeck"));
        assert_eq!(config.option_name, DEFAULT_OPTION_NAME);
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(FlagdeckConfig::load(Some(&dir.path().join("missing.toml"))).is_err());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "data_dir = \"x\"\nstate_dir = \"y\"\n").unwrap();

        assert!(FlagdeckConfig::load(Some(&path)).is_err());
    }
}
