//! Loading flag definitions from TOML files.
//!
//! A definition file maps flag ids to tables:
//!
//! ```toml
//! ["payments/applepay_enabled"]
//! label   = "Apple Pay"
//! filter  = "payments.feature-flags.applepay_enabled"
//! default = { env = "PAYMENTS_APPLEPAY_ENABLED", not_equals = "0" }
//!
//! ["payments/logging"]
//! label   = "Logging"
//! filter  = "payments.is_logging_enabled"
//! default = true
//! display = false
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::definition::{DefaultSpec, FlagCandidate};
use crate::error::{FlagError, Result};
use crate::registry::{FlagRegistry, Rejection, log_rejection};

/// File name of the shared definition file.
pub const DEFINITIONS_FILE: &str = "flags.toml";

/// File name of the local override definition file.
pub const LOCAL_DEFINITIONS_FILE: &str = "flags.local.toml";

#[derive(Debug, Deserialize)]
struct RawFlag {
    label: Option<String>,
    filter: Option<String>,
    default: Option<RawDefault>,
    display: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDefault {
    Literal(bool),
    Env(EnvRule),
    /// Any other value carries no usable default.
    Other(toml::Value),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EnvRule {
    env: String,
    equals: Option<String>,
    not_equals: Option<String>,
}

impl EnvRule {
    fn into_spec(self) -> Option<DefaultSpec> {
        match (self.equals, self.not_equals) {
            (Some(value), None) => Some(DefaultSpec::env_equals(self.env, value)),
            (None, Some(value)) => Some(DefaultSpec::env_not_equals(self.env, value)),
            _ => None,
        }
    }
}

fn candidate_from_value(value: toml::Value) -> std::result::Result<FlagCandidate, Rejection> {
    match &value {
        toml::Value::Table(table) if table.is_empty() => return Err(Rejection::Empty),
        toml::Value::Table(_) => {}
        _ => return Err(Rejection::NotATable),
    }

    let raw = value.try_into::<RawFlag>().map_err(|_| Rejection::Unparseable)?;
    let default = match raw.default {
        None => DefaultSpec::Unknown,
        Some(RawDefault::Literal(value)) => DefaultSpec::Literal(value),
        Some(RawDefault::Env(rule)) => rule.into_spec().ok_or(Rejection::Unparseable)?,
        Some(RawDefault::Other(value)) => {
            debug!(default = %value, "Unrecognized default, treating it as unknown");
            DefaultSpec::Unknown
        }
    };

    Ok(FlagCandidate {
        label: raw.label.unwrap_or_default(),
        activation_key: raw.filter.unwrap_or_default(),
        default,
        display: raw.display,
    })
}

/// Build a registry from a parsed definition table. Malformed entries are
/// dropped.
pub fn registry_from_table(table: toml::Table) -> FlagRegistry {
    let candidates = table
        .into_iter()
        .filter_map(|(id, value)| match candidate_from_value(value) {
            Ok(candidate) => Some((id, candidate)),
            Err(reason) => {
                log_rejection(&id, reason);
                None
            }
        });
    FlagRegistry::sanitize(candidates)
}

/// Parse definition file content. `path` is only used for error reporting.
pub fn parse_definitions(content: &str, path: &Path) -> Result<FlagRegistry> {
    let table: toml::Table = content.parse().map_err(|source| FlagError::Toml {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(registry_from_table(table))
}

/// A priority-ordered list of candidate definition files.
///
/// Only the first existing file is read; files are never merged.
#[derive(Debug, Clone)]
pub struct DefinitionSource {
    candidates: Vec<PathBuf>,
}

impl DefinitionSource {
    pub fn new(candidates: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
        }
    }

    /// `flags.local.toml` then `flags.toml` inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new([dir.join(LOCAL_DEFINITIONS_FILE), dir.join(DEFINITIONS_FILE)])
    }

    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// The file that [`load`](Self::load) would read.
    pub fn resolve_path(&self) -> Option<&Path> {
        self.candidates
            .iter()
            .map(PathBuf::as_path)
            .find(|path| path.is_file())
    }

    /// Read the winning file and build the registry. No existing candidate
    /// yields an empty registry.
    pub fn load(&self) -> Result<FlagRegistry> {
        let Some(path) = self.resolve_path() else {
            debug!(candidates = ?self.candidates, "No feature flag definition file found");
            return Ok(FlagRegistry::new());
        };

        let content = std::fs::read_to_string(path).map_err(|source| FlagError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let registry = parse_definitions(&content, path)?;
        info!(path = %path.display(), flags = registry.len(), "Feature flag definitions loaded");
        Ok(registry)
    }
}
