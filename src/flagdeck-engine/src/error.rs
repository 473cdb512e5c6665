//! Error types for flagdeck-engine.

use std::path::PathBuf;

use flagdeck_storage::StorageError;
use thiserror::Error;

/// Errors surfaced by the engine.
///
/// Malformed definitions never show up here: the sanitizer drops them.
#[derive(Debug, Error)]
pub enum FlagError {
    /// The flag id is not in the registry.
    #[error("Unknown feature flag: {0}")]
    InvalidFlagId(String),

    /// A state string outside `default`, `on`, `off`.
    #[error("Invalid feature flag state: {0}")]
    InvalidTargetState(String),

    /// The host rejected the request's authorization or anti-forgery token.
    #[error("Request not authorized")]
    Unauthorized,

    /// The option store failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A definition file could not be read.
    #[error("Failed to read definitions from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A definition file is not valid TOML.
    #[error("Failed to parse definitions in {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl FlagError {
    /// Short machine-readable message returned to the control surface.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::Unauthorized => "Invalid request",
            Self::InvalidFlagId(_) | Self::InvalidTargetState(_) => "Invalid feature flag or state",
            Self::Storage(_) | Self::Io { .. } | Self::Toml { .. } => {
                "Could not update feature flag"
            }
        }
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, FlagError>;
