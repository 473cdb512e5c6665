//! Error types for flagdeck-storage.

use thiserror::Error;

/// Storage error types.
#[derive(Debug, Error)]
pub enum StorageError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Option name contains characters that are not safe in a file name.
    #[error("Invalid option name: {0:?}")]
    InvalidOptionName(String),

    /// Home directory not found.
    #[error("Could not determine home/data directory")]
    HomeDirNotFound,
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
