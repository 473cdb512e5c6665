//! Named option persistence.
//!
//! # Module Structure
//!
//! - [`memory`] - Process-local backend
//! - [`file`] - One JSON file per option, written atomically

mod file;
mod memory;
#[cfg(test)]
mod tests;

pub use file::FileOptionStore;
pub use memory::MemoryOptionStore;

use serde_json::Value;

use crate::error::{Result, StorageError};

/// A generic key-value store of named JSON options.
///
/// Implementations perform a full read or a full write per call. There is no
/// locking across a read-modify-write sequence; concurrent writers to the
/// same option resolve as last-writer-wins.
pub trait OptionStore: Send + Sync {
    /// Read an option, `None` when it was never written or has been deleted.
    fn get_option(&self, name: &str) -> Result<Option<Value>>;

    /// Insert or replace an option.
    fn update_option(&self, name: &str, value: &Value) -> Result<()>;

    /// Remove an option. Removing a missing option is not an error.
    fn delete_option(&self, name: &str) -> Result<()>;
}

/// Check that an option name is non-empty and only uses `[A-Za-z0-9_.-]`.
///
/// Names double as file names in [`FileOptionStore`], so anything that could
/// escape the options directory is rejected.
pub fn validate_option_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidOptionName(name.to_string()))
    }
}
