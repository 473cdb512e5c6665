//! Flagdeck Storage - a small key-value option store.
//!
//! Options are named JSON values. Each read and write is a full round trip to
//! the backend; nothing is cached between calls, so a value written by one
//! process is visible to the next reader immediately.
//!
//! - [`MemoryOptionStore`] keeps options in process memory.
//! - [`FileOptionStore`] keeps one `<name>.json` file per option under
//!   `<data_dir>/options/`.
//!
//! # Usage
//!
//! ```rust,no_run
//! use flagdeck_storage::{FileOptionStore, FlagdeckPaths, OptionStore};
//!
//! fn main() -> flagdeck_storage::Result<()> {
//!     let store = FileOptionStore::with_paths(FlagdeckPaths::new()?);
//!     store.init()?;
//!
//!     store.update_option("feature_flags", &serde_json::json!({ "beta": "on" }))?;
//!     let value = store.get_option("feature_flags")?;
//!     println!("{value:?}");
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod options;
pub mod paths;

pub use error::{Result, StorageError};
pub use options::{FileOptionStore, MemoryOptionStore, OptionStore, validate_option_name};
pub use paths::{FlagdeckPaths, flagdeck_config_dir, flagdeck_data_dir};
