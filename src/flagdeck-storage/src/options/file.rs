//! File-backed option store.
//!
//! Every option is a pretty-printed JSON document at
//! `<data_dir>/options/<name>.json`. Each write goes to its own sibling temp
//! file that is fsynced and then renamed over the target, so readers observe
//! either the previous or the new document, never a torn one, and concurrent
//! writers resolve as last-writer-wins.

use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::Value;
use tracing::{debug, info, warn};

use super::{OptionStore, validate_option_name};
use crate::error::Result;
use crate::paths::FlagdeckPaths;

/// Option store persisting each option as its own JSON file.
#[derive(Debug, Clone)]
pub struct FileOptionStore {
    paths: FlagdeckPaths,
}

impl FileOptionStore {
    /// Create a store with custom paths.
    pub fn with_paths(paths: FlagdeckPaths) -> Self {
        Self { paths }
    }

    /// Initialize storage (create directories).
    pub fn init(&self) -> Result<()> {
        self.paths.ensure_dirs()?;
        info!(data_dir = %self.paths.data_dir.display(), "Option storage initialized");
        Ok(())
    }

    /// Get the underlying paths.
    pub fn paths(&self) -> &FlagdeckPaths {
        &self.paths
    }
}

impl OptionStore for FileOptionStore {
    fn get_option(&self, name: &str) -> Result<Option<Value>> {
        validate_option_name(name)?;
        let path = self.paths.option_path(name);

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        Ok(Some(serde_json::from_str(&content)?))
    }

    fn update_option(&self, name: &str, value: &Value) -> Result<()> {
        validate_option_name(name)?;
        std::fs::create_dir_all(&self.paths.options_dir)?;

        let path = self.paths.option_path(name);
        let tmp_path = temp_path_for(&path);

        let written = write_temp(&tmp_path, value).and_then(|()| {
            std::fs::rename(&tmp_path, &path)?;
            Ok(())
        });
        if let Err(e) = written {
            if let Err(cleanup) = std::fs::remove_file(&tmp_path) {
                if cleanup.kind() != ErrorKind::NotFound {
                    warn!(path = %tmp_path.display(), error = %cleanup, "Failed to remove temp file");
                }
            }
            return Err(e);
        }
        sync_parent_dir(&path);

        debug!(option = name, "Option saved");
        Ok(())
    }

    fn delete_option(&self, name: &str) -> Result<()> {
        validate_option_name(name)?;
        let path = self.paths.option_path(name);

        match std::fs::remove_file(&path) {
            Ok(()) => {
                sync_parent_dir(&path);
                debug!(option = name, "Option deleted");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Unique per process and per call, in the target's directory so the rename
/// stays on one filesystem.
fn temp_path_for(path: &Path) -> PathBuf {
    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("option");
    path.with_file_name(format!(
        ".{}.tmp.{}.{}",
        file_name,
        std::process::id(),
        COUNTER.fetch_add(1, Ordering::Relaxed)
    ))
}

fn write_temp(tmp_path: &Path, value: &Value) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(tmp_path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(())
}

/// Persist the directory entry after a rename or unlink.
fn sync_parent_dir(path: &Path) {
    #[cfg(unix)]
    {
        if let Some(parent) = path.parent() {
            if let Ok(dir) = std::fs::File::open(parent) {
                let _ = dir.sync_all();
            }
        }
    }
    #[cfg(not(unix))]
    let _ = path;
}
