//! In-memory option store.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde_json::Value;

use super::{OptionStore, validate_option_name};
use crate::error::Result;

/// Option store backed by a process-local map.
#[derive(Debug, Default)]
pub struct MemoryOptionStore {
    options: RwLock<HashMap<String, Value>>,
}

impl MemoryOptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored options.
    pub fn len(&self) -> usize {
        self.options.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.read().is_empty()
    }
}

impl OptionStore for MemoryOptionStore {
    fn get_option(&self, name: &str) -> Result<Option<Value>> {
        validate_option_name(name)?;
        Ok(self.options.read().get(name).cloned())
    }

    fn update_option(&self, name: &str, value: &Value) -> Result<()> {
        validate_option_name(name)?;
        self.options.write().insert(name.to_string(), value.clone());
        Ok(())
    }

    fn delete_option(&self, name: &str) -> Result<()> {
        validate_option_name(name)?;
        self.options.write().remove(name);
        Ok(())
    }
}
