//! Persisted override state.
//!
//! All overrides live in a single option holding a JSON object
//! `{ "<flag id>": "on" | "off" }`. Flags at `default` are absent from the
//! object, and an empty object deletes the option. Every call reads the option fresh and every mutation writes the
//! whole object back; concurrent writers resolve as last-writer-wins.

use std::collections::BTreeMap;
use std::sync::Arc;

use flagdeck_storage::OptionStore;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::Result;
use crate::state::FlagState;

/// Default option name for the override record.
pub const DEFAULT_OPTION_NAME: &str = "feature_flags";

/// Reads and writes per-flag override state through an [`OptionStore`].
#[derive(Clone)]
pub struct StateStore {
    options: Arc<dyn OptionStore>,
    option_name: String,
}

impl StateStore {
    pub fn new(options: Arc<dyn OptionStore>) -> Self {
        Self::with_option_name(options, DEFAULT_OPTION_NAME)
    }

    pub fn with_option_name(options: Arc<dyn OptionStore>, option_name: impl Into<String>) -> Self {
        Self {
            options,
            option_name: option_name.into(),
        }
    }

    pub fn option_name(&self) -> &str {
        &self.option_name
    }

    /// Current state of `id`; `Default` when no override is stored.
    pub fn get_state(&self, id: &str) -> Result<FlagState> {
        Ok(self.load()?.get(id).copied().unwrap_or_default())
    }

    /// Store `state` for `id`. `Default` removes the entry.
    pub fn set_state(&self, id: &str, state: FlagState) -> Result<()> {
        let mut states = self.load()?;

        if state.is_default() {
            states.remove(id);
        } else {
            states.insert(id.to_string(), state);
        }

        if states.is_empty() {
            self.options.delete_option(&self.option_name)?;
        } else {
            let record: Map<String, Value> = states
                .into_iter()
                .map(|(id, state)| (id, Value::String(state.as_str().to_string())))
                .collect();
            self.options
                .update_option(&self.option_name, &Value::Object(record))?;
        }

        debug!(flag = id, state = %state, "Feature flag state persisted");
        Ok(())
    }

    /// All stored non-default overrides, including ids no longer defined.
    pub fn overrides(&self) -> Result<BTreeMap<String, FlagState>> {
        self.load()
    }

    fn load(&self) -> Result<BTreeMap<String, FlagState>> {
        let Some(value) = self.options.get_option(&self.option_name)? else {
            return Ok(BTreeMap::new());
        };

        let Value::Object(record) = value else {
            warn!(option = %self.option_name, "Feature flag state is not an object, ignoring it");
            return Ok(BTreeMap::new());
        };

        let mut states = BTreeMap::new();
        for (id, raw) in record {
            match raw.as_str().map(str::parse::<FlagState>) {
                Some(Ok(state)) if !state.is_default() => {
                    states.insert(id, state);
                }
                Some(Ok(_)) => {}
                _ => warn!(flag = %id, value = %raw, "Ignoring invalid stored feature flag state"),
            }
        }
        Ok(states)
    }
}

impl std::fmt::Debug for StateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateStore")
            .field("option_name", &self.option_name)
            .finish_non_exhaustive()
    }
}
