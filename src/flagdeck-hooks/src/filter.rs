//! In-process filter registry.

use std::fmt;

use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::sink::{ActivationSink, Provider};

struct Binding {
    priority: i32,
    provider: Provider,
}

/// Prioritized boolean bindings keyed by activation key.
///
/// Bindings for one key are kept sorted by priority; equal priorities keep
/// registration order.
#[derive(Default)]
pub struct FilterRegistry {
    bindings: RwLock<IndexMap<String, Vec<Binding>>>,
}

impl FilterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate `key`, starting from the value the host would produce on its
    /// own. Returns `natural` unchanged when nothing is bound.
    pub fn apply(&self, key: &str, natural: bool) -> bool {
        let bindings = self.bindings.read();
        let providers: Vec<Provider> = match bindings.get(key) {
            Some(list) => list.iter().map(|b| b.provider.clone()).collect(),
            None => return natural,
        };
        drop(bindings);

        let mut value = natural;
        for provider in providers {
            value = provider();
        }
        trace!(key, natural, value, "Filter applied");
        value
    }

    /// Whether any provider is bound to `key`.
    pub fn is_bound(&self, key: &str) -> bool {
        self.bindings
            .read()
            .get(key)
            .is_some_and(|list| !list.is_empty())
    }

    /// Number of providers bound to `key`.
    pub fn binding_count(&self, key: &str) -> usize {
        self.bindings.read().get(key).map_or(0, Vec::len)
    }

    /// Bound keys, in first-bound order.
    pub fn keys(&self) -> Vec<String> {
        self.bindings.read().keys().cloned().collect()
    }
}

impl ActivationSink for FilterRegistry {
    fn bind(&self, key: &str, priority: i32, provider: Provider) {
        let mut bindings = self.bindings.write();
        let list = bindings.entry(key.to_string()).or_default();
        let at = list.partition_point(|b| b.priority <= priority);
        list.insert(at, Binding { priority, provider });
        debug!(key, priority, "Provider bound");
    }
}

impl fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bindings = self.bindings.read();
        let mut map = f.debug_map();
        for (key, list) in bindings.iter() {
            let priorities: Vec<i32> = list.iter().map(|b| b.priority).collect();
            map.entry(key, &priorities);
        }
        map.finish()
    }
}
