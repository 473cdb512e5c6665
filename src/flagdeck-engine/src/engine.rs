//! The override engine.

use flagdeck_hooks::ActivationSink;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{FlagError, Result};
use crate::overrides::{OVERRIDE_PRIORITY, apply_overrides_with_priority};
use crate::registry::FlagRegistry;
use crate::state::FlagState;
use crate::store::StateStore;
use crate::toggle::{RequestGuard, ToggleOutcome, ToggleRequest, ToggleResponse};

/// Current view of one flag for the control surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlagView {
    pub id: String,
    pub label: String,
    pub activation_key: String,
    pub state: FlagState,
    /// Resolved built-in default, `None` when unknown.
    pub default: Option<bool>,
    /// Forced value when overridden, otherwise the built-in default.
    pub effective: Option<bool>,
}

/// Owns the flag registry and the override state store.
///
/// Construct one per process or request and pass it to whatever needs it.
#[derive(Debug, Clone)]
pub struct FlagEngine {
    registry: FlagRegistry,
    states: StateStore,
    priority: i32,
}

impl FlagEngine {
    pub fn new(registry: FlagRegistry, states: StateStore) -> Self {
        Self {
            registry,
            states,
            priority: OVERRIDE_PRIORITY,
        }
    }

    /// Override the binding priority used by [`apply_overrides`](Self::apply_overrides).
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn registry(&self) -> &FlagRegistry {
        &self.registry
    }

    pub fn states(&self) -> &StateStore {
        &self.states
    }

    /// Whether there is anything to manage.
    pub fn is_active(&self) -> bool {
        !self.registry.is_empty()
    }

    /// Current state of a registered flag.
    pub fn state(&self, id: &str) -> Result<FlagState> {
        self.ensure_registered(id)?;
        self.states.get_state(id)
    }

    /// Resolved built-in default of a registered flag.
    pub fn resolve_default(&self, id: &str) -> Result<Option<bool>> {
        let flag = self
            .registry
            .get(id)
            .ok_or_else(|| FlagError::InvalidFlagId(id.to_string()))?;
        Ok(flag.resolve_default())
    }

    /// One view per registered flag, in definition order.
    pub fn snapshot(&self) -> Result<Vec<FlagView>> {
        self.registry
            .iter()
            .map(|flag| {
                let state = self.states.get_state(flag.id())?;
                let default = flag.resolve_default();
                Ok(FlagView {
                    id: flag.id().to_string(),
                    label: flag.label().to_string(),
                    activation_key: flag.activation_key().to_string(),
                    state,
                    default,
                    effective: state.forced_value().or(default),
                })
            })
            .collect()
    }

    /// Advance a flag to the next state in the cycle and persist it.
    ///
    /// This is the only mutating entry point. Authorization is the caller's
    /// job; see [`handle`](Self::handle).
    pub fn request_toggle(&self, id: &str) -> Result<ToggleOutcome> {
        self.ensure_registered(id)?;

        let current = self.states.get_state(id)?;
        let next = current.next();
        self.states.set_state(id, next)?;

        info!(flag = id, from = %current, to = %next, "Feature flag toggled");
        Ok(ToggleOutcome {
            id: id.to_string(),
            state: next,
        })
    }

    /// Check the request with `guard`, then toggle. Never fails; errors are
    /// folded into the response payload.
    pub fn handle(&self, request: &ToggleRequest, guard: &dyn RequestGuard) -> ToggleResponse {
        let result = if guard.authorize(request) {
            self.request_toggle(&request.id)
        } else {
            Err(FlagError::Unauthorized)
        };

        if let Err(e) = &result {
            warn!(flag = %request.id, error = %e, "Feature flag toggle rejected");
        }
        result.into()
    }

    /// Bind every non-default override to `sink`. Returns the number of
    /// bindings created.
    pub fn apply_overrides(&self, sink: &dyn ActivationSink) -> Result<usize> {
        apply_overrides_with_priority(&self.registry, &self.states, sink, self.priority)
    }

    fn ensure_registered(&self, id: &str) -> Result<()> {
        if self.registry.contains(id) {
            Ok(())
        } else {
            Err(FlagError::InvalidFlagId(id.to_string()))
        }
    }
}
