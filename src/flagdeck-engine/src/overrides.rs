//! Applying stored overrides to an activation sink.

use std::sync::Arc;

use flagdeck_hooks::ActivationSink;
use tracing::debug;

use crate::error::Result;
use crate::registry::FlagRegistry;
use crate::store::StateStore;

/// Priority used for override bindings. High enough to run after any
/// ordinary provider of the same activation key.
pub const OVERRIDE_PRIORITY: i32 = 99_999;

/// Bind every non-default override in `registry` to `sink`.
///
/// Flags at `default` are left alone so the host keeps its own value. Each
/// flag's state is read from `states` individually. Returns the number of
/// bindings created.
pub fn apply_overrides(
    registry: &FlagRegistry,
    states: &StateStore,
    sink: &dyn ActivationSink,
) -> Result<usize> {
    apply_overrides_with_priority(registry, states, sink, OVERRIDE_PRIORITY)
}

/// [`apply_overrides`] with an explicit binding priority.
pub fn apply_overrides_with_priority(
    registry: &FlagRegistry,
    states: &StateStore,
    sink: &dyn ActivationSink,
    priority: i32,
) -> Result<usize> {
    let mut applied = 0;

    for flag in registry.iter() {
        let state = states.get_state(flag.id())?;
        let Some(value) = state.forced_value() else {
            continue;
        };

        sink.bind(flag.activation_key(), priority, Arc::new(move || value));
        debug!(flag = flag.id(), key = flag.activation_key(), value, "Override applied");
        applied += 1;
    }

    Ok(applied)
}
