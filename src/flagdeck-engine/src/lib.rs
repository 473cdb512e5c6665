//! Runtime feature flag overrides.
//!
//! An operator can force named boolean flags on or off at runtime. Each flag
//! is bound to an activation key; a forced state is published to an
//! [`ActivationSink`](flagdeck_hooks::ActivationSink) with a priority that beats
//! any ordinary provider, while flags left at `default` keep the host's own
//! value.
//!
//! - [`source`] - TOML definition files (`flags.local.toml` wins over `flags.toml`)
//! - [`registry`] - Sanitized, displayable flag definitions
//! - [`store`] - Override state persisted in one option record
//! - [`state`] - The `default -> on -> off -> default` cycle
//! - [`overrides`] - Binding overrides to an activation sink
//! - [`engine`] - The facade the control surface talks to
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use flagdeck_engine::{FlagCandidate, FlagEngine, FlagRegistry, FlagState, StateStore};
//! use flagdeck_hooks::FilterRegistry;
//! use flagdeck_storage::MemoryOptionStore;
//!
//! let registry = FlagRegistry::sanitize([
//!     ("x", FlagCandidate::new("X", "ext.x").default_value(true)),
//! ]);
//! let engine = FlagEngine::new(registry, StateStore::new(Arc::new(MemoryOptionStore::new())));
//!
//! let outcome = engine.request_toggle("x").unwrap();
//! assert_eq!(outcome.state, FlagState::On);
//!
//! let filters = FilterRegistry::new();
//! engine.apply_overrides(&filters).unwrap();
//! assert!(filters.apply("ext.x", false));
//! ```

pub mod definition;
pub mod engine;
pub mod error;
pub mod overrides;
pub mod registry;
pub mod source;
pub mod state;
pub mod store;
pub mod toggle;

#[cfg(test)]
mod tests;

pub use definition::{DefaultSpec, FlagCandidate, FlagDefinition};
pub use engine::{FlagEngine, FlagView};
pub use error::{FlagError, Result};
pub use overrides::{OVERRIDE_PRIORITY, apply_overrides};
pub use registry::FlagRegistry;
pub use source::DefinitionSource;
pub use state::{FlagState, STATE_CYCLE};
pub use store::{DEFAULT_OPTION_NAME, StateStore};
pub use toggle::{
    LocalOperator, RequestGuard, ResponseData, ToggleOutcome, ToggleRequest, ToggleResponse,
};
