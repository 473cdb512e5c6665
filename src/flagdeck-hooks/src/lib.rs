//! Activation sink for flagdeck.
//!
//! An activation key names an extension point whose boolean value can be
//! overridden. Providers are bound to a key with a priority; when the key is
//! evaluated, providers run in ascending priority and the last one decides.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use flagdeck_hooks::{ActivationSink, FilterRegistry};
//!
//! let filters = FilterRegistry::new();
//! filters.bind("checkout.applepay_enabled", 10, Arc::new(|| false));
//! filters.bind("checkout.applepay_enabled", 99_999, Arc::new(|| true));
//!
//! assert!(filters.apply("checkout.applepay_enabled", false));
//! assert!(!filters.apply("checkout.unbound", false));
//! ```

pub mod filter;
pub mod sink;

pub use filter::FilterRegistry;
pub use sink::{ActivationSink, Provider};
