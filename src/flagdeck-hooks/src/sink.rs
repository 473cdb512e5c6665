//! The binding interface the override engine writes to.

use std::sync::Arc;

/// A zero-argument boolean provider.
pub type Provider = Arc<dyn Fn() -> bool + Send + Sync>;

/// Receiver of activation bindings.
///
/// Implemented by an adapter over the host's extension-point mechanism, or by
/// [`FilterRegistry`](crate::FilterRegistry) when the host is this process.
/// Bindings are never removed; they live as long as the sink.
pub trait ActivationSink {
    /// Bind `provider` to `key`. Higher priorities are evaluated later and
    /// therefore take precedence.
    fn bind(&self, key: &str, priority: i32, provider: Provider);
}

impl<T: ActivationSink + ?Sized> ActivationSink for &T {
    fn bind(&self, key: &str, priority: i32, provider: Provider) {
        (**self).bind(key, priority, provider)
    }
}

impl<T: ActivationSink + ?Sized> ActivationSink for Arc<T> {
    fn bind(&self, key: &str, priority: i32, provider: Provider) {
        (**self).bind(key, priority, provider)
    }
}
