//! Flag definitions.

use std::fmt;
use std::sync::Arc;

/// Where a flag's built-in default comes from.
#[derive(Clone, Default)]
pub enum DefaultSpec {
    /// A fixed value.
    Literal(bool),
    /// Recomputed on every resolution, e.g. from an environment variable.
    Computed(Arc<dyn Fn() -> bool + Send + Sync>),
    /// No known default; the state is informational only.
    #[default]
    Unknown,
}

impl DefaultSpec {
    /// Wrap a closure as a computed default.
    pub fn computed(f: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        Self::Computed(Arc::new(f))
    }

    /// Computed default that is `true` when `var` is set to exactly `value`.
    pub fn env_equals(var: impl Into<String>, value: impl Into<String>) -> Self {
        let var = var.into();
        let value = value.into();
        Self::computed(move || std::env::var(&var).is_ok_and(|v| v == value))
    }

    /// Computed default that is `true` unless `var` is set to exactly `value`.
    /// An unset variable counts as "not equal".
    pub fn env_not_equals(var: impl Into<String>, value: impl Into<String>) -> Self {
        let var = var.into();
        let value = value.into();
        Self::computed(move || !std::env::var(&var).is_ok_and(|v| v == value))
    }

    /// Evaluate the default. Nothing is cached.
    pub fn resolve(&self) -> Option<bool> {
        match self {
            Self::Literal(value) => Some(*value),
            Self::Computed(f) => Some(f()),
            Self::Unknown => None,
        }
    }

    /// Falsy defaults carry no information: an absent default and a literal
    /// `false` both become [`DefaultSpec::Unknown`].
    pub(crate) fn normalized(self) -> Self {
        match self {
            Self::Literal(false) => Self::Unknown,
            other => other,
        }
    }
}

impl fmt::Debug for DefaultSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
            Self::Unknown => f.write_str("Unknown"),
        }
    }
}

/// An unvalidated flag entry as supplied by a definition source.
#[derive(Debug, Clone, Default)]
pub struct FlagCandidate {
    /// Display label.
    pub label: String,
    /// Activation key (filter name) this flag controls.
    pub activation_key: String,
    /// Built-in default.
    pub default: DefaultSpec,
    /// `Some(false)` hides the flag; absent means displayable.
    pub display: Option<bool>,
}

impl FlagCandidate {
    pub fn new(label: impl Into<String>, activation_key: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            activation_key: activation_key.into(),
            ..Default::default()
        }
    }

    pub fn default_value(mut self, value: bool) -> Self {
        self.default = DefaultSpec::Literal(value);
        self
    }

    pub fn computed_default(mut self, f: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        self.default = DefaultSpec::computed(f);
        self
    }

    pub fn with_default(mut self, default: DefaultSpec) -> Self {
        self.default = default;
        self
    }

    /// Exclude the flag from the registry.
    pub fn hidden(mut self) -> Self {
        self.display = Some(false);
        self
    }
}

/// A validated, displayable flag. Only built by the registry sanitizer.
#[derive(Debug, Clone)]
pub struct FlagDefinition {
    pub(crate) id: String,
    pub(crate) label: String,
    pub(crate) activation_key: String,
    pub(crate) default: DefaultSpec,
}

impl FlagDefinition {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn activation_key(&self) -> &str {
        &self.activation_key
    }

    pub fn default_spec(&self) -> &DefaultSpec {
        &self.default
    }

    /// The flag's built-in default, evaluated fresh.
    pub fn resolve_default(&self) -> Option<bool> {
        self.default.resolve()
    }
}
