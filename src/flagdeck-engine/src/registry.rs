//! Flag registry.

use indexmap::IndexMap;
use tracing::debug;

use crate::definition::{FlagCandidate, FlagDefinition};

/// Why a candidate was left out of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rejection {
    NotATable,
    Empty,
    Unparseable,
    MissingLabel,
    MissingActivationKey,
    Hidden,
}

impl Rejection {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::NotATable => "entry is not a table",
            Self::Empty => "entry is empty",
            Self::Unparseable => "entry has fields of the wrong type",
            Self::MissingLabel => "label is missing or empty",
            Self::MissingActivationKey => "filter is missing or empty",
            Self::Hidden => "display is false",
        }
    }
}

pub(crate) fn log_rejection(id: &str, reason: Rejection) {
    debug!(flag = id, reason = reason.as_str(), "Dropping feature flag definition");
}

/// Validated, displayable flags in definition order. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct FlagRegistry {
    flags: IndexMap<String, FlagDefinition>,
}

impl FlagRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from raw candidates.
    ///
    /// Candidates with an empty or whitespace-only label or activation key,
    /// and candidates with
    /// `display = false`, are dropped without surfacing an error. A later
    /// candidate with the same id replaces an earlier one.
    pub fn sanitize<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = (S, FlagCandidate)>,
        S: Into<String>,
    {
        let mut flags = IndexMap::new();

        for (id, candidate) in candidates {
            let id = id.into();
            if let Err(reason) = check(&candidate) {
                log_rejection(&id, reason);
                continue;
            }

            let definition = FlagDefinition {
                id: id.clone(),
                label: candidate.label,
                activation_key: candidate.activation_key,
                default: candidate.default.normalized(),
            };
            flags.insert(id, definition);
        }

        debug!(count = flags.len(), "Feature flag registry built");
        Self { flags }
    }

    pub fn get(&self, id: &str) -> Option<&FlagDefinition> {
        self.flags.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.flags.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Flags in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &FlagDefinition> {
        self.flags.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.flags.keys().map(String::as_str)
    }
}

fn check(candidate: &FlagCandidate) -> Result<(), Rejection> {
    if candidate.label.trim().is_empty() {
        return Err(Rejection::MissingLabel);
    }
    if candidate.activation_key.trim().is_empty() {
        return Err(Rejection::MissingActivationKey);
    }
    if candidate.display == Some(false) {
        return Err(Rejection::Hidden);
    }
    Ok(())
}
