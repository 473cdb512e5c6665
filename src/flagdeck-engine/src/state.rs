//! Override states and the state cycle.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FlagError;

/// Override state of a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagState {
    /// No override; the host's own value applies.
    #[default]
    Default,
    /// Forced on.
    On,
    /// Forced off.
    Off,
}

/// Rotation order for [`FlagState::next`].
pub const STATE_CYCLE: [FlagState; 3] = [FlagState::Default, FlagState::On, FlagState::Off];

impl FlagState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::On => "on",
            Self::Off => "off",
        }
    }

    /// The state after this one in [`STATE_CYCLE`], wrapping around.
    pub fn next(self) -> Self {
        let index = STATE_CYCLE
            .iter()
            .position(|s| *s == self)
            .unwrap_or_default();
        STATE_CYCLE[(index + 1) % STATE_CYCLE.len()]
    }

    /// The value this state forces, `None` for [`FlagState::Default`].
    pub fn forced_value(&self) -> Option<bool> {
        match self {
            Self::Default => None,
            Self::On => Some(true),
            Self::Off => Some(false),
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }
}

impl fmt::Display for FlagState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlagState {
    type Err = FlagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Self::Default),
            "on" => Ok(Self::On),
            "off" => Ok(Self::Off),
            other => Err(FlagError::InvalidTargetState(other.to_string())),
        }
    }
}
