//! Toggle requests and their response payloads.

use serde::{Deserialize, Serialize};

use crate::error::FlagError;
use crate::state::FlagState;

/// A request from the control surface to cycle one flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleRequest {
    /// Flag id.
    pub id: String,
    /// Anti-forgery token issued by the host, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl ToggleRequest {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

/// Host-side authorization and anti-forgery check, run before the engine
/// touches any state.
pub trait RequestGuard {
    fn authorize(&self, request: &ToggleRequest) -> bool;
}

impl<F> RequestGuard for F
where
    F: Fn(&ToggleRequest) -> bool,
{
    fn authorize(&self, request: &ToggleRequest) -> bool {
        self(request)
    }
}

/// Guard for a local operator who already owns the state store, such as the
/// command line tool.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalOperator;

impl RequestGuard for LocalOperator {
    fn authorize(&self, _request: &ToggleRequest) -> bool {
        true
    }
}

/// Result of a successful toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleOutcome {
    pub id: String,
    pub state: FlagState,
}

/// Payload of a toggle response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseData {
    Toggled(ToggleOutcome),
    Message(String),
}

/// Structured response returned to the control surface:
/// `{"success": true, "data": {"id": .., "state": ..}}` or
/// `{"success": false, "data": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleResponse {
    pub success: bool,
    pub data: ResponseData,
}

impl ToggleResponse {
    pub fn success(outcome: ToggleOutcome) -> Self {
        Self {
            success: true,
            data: ResponseData::Toggled(outcome),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: ResponseData::Message(message.into()),
        }
    }
}

impl From<Result<ToggleOutcome, FlagError>> for ToggleResponse {
    fn from(result: Result<ToggleOutcome, FlagError>) -> Self {
        match result {
            Ok(outcome) => Self::success(outcome),
            Err(e) => Self::error(e.public_message()),
        }
    }
}
