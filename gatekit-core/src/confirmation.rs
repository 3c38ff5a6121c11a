use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Session-state key holding the [`PendingApproval`] while a run is paused.
/// Cleared (set to `Null`) when the pause is resolved.
pub const PENDING_APPROVAL_KEY: &str = "gate:pending";

/// Well-known operation name carried by decision messages, so a resume
/// message is self-describing when serialized.
pub const CONFIRMATION_OP: &str = "request_confirmation";

/// A signal that a tool invocation is paused awaiting an external verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmationRequest {
    /// Unique request identifier, echoed back by the decision.
    pub id: String,
    /// Human-readable summary of what is being approved.
    pub hint: String,
    /// Arbitrary payload describing the gated call.
    pub payload: Value,
}

impl ConfirmationRequest {
    pub fn new(hint: impl Into<String>, payload: Value) -> Self {
        Self { id: format!("confirm-{}", Uuid::new_v4().simple()), hint: hint.into(), payload }
    }
}

/// The human or automated answer to a [`ConfirmationRequest`]. Terminal:
/// submitting it resolves the pause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmationDecision {
    pub request_id: String,
    pub approved: bool,
}

/// Confirmation state threaded explicitly into gated tool calls.
///
/// `Absent` on a fresh invocation, `Pending` while a request is outstanding,
/// `Decided` on the resumed invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfirmationState {
    Absent,
    Pending,
    Decided { approved: bool },
}

impl ConfirmationState {
    pub fn approved(&self) -> Option<bool> {
        match self {
            Self::Decided { approved } => Some(*approved),
            _ => None,
        }
    }
}

/// Bookkeeping recorded in session state between the pausing run and its
/// resume: which invocation paused, for which request, with which arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingApproval {
    pub invocation_id: String,
    pub request: ConfirmationRequest,
    /// Original gated-tool arguments, replayed on resume.
    pub args: Value,
}

impl PendingApproval {
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    pub fn from_value(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }
}
