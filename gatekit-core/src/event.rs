use crate::confirmation::ConfirmationRequest;
use crate::types::Content;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

/// Event represents one unit of output produced while an agent executes a
/// turn. Events are produced in a time-ordered sequence and consumed in
/// arrival order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub invocation_id: String,
    pub author: String,
    pub kind: EventKind,
    #[serde(default)]
    pub actions: EventActions,
}

/// What an event carries. The pause signal is a dedicated variant rather
/// than a reserved function-call name, so pause detection is exhaustive and
/// statically checkable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Message { content: Content },
    ToolResult { name: String, result: Value },
    ConfirmationRequested(ConfirmationRequest),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventActions {
    /// Session-state changes to apply when the event is appended.
    /// A `Null` value deletes the key.
    pub state_delta: HashMap<String, Value>,
}

impl Event {
    pub fn new(invocation_id: impl Into<String>, author: impl Into<String>, kind: EventKind) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            invocation_id: invocation_id.into(),
            author: author.into(),
            kind,
            actions: EventActions::default(),
        }
    }

    pub fn message(
        invocation_id: impl Into<String>,
        author: impl Into<String>,
        content: Content,
    ) -> Self {
        Self::new(invocation_id, author, EventKind::Message { content })
    }

    pub fn tool_result(
        invocation_id: impl Into<String>,
        author: impl Into<String>,
        name: impl Into<String>,
        result: Value,
    ) -> Self {
        Self::new(invocation_id, author, EventKind::ToolResult { name: name.into(), result })
    }

    pub fn confirmation_requested(
        invocation_id: impl Into<String>,
        author: impl Into<String>,
        request: ConfirmationRequest,
    ) -> Self {
        Self::new(invocation_id, author, EventKind::ConfirmationRequested(request))
    }

    pub fn with_state_delta(mut self, key: impl Into<String>, value: Value) -> Self {
        self.actions.state_delta.insert(key.into(), value);
        self
    }

    /// The confirmation request carried by this event, if it is a pause signal.
    pub fn confirmation_request(&self) -> Option<&ConfirmationRequest> {
        match &self.kind {
            EventKind::ConfirmationRequested(request) => Some(request),
            _ => None,
        }
    }

    /// Text payload, for Message events with text parts.
    pub fn text(&self) -> Option<String> {
        match &self.kind {
            EventKind::Message { content } => content.text(),
            _ => None,
        }
    }

    /// Tool result payload, for ToolResult events.
    pub fn tool_output(&self) -> Option<(&str, &Value)> {
        match &self.kind {
            EventKind::ToolResult { name, result } => Some((name.as_str(), result)),
            _ => None,
        }
    }
}
