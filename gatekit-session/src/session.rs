use chrono::{DateTime, Utc};
use gatekit_core::{Event, PENDING_APPROVAL_KEY, PendingApproval};
use serde_json::Value;
use std::collections::HashMap;

/// Point-in-time snapshot of one workflow run's conversation context:
/// identifier triple, state map, and ordered event log.
#[derive(Debug, Clone)]
pub struct Session {
    pub app_name: String,
    pub user_id: String,
    pub id: String,
    pub state: HashMap<String, Value>,
    pub events: Vec<Event>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new(
        app_name: impl Into<String>,
        user_id: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            user_id: user_id.into(),
            id: id.into(),
            state: HashMap::new(),
            events: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    /// The recorded pause bookkeeping, when this session is suspended
    /// awaiting a confirmation decision.
    pub fn pending_approval(&self) -> Option<PendingApproval> {
        self.state.get(PENDING_APPROVAL_KEY).and_then(PendingApproval::from_value)
    }
}
