use crate::{CreateRequest, DeleteRequest, GetRequest, Session, SessionService};
use async_trait::async_trait;
use chrono::Utc;
use gatekit_core::{Event, GatekitError, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// In-memory session store. No state is shared between sessions; each
/// session's pending confirmation is local to that session.
pub struct InMemorySessionService {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

fn key(app_name: &str, user_id: &str, session_id: &str) -> String {
    format!("{app_name}:{user_id}:{session_id}")
}

impl InMemorySessionService {
    pub fn new() -> Self {
        Self { sessions: Arc::new(RwLock::new(HashMap::new())) }
    }
}

impl Default for InMemorySessionService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionService for InMemorySessionService {
    async fn create(&self, req: CreateRequest) -> Result<Session> {
        let session = Session::new(req.app_name, req.user_id, req.session_id);
        let k = key(&session.app_name, &session.user_id, &session.id);

        let mut sessions = self.sessions.write().unwrap();
        if sessions.contains_key(&k) {
            return Err(GatekitError::Session(format!("session '{}' already exists", session.id)));
        }
        tracing::debug!(session_id = %session.id, "session created");
        sessions.insert(k, session.clone());
        Ok(session)
    }

    async fn get(&self, req: GetRequest) -> Result<Session> {
        let sessions = self.sessions.read().unwrap();
        sessions
            .get(&key(&req.app_name, &req.user_id, &req.session_id))
            .cloned()
            .ok_or_else(|| GatekitError::Session(format!("session '{}' not found", req.session_id)))
    }

    async fn delete(&self, req: DeleteRequest) -> Result<()> {
        let mut sessions = self.sessions.write().unwrap();
        sessions.remove(&key(&req.app_name, &req.user_id, &req.session_id));
        Ok(())
    }

    async fn append_event(&self, session_id: &str, event: Event) -> Result<()> {
        let mut sessions = self.sessions.write().unwrap();
        let session = sessions
            .values_mut()
            .find(|s| s.id == session_id)
            .ok_or_else(|| GatekitError::Session(format!("session '{session_id}' not found")))?;

        for (k, v) in &event.actions.state_delta {
            if v == &Value::Null {
                session.state.remove(k);
            } else {
                session.state.insert(k.clone(), v.clone());
            }
        }
        session.updated_at = Utc::now();
        session.events.push(event);
        Ok(())
    }
}
