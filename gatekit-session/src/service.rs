use crate::Session;
use async_trait::async_trait;
use gatekit_core::{Event, Result};

#[derive(Debug, Clone)]
pub struct CreateRequest {
    pub app_name: String,
    pub user_id: String,
    /// Explicit id: sessions are minted fresh per workflow run, never
    /// auto-generated by the store.
    pub session_id: String,
}

#[derive(Debug, Clone)]
pub struct GetRequest {
    pub app_name: String,
    pub user_id: String,
    pub session_id: String,
}

#[derive(Debug, Clone)]
pub struct DeleteRequest {
    pub app_name: String,
    pub user_id: String,
    pub session_id: String,
}

/// Session store contract. Sessions are addressed only by the
/// `(app_name, user_id, session_id)` triple.
#[async_trait]
pub trait SessionService: Send + Sync {
    /// Creates a session; a duplicate triple is a session error.
    async fn create(&self, req: CreateRequest) -> Result<Session>;
    async fn get(&self, req: GetRequest) -> Result<Session>;
    async fn delete(&self, req: DeleteRequest) -> Result<()>;

    /// Appends an event to the session's log and applies its state delta.
    /// A `Null` delta value deletes the key.
    async fn append_event(&self, session_id: &str, event: Event) -> Result<()>;
}
