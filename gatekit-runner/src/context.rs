use gatekit_core::{Content, InvocationContext};
use serde_json::Value;
use std::collections::HashMap;

/// Concrete per-turn context handed to the agent by the [`crate::Runner`].
pub struct TurnContext {
    invocation_id: String,
    app_name: String,
    user_id: String,
    session_id: String,
    user_content: Content,
    resuming: bool,
    session_state: HashMap<String, Value>,
}

impl TurnContext {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        invocation_id: String,
        app_name: String,
        user_id: String,
        session_id: String,
        user_content: Content,
        resuming: bool,
        session_state: HashMap<String, Value>,
    ) -> Self {
        Self { invocation_id, app_name, user_id, session_id, user_content, resuming, session_state }
    }
}

impl InvocationContext for TurnContext {
    fn invocation_id(&self) -> &str {
        &self.invocation_id
    }

    fn app_name(&self) -> &str {
        &self.app_name
    }

    fn user_id(&self) -> &str {
        &self.user_id
    }

    fn session_id(&self) -> &str {
        &self.session_id
    }

    fn user_content(&self) -> &Content {
        &self.user_content
    }

    fn resuming(&self) -> bool {
        self.resuming
    }

    fn session_state(&self) -> &HashMap<String, Value> {
        &self.session_state
    }
}
