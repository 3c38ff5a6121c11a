use crate::{Result, event::Event, types::Content};
use async_trait::async_trait;
use futures::stream::Stream;
use serde_json::Value;
use std::collections::HashMap;
use std::pin::Pin;
use std::sync::Arc;

/// Lazy, finite, non-restartable sequence of events produced by one turn.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<Event>> + Send>>;

/// The agent-execution collaborator: runs one turn and streams its events.
#[async_trait]
pub trait Agent: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;

    async fn run(&self, ctx: Arc<dyn InvocationContext>) -> Result<EventStream>;
}

/// Per-turn view handed to an agent: identifiers, the user input, whether
/// this turn resumes a paused invocation, and a snapshot of session state
/// taken when the turn started.
pub trait InvocationContext: Send + Sync {
    fn invocation_id(&self) -> &str;
    fn app_name(&self) -> &str;
    fn user_id(&self) -> &str;
    fn session_id(&self) -> &str;
    fn user_content(&self) -> &Content;
    fn resuming(&self) -> bool;
    fn session_state(&self) -> &HashMap<String, Value>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_stream::stream;
    use futures::StreamExt;

    struct TestAgent {
        name: String,
    }

    #[async_trait]
    impl Agent for TestAgent {
        fn name(&self) -> &str {
            &self.name
        }

        fn description(&self) -> &str {
            "test agent"
        }

        async fn run(&self, ctx: Arc<dyn InvocationContext>) -> Result<EventStream> {
            let invocation_id = ctx.invocation_id().to_string();
            let s = stream! {
                yield Ok(Event::message(
                    invocation_id,
                    "test",
                    Content::new("model").with_text("ok"),
                ));
            };
            Ok(Box::pin(s))
        }
    }

    struct TestContext {
        content: Content,
        state: HashMap<String, Value>,
    }

    impl InvocationContext for TestContext {
        fn invocation_id(&self) -> &str {
            "inv-test"
        }
        fn app_name(&self) -> &str {
            "app"
        }
        fn user_id(&self) -> &str {
            "user"
        }
        fn session_id(&self) -> &str {
            "session"
        }
        fn user_content(&self) -> &Content {
            &self.content
        }
        fn resuming(&self) -> bool {
            false
        }
        fn session_state(&self) -> &HashMap<String, Value> {
            &self.state
        }
    }

    #[tokio::test]
    async fn test_agent_trait() {
        let agent = TestAgent { name: "test".to_string() };
        assert_eq!(agent.name(), "test");

        let ctx = Arc::new(TestContext {
            content: Content::new("user").with_text("hello"),
            state: HashMap::new(),
        });
        let mut stream = agent.run(ctx).await.unwrap();
        let event = stream.next().await.unwrap().unwrap();
        assert_eq!(event.invocation_id, "inv-test");
        assert!(stream.next().await.is_none());
    }
}
