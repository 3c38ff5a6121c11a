use async_trait::async_trait;
use gatekit_core::{ConfirmationState, GateOutcome, GatedTool, Result};
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;

type GateHandler = Box<
    dyn Fn(Value, ConfirmationState) -> Pin<Box<dyn Future<Output = Result<GateOutcome>> + Send>>
        + Send
        + Sync,
>;

/// Wraps an async closure as a [`GatedTool`]. Useful for custom approval
/// policies without a dedicated type.
pub struct FunctionGate {
    name: String,
    description: String,
    handler: GateHandler,
}

impl FunctionGate {
    pub fn new<F, Fut>(name: impl Into<String>, description: impl Into<String>, handler: F) -> Self
    where
        F: Fn(Value, ConfirmationState) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<GateOutcome>> + Send + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            handler: Box::new(move |args, state| Box::pin(handler(args, state))),
        }
    }
}

#[async_trait]
impl GatedTool for FunctionGate {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn check(&self, args: Value, confirmation: &ConfirmationState) -> Result<GateOutcome> {
        (self.handler)(args, *confirmation).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_function_gate_receives_state() {
        let gate = FunctionGate::new("custom", "pauses unless decided", |args, state| async move {
            match state.approved() {
                Some(approved) => {
                    Ok(GateOutcome::Completed(json!({"status": approved.to_string()})))
                }
                None => Ok(GateOutcome::ConfirmationNeeded {
                    hint: "verdict needed".to_string(),
                    payload: args,
                }),
            }
        });

        let outcome = gate.check(json!({}), &ConfirmationState::Absent).await.unwrap();
        assert!(matches!(outcome, GateOutcome::ConfirmationNeeded { .. }));

        let outcome = gate
            .check(json!({}), &ConfirmationState::Decided { approved: true })
            .await
            .unwrap();
        assert_eq!(outcome, GateOutcome::Completed(json!({"status": "true"})));
    }
}
