use crate::{Result, confirmation::ConfirmationState};
use async_trait::async_trait;
use serde_json::Value;

/// A plain business tool. Business failures are returned as structured
/// result values (`{"status": "error", ...}`), not as `Err`; `Err` is
/// reserved for invariant violations.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;

    async fn call(&self, args: Value) -> Result<Value>;
}

/// Outcome of a gated-tool check: either a final result or a request to
/// pause for confirmation.
#[derive(Debug, Clone, PartialEq)]
pub enum GateOutcome {
    Completed(Value),
    ConfirmationNeeded { hint: String, payload: Value },
}

/// A callable business operation that may require external approval before
/// completing. The confirmation state is passed explicitly on every call;
/// on a `Decided` call the tool must branch on the verdict only, without
/// re-evaluating its own policy.
#[async_trait]
pub trait GatedTool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;

    async fn check(&self, args: Value, confirmation: &ConfirmationState) -> Result<GateOutcome>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "returns its arguments"
        }

        async fn call(&self, args: Value) -> Result<Value> {
            Ok(args)
        }
    }

    struct AlwaysGate;

    #[async_trait]
    impl GatedTool for AlwaysGate {
        fn name(&self) -> &str {
            "always_gate"
        }

        fn description(&self) -> &str {
            "pauses unless decided"
        }

        async fn check(
            &self,
            args: Value,
            confirmation: &ConfirmationState,
        ) -> Result<GateOutcome> {
            match confirmation.approved() {
                Some(true) => Ok(GateOutcome::Completed(json!({"status": "approved"}))),
                Some(false) => Ok(GateOutcome::Completed(json!({"status": "rejected"}))),
                None => Ok(GateOutcome::ConfirmationNeeded {
                    hint: "approve?".to_string(),
                    payload: args,
                }),
            }
        }
    }

    #[tokio::test]
    async fn test_tool_call() {
        let tool = EchoTool;
        assert_eq!(tool.name(), "echo");
        let result = tool.call(json!({"x": 1})).await.unwrap();
        assert_eq!(result, json!({"x": 1}));
    }

    #[tokio::test]
    async fn test_gated_tool_branches_on_state() {
        let gate = AlwaysGate;
        let outcome = gate.check(json!({}), &ConfirmationState::Absent).await.unwrap();
        assert!(matches!(outcome, GateOutcome::ConfirmationNeeded { .. }));

        let outcome = gate
            .check(json!({}), &ConfirmationState::Decided { approved: true })
            .await
            .unwrap();
        assert_eq!(outcome, GateOutcome::Completed(json!({"status": "approved"})));
    }
}
