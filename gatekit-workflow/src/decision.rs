use async_trait::async_trait;
use gatekit_core::{ConfirmationRequest, GatekitError, Result};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Where approval verdicts come from while a workflow is being driven.
///
/// Implementations range from a fixed answer (tests, demos) to an
/// interactive prompt that shows the request hint to a human.
#[async_trait]
pub trait DecisionSource: Send + Sync {
    async fn decide(&self, request: &ConfirmationRequest) -> Result<bool>;
}

/// Answers every request with the same verdict.
pub struct AutoDecision {
    approved: bool,
}

impl AutoDecision {
    pub fn approve() -> Self {
        Self { approved: true }
    }

    pub fn reject() -> Self {
        Self { approved: false }
    }
}

#[async_trait]
impl DecisionSource for AutoDecision {
    async fn decide(&self, request: &ConfirmationRequest) -> Result<bool> {
        tracing::info!(request_id = %request.id, approved = self.approved, "auto decision");
        Ok(self.approved)
    }
}

/// Answers with a fixed sequence of verdicts, one per pause. Running out of
/// verdicts is an execution error; a driven run must not stall silently.
pub struct SequenceDecision {
    verdicts: Mutex<VecDeque<bool>>,
}

impl SequenceDecision {
    pub fn new(verdicts: impl IntoIterator<Item = bool>) -> Self {
        Self { verdicts: Mutex::new(verdicts.into_iter().collect()) }
    }
}

#[async_trait]
impl DecisionSource for SequenceDecision {
    async fn decide(&self, request: &ConfirmationRequest) -> Result<bool> {
        let mut verdicts = self
            .verdicts
            .lock()
            .map_err(|_| GatekitError::Execution("decision sequence lock poisoned".to_string()))?;
        verdicts.pop_front().ok_or_else(|| {
            GatekitError::Execution(format!(
                "no verdict left for confirmation request '{}'",
                request.id
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request() -> ConfirmationRequest {
        ConfirmationRequest::new("approve?", json!({"count": 10}))
    }

    #[tokio::test]
    async fn test_auto_decision_is_constant() {
        assert!(AutoDecision::approve().decide(&request()).await.unwrap());
        assert!(!AutoDecision::reject().decide(&request()).await.unwrap());
    }

    #[tokio::test]
    async fn test_sequence_decision_pops_in_order() {
        let source = SequenceDecision::new([true, false]);
        assert!(source.decide(&request()).await.unwrap());
        assert!(!source.decide(&request()).await.unwrap());

        let err = source.decide(&request()).await.unwrap_err();
        assert!(matches!(err, GatekitError::Execution(_)));
    }
}
