use async_trait::async_trait;
use gatekit_core::{ConfirmationState, GateOutcome, GatedTool, GatekitError, Result};
use serde_json::{Value, json};
use uuid::Uuid;

/// Threshold-gated batch validator.
///
/// Batches at or under the threshold are auto-approved. Larger batches
/// request confirmation; the resumed call branches on the verdict only and
/// never re-evaluates the threshold. Approved batches get a ticket suffixed
/// `AUTO` or `HUMAN` according to how they were approved; rejected batches
/// get none.
pub struct BatchGate {
    threshold: u64,
}

impl BatchGate {
    pub fn new(threshold: u64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    fn ticket(suffix: &str) -> String {
        let id = Uuid::new_v4().simple().to_string();
        format!("batch-{}-{suffix}", &id[..8])
    }

    fn count(args: &Value) -> Result<u64> {
        args.get("count")
            .and_then(Value::as_u64)
            .ok_or_else(|| GatekitError::Tool("batch gate requires a numeric 'count'".to_string()))
    }
}

#[async_trait]
impl GatedTool for BatchGate {
    fn name(&self) -> &str {
        "validate_batch"
    }

    fn description(&self) -> &str {
        "Validates a batch request against the approval threshold"
    }

    async fn check(&self, args: Value, confirmation: &ConfirmationState) -> Result<GateOutcome> {
        match confirmation {
            ConfirmationState::Decided { approved: true } => Ok(GateOutcome::Completed(json!({
                "status": "approved",
                "message": "Batch request approved by admin.",
                "ticket": Self::ticket("HUMAN"),
            }))),
            ConfirmationState::Decided { approved: false } => Ok(GateOutcome::Completed(json!({
                "status": "rejected",
                "message": "Batch request rejected by admin.",
            }))),
            ConfirmationState::Pending => Err(GatekitError::Tool(
                "batch gate re-entered while a confirmation is still pending".to_string(),
            )),
            ConfirmationState::Absent => {
                let count = Self::count(&args)?;
                tracing::debug!(count, threshold = self.threshold, "checking batch request");
                if count <= self.threshold {
                    return Ok(GateOutcome::Completed(json!({
                        "status": "approved",
                        "message": format!("Batch of {count} auto-approved."),
                        "ticket": Self::ticket("AUTO"),
                    })));
                }
                let prompt = args.get("prompt").and_then(Value::as_str).unwrap_or("(none)");
                Ok(GateOutcome::ConfirmationNeeded {
                    hint: format!("Bulk request: {count} items for '{prompt}'. Approve?"),
                    payload: args,
                })
            }
        }
    }
}
