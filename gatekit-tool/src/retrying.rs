use async_trait::async_trait;
use gatekit_core::{Result, RetryPolicy, Tool};
use serde_json::Value;
use std::sync::Arc;

/// Wraps a tool with transient-failure retries.
///
/// A call is retried when the inner tool reports a structured error whose
/// `status_code` the policy considers transient. Anything else, success or
/// a business error without a retryable code, passes through on the first
/// attempt; once attempts are exhausted the last result is returned as is.
pub struct RetryingTool {
    inner: Arc<dyn Tool>,
    policy: RetryPolicy,
}

impl RetryingTool {
    pub fn new(inner: Arc<dyn Tool>, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    fn retryable_code(&self, result: &Value) -> Option<u16> {
        let code = result.get("status_code")?.as_u64()?;
        let code = u16::try_from(code).ok()?;
        self.policy.is_retryable(code).then_some(code)
    }
}

#[async_trait]
impl Tool for RetryingTool {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn description(&self) -> &str {
        self.inner.description()
    }

    async fn call(&self, args: Value) -> Result<Value> {
        let attempts = if self.policy.enabled { self.policy.max_attempts.max(1) } else { 1 };
        let mut result = self.inner.call(args.clone()).await?;
        for attempt in 0..attempts.saturating_sub(1) {
            let Some(code) = self.retryable_code(&result) else {
                return Ok(result);
            };
            let delay = self.policy.delay_for(attempt);
            tracing::warn!(
                tool = self.inner.name(),
                status_code = code,
                delay_ms = delay.as_millis() as u64,
                "transient failure, retrying"
            );
            tokio::time::sleep(delay).await;
            result = self.inner.call(args.clone()).await?;
        }
        Ok(result)
    }
}
