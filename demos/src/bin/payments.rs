//! Payment lookup demo: fee and exchange-rate tools behind the retry
//! wrapper, including the structured-error path for unknown keys.

use anyhow::Result;
use gatekit::core::{RetryPolicy, Tool};
use gatekit::tool::{ExchangeRateTool, PaymentFeeTool, RetryingTool};
use serde_json::json;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let policy = RetryPolicy::default();
    let fees = RetryingTool::new(Arc::new(PaymentFeeTool), policy.clone());
    let rates = RetryingTool::new(Arc::new(ExchangeRateTool), policy);

    for method in ["platinum credit card", "bank transfer", "crypto wallet"] {
        let result = fees.call(json!({"method": method})).await?;
        println!("fee for {method}: {result}");
    }

    for target in ["EUR", "JPY", "GBP"] {
        let result = rates
            .call(json!({"base_currency": "USD", "target_currency": target}))
            .await?;
        println!("USD -> {target}: {result}");
    }

    Ok(())
}
