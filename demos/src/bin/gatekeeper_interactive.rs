//! Interactive gatekeeper: you are the admin. Batches over the threshold
//! pause the run and wait for your verdict on stdin.

use anyhow::Result;
use async_trait::async_trait;
use gatekit::agent::GateAgent;
use gatekit::core::{ConfirmationRequest, GatekitConfig, GatekitError};
use gatekit::runner::{Runner, RunnerConfig};
use gatekit::session::InMemorySessionService;
use gatekit::tool::BatchGate;
use gatekit::workflow::{ApprovalWorkflow, DecisionSource};
use serde_json::json;
use std::io::Write;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Asks the operator on stdin. Anything but an explicit yes is a rejection.
struct PromptDecision;

#[async_trait]
impl DecisionSource for PromptDecision {
    async fn decide(&self, request: &ConfirmationRequest) -> gatekit::core::Result<bool> {
        println!("\n{}", request.hint);
        print!("approve? [y/N] ");
        std::io::stdout().flush()?;

        let line = tokio::task::spawn_blocking(|| {
            let mut line = String::new();
            std::io::stdin().read_line(&mut line).map(|_| line)
        })
        .await
        .map_err(|e| GatekitError::Execution(format!("stdin reader task failed: {e}")))??;

        Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = GatekitConfig::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let count: u64 = args.next().as_deref().unwrap_or("10").parse()?;
    let prompt = args.collect::<Vec<_>>().join(" ");
    let prompt = if prompt.is_empty() { "a space station".to_string() } else { prompt };

    let sessions = Arc::new(InMemorySessionService::new());
    let agent = GateAgent::builder("gatekeeper")
        .description("validates batch requests")
        .gate(Arc::new(BatchGate::new(config.approval_threshold)))
        .build()?;
    let runner = Arc::new(Runner::new(RunnerConfig {
        app_name: config.app_name.clone(),
        agent: Arc::new(agent),
        session_service: sessions.clone(),
    }));
    let workflow = ApprovalWorkflow::new(config, runner, sessions)?;

    let query = json!({"count": count, "prompt": prompt}).to_string();
    println!("requesting a batch of {count} for '{prompt}'");
    let run = workflow.execute(&query, &PromptDecision).await?;

    println!("\nstatus: {}", run.final_status().unwrap_or("(none)"));
    if let Some(ticket) = run.ticket() {
        println!("ticket: {ticket}");
    }
    Ok(())
}
