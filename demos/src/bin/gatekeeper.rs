//! Scripted gatekeeper walkthrough: three batch requests against the
//! approval threshold, showing auto-approval, human approval, and rejection.

use anyhow::Result;
use gatekit::agent::GateAgent;
use gatekit::core::GatekitConfig;
use gatekit::runner::{Runner, RunnerConfig};
use gatekit::session::InMemorySessionService;
use gatekit::tool::{BatchGate, FunctionTool};
use gatekit::workflow::{ApprovalWorkflow, AutoDecision, DecisionSource};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn build_workflow(config: GatekitConfig) -> Result<ApprovalWorkflow> {
    let sessions = Arc::new(InMemorySessionService::new());
    let render = FunctionTool::new("render", "renders one item", |args: Value| async move {
        Ok(json!({
            "status": "success",
            "prompt": args.get("prompt").cloned().unwrap_or(Value::Null),
        }))
    });
    let agent = GateAgent::builder("gatekeeper")
        .description("validates batch requests before rendering")
        .gate(Arc::new(BatchGate::new(config.approval_threshold)))
        .fulfillment(Arc::new(render))
        .build()?;
    let runner = Arc::new(Runner::new(RunnerConfig {
        app_name: config.app_name.clone(),
        agent: Arc::new(agent),
        session_service: sessions.clone(),
    }));
    Ok(ApprovalWorkflow::new(config, runner, sessions)?)
}

async fn scenario(
    workflow: &ApprovalWorkflow,
    label: &str,
    count: u64,
    prompt: &str,
    decisions: &dyn DecisionSource,
) -> Result<()> {
    println!("\n=== {label} ===");
    let query = json!({"count": count, "prompt": prompt}).to_string();
    let run = workflow.execute(&query, decisions).await?;

    println!("session:  {}", run.session_id);
    println!("pauses:   {}", run.pauses);
    println!("status:   {}", run.final_status().unwrap_or("(none)"));
    if let Some(ticket) = run.ticket() {
        println!("ticket:   {ticket}");
    }
    if let Some(message) = run.final_message() {
        println!("message:  {message}");
    }
    Ok(())
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

    println!("approval threshold: {}", config.approval_threshold);
    let workflow = build_workflow(config)?;

    scenario(&workflow, "small batch, auto-approved", 3, "a cat wearing a hat", &AutoDecision::approve())
        .await?;
    scenario(&workflow, "large batch, admin approves", 10, "a space station", &AutoDecision::approve())
        .await?;
    scenario(&workflow, "large batch, admin rejects", 8, "neon skyline", &AutoDecision::reject())
        .await?;

    Ok(())
}
