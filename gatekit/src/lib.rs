//! # gatekit
//!
//! Pausable human-in-the-loop approval workflows for tool-calling agents.
//!
//! A run starts, executes a gated tool call, and either completes or pauses
//! with a confirmation request. The caller gathers a verdict out of band,
//! then resumes the same invocation with the decision attached; the run
//! finishes (or pauses again). All turn state lives in the session store,
//! so a pause holds no task open.
//!
//! This crate is an umbrella re-exporting the member crates:
//!
//! - [`core`] - events, confirmation types, traits, errors, config
//! - [`session`] - session store contract and in-memory implementation
//! - [`runner`] - per-turn driver with resume correlation
//! - [`agent`] - the resumable gated-tool agent
//! - [`tool`] - gates and tools
//! - [`workflow`] - the approval workflow controller and drive loop
//!
//! ## Quick start
//!
//! ```no_run
//! use gatekit::agent::GateAgent;
//! use gatekit::core::GatekitConfig;
//! use gatekit::runner::{Runner, RunnerConfig};
//! use gatekit::session::InMemorySessionService;
//! use gatekit::tool::BatchGate;
//! use gatekit::workflow::{ApprovalWorkflow, AutoDecision};
//! use std::sync::Arc;
//!
//! # async fn run() -> gatekit::core::Result<()> {
//! let config = GatekitConfig::default();
//! let sessions = Arc::new(InMemorySessionService::new());
//! let agent = GateAgent::builder("gatekeeper")
//!     .gate(Arc::new(BatchGate::new(config.approval_threshold)))
//!     .build()?;
//! let runner = Arc::new(Runner::new(RunnerConfig {
//!     app_name: config.app_name.clone(),
//!     agent: Arc::new(agent),
//!     session_service: sessions.clone(),
//! }));
//!
//! let workflow = ApprovalWorkflow::new(config, runner, sessions)?;
//! let run = workflow
//!     .execute(r#"{"count": 10, "prompt": "a space station"}"#, &AutoDecision::approve())
//!     .await?;
//! println!("{:?} after {} pause(s)", run.final_status(), run.pauses);
//! # Ok(())
//! # }
//! ```

pub use gatekit_agent as agent;
pub use gatekit_core as core;
pub use gatekit_runner as runner;
pub use gatekit_session as session;
pub use gatekit_tool as tool;
pub use gatekit_workflow as workflow;
