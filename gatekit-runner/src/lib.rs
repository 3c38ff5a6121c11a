//! # gatekit-runner
//!
//! Turn execution runtime for gatekit.
//!
//! ## Overview
//!
//! - [`Runner`] - Executes one agent turn per call against a session
//! - [`TurnContext`] - The per-turn [`gatekit_core::InvocationContext`]
//!
//! The runner owns resume correlation: a paused session accepts only a
//! resume carrying the pending invocation identifier. Anything else is a
//! protocol violation surfaced to the caller, never retried.

mod context;
mod runner;

pub use context::TurnContext;
pub use runner::{Runner, RunnerConfig};
