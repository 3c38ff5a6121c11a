//! # gatekit-agent
//!
//! Agent implementations for gatekit.
//!
//! [`GateAgent`] is a deterministic, resumable executor of one gated tool
//! call per turn. It implements the agent side of the pause/resume
//! protocol: emit a confirmation-request event and end the turn when the
//! gate pauses, then finish the call on the resumed turn with the decision
//! attached.

mod gate_agent;

pub use gate_agent::{GateAgent, GateAgentBuilder};
