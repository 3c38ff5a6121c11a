//! # gatekit-workflow
//!
//! The approval workflow controller: drives a pausable agent run from the
//! initial query through any number of human-in-the-loop pauses to
//! completion.
//!
//! The run lifecycle is
//!
//! ```text
//! Started -> Running -> {Completed, Paused}
//! Paused -> Resumed -> {Completed, Paused}
//! ```
//!
//! [`ApprovalWorkflow`] exposes the protocol both as primitives
//! (`run_once`, `scan_for_pause`, `decision_message`, `resume`) for callers
//! with their own loops, and as the packaged [`execute`] drive loop fed by
//! a [`DecisionSource`].
//!
//! [`execute`]: ApprovalWorkflow::execute

mod controller;
mod decision;
mod run;

pub use controller::{ApprovalWorkflow, PausePoint};
pub use decision::{AutoDecision, DecisionSource, SequenceDecision};
pub use run::{WorkflowRun, WorkflowState};
