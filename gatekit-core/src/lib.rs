//! # gatekit-core
//!
//! Core traits and types for approval-gated agent workflows.
//!
//! ## Overview
//!
//! This crate provides the foundational abstractions for gatekit:
//!
//! - [`Agent`] - The agent-execution collaborator, streaming [`Event`]s
//! - [`GatedTool`] / [`Tool`] - Business operations, gated or plain
//! - [`ConfirmationRequest`] / [`ConfirmationDecision`] - The pause/resume
//!   protocol vocabulary
//! - [`GatekitError`] / [`Result`] - Unified error handling
//! - [`RetryPolicy`] / [`GatekitConfig`] - Caller-supplied policy and
//!   fail-fast configuration
//!
//! ## The pause/resume protocol
//!
//! A gated tool that needs approval makes its turn end with an
//! [`EventKind::ConfirmationRequested`] event. The run is then suspended at
//! a return-to-caller boundary: no task is held open. The caller collects a
//! verdict out of band and resumes the same invocation with a
//! [`ConfirmationDecision`] keyed by the original request identifier.
//! Resuming under the wrong invocation identifier is a protocol violation,
//! not a fresh turn.

pub mod agent;
pub mod config;
pub mod confirmation;
pub mod error;
pub mod event;
pub mod retry;
pub mod tool;
pub mod types;

pub use agent::{Agent, EventStream, InvocationContext};
pub use config::{
    ENV_APP_NAME, ENV_APPROVAL_THRESHOLD, ENV_LOG, ENV_USER_ID, GatekitConfig,
};
pub use confirmation::{
    CONFIRMATION_OP, ConfirmationDecision, ConfirmationRequest, ConfirmationState,
    PENDING_APPROVAL_KEY, PendingApproval,
};
pub use error::{GatekitError, Result};
pub use event::{Event, EventActions, EventKind};
pub use retry::RetryPolicy;
pub use tool::{GateOutcome, GatedTool, Tool};
pub use types::{Content, FunctionResponseData, Part};
