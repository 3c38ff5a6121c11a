//! # gatekit-session
//!
//! Session management for gatekit workflow runs.
//!
//! A session is an isolated conversation context for exactly one workflow
//! run, addressed by the `(app_name, user_id, session_id)` triple. It is
//! created at workflow start, never reused across runs, and discarded when
//! the run completes (or abandoned; see [`SessionService::delete`]).

pub mod inmemory;
pub mod service;
pub mod session;

pub use inmemory::InMemorySessionService;
pub use service::{CreateRequest, DeleteRequest, GetRequest, SessionService};
pub use session::Session;
