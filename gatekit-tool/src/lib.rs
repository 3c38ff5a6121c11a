//! # gatekit-tool
//!
//! Tool implementations for gatekit agents.
//!
//! - [`BatchGate`] - threshold approval policy for batch requests
//! - [`FunctionGate`] / [`FunctionTool`] - closure-backed gated and plain tools
//! - [`PaymentFeeTool`] / [`ExchangeRateTool`] - lookup tools returning
//!   structured business errors
//! - [`RetryingTool`] - transient-failure retry wrapper

pub mod batch_gate;
pub mod function_gate;
pub mod function_tool;
pub mod lookup;
pub mod retrying;

pub use batch_gate::BatchGate;
pub use function_gate::FunctionGate;
pub use function_tool::FunctionTool;
pub use lookup::{ExchangeRateTool, PaymentFeeTool};
pub use retrying::RetryingTool;
