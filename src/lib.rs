//! # tcalc - Terminal Calculator Front-End
//!
//! A terminal calculator front-end that merges two independent input sources
//! (the physical keyboard and an on-screen keypad) into one consistent
//! expression buffer and submits it to an external evaluator on demand.
//!
//! ## Features
//!
//! - **Dual input sources**: keyboard and mouse-driven keypad feed one buffer
//!   through a single exclusive router
//! - **Whitelist filtering**: one regex test per incoming character; modifier
//!   combinations and non-whitelisted keys never touch the buffer
//! - **External evaluation**: expressions are computed by a separate
//!   evaluator process; results and error text flow back as plain strings
//! - **Non-blocking submission**: editing stays live while a request is in
//!   flight; superseded responses are discarded by request id
//!
//! ## Architecture
//!
//! The library is organized into focused modules:
//!
//! - [`error`] - Centralized error types and handling
//! - [`input`] - Raw event collection, keypad decoding, and the input state machine
//! - [`eval`] - Evaluator service boundary and background worker
//! - [`render`] - Session state machine and terminal user interface
//! - [`app`] - Application core and component coordination

// Core modules
pub mod error;

// Subsystems
pub mod eval;
pub mod input;
pub mod render;

// Core components
pub mod app;

// Re-export commonly used types for convenience
pub use error::{Result, TcalcError};

// Public API surface for external usage
pub use app::Application;
pub use eval::{CommandEvaluator, EvalOutcome, EvaluatorService};
pub use input::{ButtonAction, ButtonGrid, InputAction};
pub use render::SessionState;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
