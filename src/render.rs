//! Rendering and session-coordination subsystem.

pub mod protocol;
pub mod service;
pub mod ui;

pub use protocol::{EvalCommand, EvalResponse, RequestId};
pub use service::SessionState;
