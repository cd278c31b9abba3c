//! Input subsystem.
//!
//! Collects raw terminal events, decodes the on-screen keypad, and runs the
//! whitelist-gated state machine that turns keystrokes and clicks into
//! domain-level [`InputAction`]s.

pub mod buttons;
pub mod raw;
pub mod service;

// Public re-exports for convenience. Modules outside this crate should prefer importing
// from `crate::input` rather than reaching into submodules.
pub use buttons::{Button, ButtonAction, ButtonGrid};
pub use service::{spawn_input_thread, InputAction, InputService, InputStateMachine};
