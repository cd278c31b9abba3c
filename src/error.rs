//! Error types and handling infrastructure for tcalc.
//!
//! This module provides a centralized error handling system using `thiserror` for
//! custom error types and `anyhow` for application-level error handling with context.
//!
//! ## Design Principles
//!
//! - **User-friendly messages**: Errors should provide actionable feedback
//! - **Data over exceptions**: evaluation failures flow through the response
//!   channel as ordinary strings; only transport and terminal failures become
//!   `TcalcError`
//! - **Consistency**: Standardized Result type across all modules

use thiserror::Error;

/// The main error type for tcalc operations.
///
/// This enum covers the failure conditions that can occur while driving the
/// terminal, invoking the external evaluator, or shuttling events between
/// threads. Note that an expression the evaluator rejects is *not* an error
/// at this level; it comes back as an error-tagged response string and lands
/// in the error slot.
#[derive(Error, Debug)]
pub enum TcalcError {
    /// UI and terminal related errors
    #[error("UI operation failed: {message}")]
    UiError { message: String },

    /// Failures invoking the external evaluator (spawn, pipe, decode)
    #[error("Evaluator invocation failed: {message}")]
    EvaluatorError { message: String },

    /// Raw input collection errors (terminal event polling)
    #[error("Input collection failed: {message}")]
    InputError { message: String },

    /// Generic error for cases not covered by specific variants
    #[error("Operation failed: {message}")]
    Other { message: String },
}

/// Standard Result type for tcalc operations.
pub type Result<T> = std::result::Result<T, TcalcError>;

impl TcalcError {
    /// Create a UiError with a descriptive message
    pub fn ui(message: impl Into<String>) -> Self {
        Self::UiError {
            message: message.into(),
        }
    }

    /// Create an EvaluatorError with a descriptive message
    pub fn evaluator(message: impl Into<String>) -> Self {
        Self::EvaluatorError {
            message: message.into(),
        }
    }

    /// Create an InputError with a descriptive message
    pub fn input(message: impl Into<String>) -> Self {
        Self::InputError {
            message: message.into(),
        }
    }

    /// Create a generic Other error with a descriptive message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

// Terminal and pipe IO failures surface while polling events or talking to
// the evaluator subprocess; both are infrastructure errors here.
impl From<std::io::Error> for TcalcError {
    fn from(err: std::io::Error) -> Self {
        Self::InputError {
            message: format!("IO operation failed: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let ui_err = TcalcError::ui("terminal resize failed");
        assert_eq!(ui_err.to_string(), "UI operation failed: terminal resize failed");

        let eval_err = TcalcError::evaluator("process exited with status 1");
        assert_eq!(
            eval_err.to_string(),
            "Evaluator invocation failed: process exited with status 1"
        );
    }

    #[test]
    fn test_error_constructors() {
        let input_err = TcalcError::input("poll failed");
        assert!(matches!(input_err, TcalcError::InputError { .. }));

        let other_err = TcalcError::other("unknown error");
        assert!(matches!(other_err, TcalcError::Other { .. }));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: TcalcError = io_err.into();
        assert!(matches!(err, TcalcError::InputError { .. }));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<String> {
            Ok("success".to_string())
        }

        assert_eq!(returns_result().unwrap(), "success");
    }
}
