//! Evaluator subsystem.
//!
//! The calculator front-end never parses or computes expressions itself; it
//! hands the raw buffer to an external evaluator and interprets the response
//! string. This module owns that boundary: the [`EvaluatorService`] trait, the
//! response classification rule, the subprocess transport, and the worker loop
//! that keeps evaluation off the UI path.

pub mod service;
pub mod worker;

pub use service::{CommandEvaluator, EvalOutcome, EvaluatorService, ERROR_MARKER};
pub use worker::eval_worker_loop;
