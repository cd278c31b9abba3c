//! Protocol definitions shared between the session loop and the evaluator worker.

use crate::error::TcalcError;
use crate::eval::EvalOutcome;

/// Identifier attached to submissions so responses can be correlated.
pub type RequestId = u64;

/// Commands sent from the session loop to the evaluator worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalCommand {
    /// Evaluate the expression exactly once.
    Evaluate {
        request_id: RequestId,
        expression: String,
    },
    /// Run the evaluator's diagnostic self-test.
    Probe { request_id: RequestId },
    Shutdown,
}

/// Responses emitted by the evaluator worker back to the session loop.
#[derive(Debug)]
pub enum EvalResponse {
    /// Evaluation finished; the response string has already been classified.
    Completed {
        request_id: RequestId,
        outcome: EvalOutcome,
    },
    /// Diagnostic report, routed to a display slot and never interpreted.
    ProbeCompleted {
        request_id: RequestId,
        report: String,
    },
    /// Transport-level failure reaching the evaluator.
    Failed {
        request_id: RequestId,
        error: TcalcError,
    },
}
