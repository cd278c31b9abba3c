//! Background worker that performs evaluator calls off the UI path.

use crate::eval::{EvalOutcome, EvaluatorService};
use crate::render::protocol::{EvalCommand, EvalResponse};
use std::sync::Arc;
use tokio::sync::mpsc::{Receiver, Sender};

/// Run the evaluator worker, processing commands from the session loop.
///
/// Requests are handled one at a time in arrival order. The worker never
/// decides what a response means for the UI; it classifies the text and sends
/// it back tagged with the originating request id, so the session loop can
/// discard responses that newer submissions have superseded.
pub async fn eval_worker_loop(
    mut rx: Receiver<EvalCommand>,
    tx: Sender<EvalResponse>,
    evaluator: Arc<dyn EvaluatorService>,
) {
    while let Some(cmd) = rx.recv().await {
        let response = match cmd {
            EvalCommand::Evaluate {
                request_id,
                expression,
            } => {
                log::debug!("evaluating request {}: {:?}", request_id, expression);
                match evaluator.process(&expression).await {
                    Ok(text) => EvalResponse::Completed {
                        request_id,
                        outcome: EvalOutcome::classify(text),
                    },
                    Err(error) => EvalResponse::Failed { request_id, error },
                }
            }
            EvalCommand::Probe { request_id } => match evaluator.test().await {
                Ok(report) => EvalResponse::ProbeCompleted { request_id, report },
                Err(error) => EvalResponse::Failed { request_id, error },
            },
            EvalCommand::Shutdown => break,
        };

        if tx.send(response).await.is_err() {
            break;
        }
    }
}
