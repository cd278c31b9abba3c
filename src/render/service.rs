//! Session coordination.
//!
//! Provides the state machine that mediates between input actions, evaluator
//! commands, and view updates. The buffer is implicitly in one of two states:
//! *Editing* (partial expression, error slot may be set) and *Evaluated*
//! (buffer holds the last result verbatim). No stored state field is needed;
//! the transitions below behave identically either way, and any edit after a
//! result simply resumes editing.

use crate::error::{Result, TcalcError};
use crate::eval::EvalOutcome;
use crate::input::{ButtonAction, InputAction};
use crate::render::protocol::{EvalCommand, EvalResponse, RequestId};
use crate::render::ui::ViewState;
use tokio::sync::mpsc;

/// Tracks submission bookkeeping that must persist across input actions and
/// worker responses.
///
/// Input stays live while a submission is outstanding; overlapping
/// submissions are allowed and the newest one wins. Responses carry their
/// originating request id, and anything that is not the latest outstanding
/// request is dropped on arrival.
#[derive(Debug, Default)]
pub struct SessionState {
    next_request_id: RequestId,
    latest_submission: Option<RequestId>,
    latest_probe: Option<RequestId>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one input action. Returns `Ok(false)` when the application
    /// should quit.
    pub async fn process_action(
        &mut self,
        action: InputAction,
        view_state: &mut ViewState,
        eval_tx: &mpsc::Sender<EvalCommand>,
    ) -> Result<bool> {
        match action {
            InputAction::Quit => Ok(false),
            InputAction::AppendChar(ch) => {
                view_state.append_char(ch);
                Ok(true)
            }
            InputAction::DeleteLast => {
                view_state.delete_last();
                Ok(true)
            }
            InputAction::Submit => {
                self.submit(view_state, eval_tx).await?;
                Ok(true)
            }
            InputAction::Click { column, row } => {
                match view_state.resolve_click(column, row) {
                    Some(button) => self.apply_button(button, view_state, eval_tx).await,
                    None => Ok(true),
                }
            }
            InputAction::ToggleFocus => {
                view_state.toggle_focus();
                Ok(true)
            }
            InputAction::Resize { width, height } => {
                view_state.update_terminal_size(width, height);
                Ok(true)
            }
            InputAction::NoAction | InputAction::InvalidInput => Ok(true),
        }
    }

    /// Apply a decoded keypad action. Button literals are pre-validated, so
    /// appends need no whitelist re-test here.
    pub async fn apply_button(
        &mut self,
        button: ButtonAction,
        view_state: &mut ViewState,
        eval_tx: &mpsc::Sender<EvalCommand>,
    ) -> Result<bool> {
        match button {
            ButtonAction::Append(ch) => view_state.append_char(ch),
            ButtonAction::DeleteLast => view_state.delete_last(),
            ButtonAction::ClearAll => view_state.clear_all(),
            ButtonAction::Submit => self.submit(view_state, eval_tx).await?,
            ButtonAction::Probe => self.probe(eval_tx).await?,
        }
        Ok(true)
    }

    /// Apply a worker response to the view. Stale responses (superseded by a
    /// newer submission or probe) are ignored entirely.
    pub fn handle_response(&mut self, response: EvalResponse, view_state: &mut ViewState) {
        match response {
            EvalResponse::Completed {
                request_id,
                outcome,
            } => {
                if Some(request_id) != self.latest_submission {
                    log::debug!("dropping superseded evaluation response {}", request_id);
                    return;
                }
                self.latest_submission = None;
                match outcome {
                    EvalOutcome::Value(result) => view_state.apply_result(result),
                    EvalOutcome::Error(message) => view_state.set_error(message),
                }
            }
            EvalResponse::ProbeCompleted { request_id, report } => {
                if Some(request_id) != self.latest_probe {
                    return;
                }
                self.latest_probe = None;
                view_state.diagnostic = Some(report);
            }
            EvalResponse::Failed { request_id, error } => {
                if Some(request_id) == self.latest_submission {
                    self.latest_submission = None;
                    view_state.set_error(error.to_string());
                } else if Some(request_id) == self.latest_probe {
                    self.latest_probe = None;
                    view_state.diagnostic = Some(error.to_string());
                }
            }
        }
    }

    async fn submit(
        &mut self,
        view_state: &ViewState,
        eval_tx: &mpsc::Sender<EvalCommand>,
    ) -> Result<()> {
        let request_id = self.allocate_request_id();
        self.latest_submission = Some(request_id);
        eval_tx
            .send(EvalCommand::Evaluate {
                request_id,
                expression: view_state.expression.clone(),
            })
            .await
            .map_err(|_| TcalcError::other("evaluator worker unavailable"))
    }

    async fn probe(&mut self, eval_tx: &mpsc::Sender<EvalCommand>) -> Result<()> {
        let request_id = self.allocate_request_id();
        self.latest_probe = Some(request_id);
        eval_tx
            .send(EvalCommand::Probe { request_id })
            .await
            .map_err(|_| TcalcError::other("evaluator worker unavailable"))
    }

    fn allocate_request_id(&mut self) -> RequestId {
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        request_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn channel() -> (mpsc::Sender<EvalCommand>, mpsc::Receiver<EvalCommand>) {
        mpsc::channel(8)
    }

    fn view() -> ViewState {
        ViewState::new(44, 20)
    }

    async fn type_str(session: &mut SessionState, view: &mut ViewState, input: &str) {
        let (tx, _rx) = channel();
        for ch in input.chars() {
            session
                .process_action(InputAction::AppendChar(ch), view, &tx)
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn appends_accumulate_in_order() {
        let mut session = SessionState::new();
        let mut view = view();
        type_str(&mut session, &mut view, "12+3").await;
        assert_eq!(view.expression, "12+3");
    }

    #[tokio::test]
    async fn button_and_key_appends_are_equivalent() {
        let (tx, _rx) = channel();
        let mut session = SessionState::new();

        let mut via_key = view();
        session
            .process_action(InputAction::AppendChar('7'), &mut via_key, &tx)
            .await
            .unwrap();

        let mut via_button = view();
        session
            .apply_button(ButtonAction::Append('7'), &mut via_button, &tx)
            .await
            .unwrap();

        assert_eq!(via_key.expression, via_button.expression);
    }

    #[tokio::test]
    async fn delete_from_empty_buffer_is_noop() {
        let (tx, _rx) = channel();
        let mut session = SessionState::new();
        let mut view = view();
        session
            .process_action(InputAction::DeleteLast, &mut view, &tx)
            .await
            .unwrap();
        assert_eq!(view.expression, "");
        assert_eq!(view.error, None);
    }

    #[tokio::test]
    async fn clear_button_resets_buffer_and_error() {
        let (tx, _rx) = channel();
        let mut session = SessionState::new();
        let mut view = view();
        type_str(&mut session, &mut view, "12+3").await;
        view.set_error("error: bad token".to_string());

        session
            .apply_button(ButtonAction::ClearAll, &mut view, &tx)
            .await
            .unwrap();
        assert_eq!(view.expression, "");
        assert_eq!(view.error, None);
    }

    #[tokio::test]
    async fn submit_sends_buffer_exactly_once() {
        let (tx, mut rx) = channel();
        let mut session = SessionState::new();
        let mut view = view();
        type_str(&mut session, &mut view, "2+2").await;

        session
            .process_action(InputAction::Submit, &mut view, &tx)
            .await
            .unwrap();

        match rx.try_recv().unwrap() {
            EvalCommand::Evaluate { expression, .. } => assert_eq!(expression, "2+2"),
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(rx.try_recv().is_err(), "exactly one command per trigger");
        // Submission does not block editing: the buffer stays as typed.
        assert_eq!(view.expression, "2+2");
    }

    #[tokio::test]
    async fn success_response_replaces_buffer_and_clears_error() {
        let (tx, mut rx) = channel();
        let mut session = SessionState::new();
        let mut view = view();
        type_str(&mut session, &mut view, "2+2").await;
        view.set_error("old error".to_string());

        session
            .process_action(InputAction::Submit, &mut view, &tx)
            .await
            .unwrap();
        let request_id = match rx.try_recv().unwrap() {
            EvalCommand::Evaluate { request_id, .. } => request_id,
            other => panic!("unexpected command: {other:?}"),
        };

        session.handle_response(
            EvalResponse::Completed {
                request_id,
                outcome: EvalOutcome::Value("4".to_string()),
            },
            &mut view,
        );
        assert_eq!(view.expression, "4");
        assert_eq!(view.error, None);
    }

    #[tokio::test]
    async fn error_response_preserves_buffer() {
        let (tx, mut rx) = channel();
        let mut session = SessionState::new();
        let mut view = view();
        type_str(&mut session, &mut view, "2+").await;

        session
            .process_action(InputAction::Submit, &mut view, &tx)
            .await
            .unwrap();
        let request_id = match rx.try_recv().unwrap() {
            EvalCommand::Evaluate { request_id, .. } => request_id,
            other => panic!("unexpected command: {other:?}"),
        };

        session.handle_response(
            EvalResponse::Completed {
                request_id,
                outcome: EvalOutcome::Error("error: unexpected end of input".to_string()),
            },
            &mut view,
        );
        assert_eq!(view.expression, "2+");
        assert_eq!(
            view.error.as_deref(),
            Some("error: unexpected end of input")
        );
    }

    #[tokio::test]
    async fn superseded_response_is_dropped() {
        let (tx, mut rx) = channel();
        let mut session = SessionState::new();
        let mut view = view();
        type_str(&mut session, &mut view, "1+1").await;

        session
            .process_action(InputAction::Submit, &mut view, &tx)
            .await
            .unwrap();
        let first_id = match rx.try_recv().unwrap() {
            EvalCommand::Evaluate { request_id, .. } => request_id,
            other => panic!("unexpected command: {other:?}"),
        };

        // User keeps editing and submits again before the first response lands.
        type_str(&mut session, &mut view, "+1").await;
        session
            .process_action(InputAction::Submit, &mut view, &tx)
            .await
            .unwrap();
        let second_id = match rx.try_recv().unwrap() {
            EvalCommand::Evaluate { request_id, .. } => request_id,
            other => panic!("unexpected command: {other:?}"),
        };

        // The stale first response must not clobber the buffer.
        session.handle_response(
            EvalResponse::Completed {
                request_id: first_id,
                outcome: EvalOutcome::Value("2".to_string()),
            },
            &mut view,
        );
        assert_eq!(view.expression, "1+1+1");

        session.handle_response(
            EvalResponse::Completed {
                request_id: second_id,
                outcome: EvalOutcome::Value("3".to_string()),
            },
            &mut view,
        );
        assert_eq!(view.expression, "3");
    }

    #[tokio::test]
    async fn probe_report_lands_in_diagnostic_slot() {
        let (tx, mut rx) = channel();
        let mut session = SessionState::new();
        let mut view = view();
        type_str(&mut session, &mut view, "5!").await;

        session
            .apply_button(ButtonAction::Probe, &mut view, &tx)
            .await
            .unwrap();
        let request_id = match rx.try_recv().unwrap() {
            EvalCommand::Probe { request_id } => request_id,
            other => panic!("unexpected command: {other:?}"),
        };

        session.handle_response(
            EvalResponse::ProbeCompleted {
                request_id,
                report: "[]".to_string(),
            },
            &mut view,
        );
        assert_eq!(view.diagnostic.as_deref(), Some("[]"));
        // Probing never touches the buffer or the error slot.
        assert_eq!(view.expression, "5!");
        assert_eq!(view.error, None);
    }

    #[tokio::test]
    async fn transport_failure_surfaces_in_error_slot() {
        let (tx, mut rx) = channel();
        let mut session = SessionState::new();
        let mut view = view();
        type_str(&mut session, &mut view, "3!").await;

        session
            .process_action(InputAction::Submit, &mut view, &tx)
            .await
            .unwrap();
        let request_id = match rx.try_recv().unwrap() {
            EvalCommand::Evaluate { request_id, .. } => request_id,
            other => panic!("unexpected command: {other:?}"),
        };

        session.handle_response(
            EvalResponse::Failed {
                request_id,
                error: TcalcError::evaluator("failed to spawn evaluator"),
            },
            &mut view,
        );
        assert_eq!(view.expression, "3!");
        assert!(view.error.as_deref().unwrap().contains("failed to spawn"));
    }

    #[tokio::test]
    async fn keypad_click_appends_via_hit_test() {
        let (tx, _rx) = channel();
        let mut session = SessionState::new();
        let mut view = view();
        let keypad = view.layout().keypad;

        // Third keypad row starts with the 7 key.
        let cell_height = keypad.height / view.grid.rows().len() as u16;
        let column = keypad.x;
        let row = keypad.y + 2 * cell_height;
        session
            .process_action(InputAction::Click { column, row }, &mut view, &tx)
            .await
            .unwrap();
        assert_eq!(view.expression, "7");
    }
}
