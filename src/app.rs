//! Application orchestration layer
//!
//! Wires the input thread, the evaluator worker, and the renderer together
//! and runs the main event loop. State lives in `ViewState`/`SessionState`;
//! this module only moves messages between them.

use crate::error::Result;
use crate::eval::{eval_worker_loop, EvaluatorService};
use crate::input::{spawn_input_thread, InputAction};
use crate::render::protocol::{EvalCommand, EvalResponse};
use crate::render::ui::{UIRenderer, ViewState};
use crate::render::SessionState;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);
const EVAL_CHANNEL_CAPACITY: usize = 16;

/// Application orchestrator - coordinates components without duplicating their state
pub struct Application {
    evaluator: Arc<dyn EvaluatorService>,
    ui_renderer: Box<dyn UIRenderer>,
}

impl Application {
    pub fn new(evaluator: Arc<dyn EvaluatorService>, ui_renderer: Box<dyn UIRenderer>) -> Self {
        Self {
            evaluator,
            ui_renderer,
        }
    }

    /// Run the application until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        self.ui_renderer.initialize()?;
        let result = self.run_loop().await;
        // Terminal restoration must happen even when the loop fails.
        let cleanup = self.ui_renderer.cleanup();
        result.and(cleanup)
    }

    async fn run_loop(&mut self) -> Result<()> {
        let (width, height) = self.ui_renderer.get_terminal_size()?;
        let mut view_state = ViewState::new(width, height);
        let mut session = SessionState::new();

        let (eval_tx, eval_rx) = mpsc::channel(EVAL_CHANNEL_CAPACITY);
        let (resp_tx, mut resp_rx) = mpsc::channel::<EvalResponse>(EVAL_CHANNEL_CAPACITY);
        let worker = tokio::spawn(eval_worker_loop(
            eval_rx,
            resp_tx,
            Arc::clone(&self.evaluator),
        ));

        let (input_tx, mut input_rx) = mpsc::unbounded_channel::<InputAction>();
        let shutdown = Arc::new(AtomicBool::new(false));
        let input_thread =
            spawn_input_thread(input_tx, Arc::clone(&shutdown), INPUT_POLL_INTERVAL);

        self.ui_renderer.render(&view_state)?;

        let loop_result = async {
            let mut running = true;
            while running {
                tokio::select! {
                    Some(action) = input_rx.recv() => {
                        running = session
                            .process_action(action, &mut view_state, &eval_tx)
                            .await?;
                    }
                    Some(response) = resp_rx.recv() => {
                        session.handle_response(response, &mut view_state);
                    }
                    else => break,
                }
                self.ui_renderer.render(&view_state)?;
            }
            Ok(())
        }
        .await;

        shutdown.store(true, Ordering::SeqCst);
        let _ = eval_tx.send(EvalCommand::Shutdown).await;
        let _ = worker.await;
        if input_thread.join().is_err() {
            log::warn!("input thread panicked during shutdown");
        }

        loop_result
    }
}
