//! High-level input service.
//!
//! Consumes raw events, runs the whitelist-gated input state machine, and
//! yields domain-level `InputAction`s that the session loop consumes. Every
//! raw event is routed through exactly one path, so a single keystroke can
//! never produce two buffer mutations.

use crate::error::Result;
use crate::input::raw::{RawInputCollector, RawInputEvent};
use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use regex::Regex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// Whitelist of characters allowed into the expression buffer via keystroke.
const WHITELIST_PATTERN: &str = r"\A[0-9/*\-+()^!]\z";

/// High-level input actions emitted by the state machine/service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    /// Append a whitelist-approved character to the expression buffer.
    AppendChar(char),
    /// Remove the last character of the expression buffer.
    DeleteLast,
    /// Submit the buffer for evaluation.
    Submit,
    /// Pointer press at terminal coordinates; resolved against the keypad by
    /// the session loop, which knows the current layout.
    Click { column: u16, row: u16 },
    /// Move focus between the expression field and the keypad surface.
    ToggleFocus,
    Quit,
    Resize { width: u16, height: u16 },
    NoAction,
    InvalidInput,
}

/// State machine that merges keyboard input into calculator actions.
///
/// Keystroke filtering is exactly one regex test against the single incoming
/// character; anything held with Control or Alt is rejected outright.
pub struct InputStateMachine {
    whitelist: Regex,
}

impl InputStateMachine {
    pub fn new() -> Self {
        Self {
            // The pattern is a compile-time constant, so construction cannot fail.
            whitelist: Regex::new(WHITELIST_PATTERN).expect("whitelist pattern is valid"),
        }
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> InputAction {
        if key_event.kind != KeyEventKind::Press {
            return InputAction::NoAction;
        }

        match (key_event.code, key_event.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => InputAction::Quit,
            (KeyCode::Esc, _) => InputAction::Quit,
            (KeyCode::Enter, _) => InputAction::Submit,
            (KeyCode::Backspace, _) => InputAction::DeleteLast,
            (KeyCode::Tab, _) => InputAction::ToggleFocus,
            (KeyCode::Char('='), modifiers)
                if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                InputAction::Submit
            }
            (KeyCode::Char(ch), modifiers)
                if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                    && self.is_allowed(ch) =>
            {
                InputAction::AppendChar(ch)
            }
            _ => InputAction::InvalidInput,
        }
    }

    /// One regex test against the single incoming character.
    fn is_allowed(&self, ch: char) -> bool {
        let mut buf = [0u8; 4];
        self.whitelist.is_match(ch.encode_utf8(&mut buf))
    }
}

impl Default for InputStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// Service responsible for producing high-level `InputAction`s from terminal events.
pub struct InputService {
    state_machine: InputStateMachine,
    raw_input: RawInputCollector,
}

impl InputService {
    pub fn new() -> Self {
        Self {
            state_machine: InputStateMachine::new(),
            raw_input: RawInputCollector::new(),
        }
    }

    pub fn poll_action(&mut self, timeout: Option<Duration>) -> Result<Option<InputAction>> {
        match self.raw_input.poll_event(timeout)? {
            Some(raw_event) => Ok(self.process_raw_event(raw_event)),
            None => Ok(None),
        }
    }

    /// Feed a synthetic terminal event through the full pipeline (test hook).
    pub fn process_event(&mut self, event: Event) -> Option<InputAction> {
        self.raw_input.process_event(event);
        let raw_event = self.raw_input.pop_pending()?;
        self.process_raw_event(raw_event)
    }

    fn process_raw_event(&mut self, event: RawInputEvent) -> Option<InputAction> {
        let action = match event {
            RawInputEvent::Key(key_event) => self.state_machine.handle_key_event(key_event),
            RawInputEvent::Click { column, row } => InputAction::Click { column, row },
            RawInputEvent::Resize { width, height } => InputAction::Resize { width, height },
        };

        match action {
            InputAction::NoAction | InputAction::InvalidInput => None,
            _ => Some(action),
        }
    }
}

impl Default for InputService {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawn a blocking thread that polls for terminal events and forwards actions to the session loop.
pub fn spawn_input_thread(
    tx: UnboundedSender<InputAction>,
    shutdown: Arc<AtomicBool>,
    poll_interval: Duration,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mut service = InputService::new();
        while !shutdown.load(Ordering::SeqCst) {
            match service.poll_action(Some(poll_interval)) {
                Ok(Some(action)) => {
                    if tx.send(action).is_err() {
                        break;
                    }
                }
                Ok(None) => continue,
                Err(err) => {
                    log::error!("input thread error: {}", err);
                    break;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use ratatui::crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn key_with(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    const WHITELIST: &str = "0123456789+-*/()^!";

    #[test]
    fn whitelisted_characters_append() {
        let mut sm = InputStateMachine::new();
        for ch in WHITELIST.chars() {
            assert_eq!(
                sm.handle_key_event(key(KeyCode::Char(ch))),
                InputAction::AppendChar(ch),
                "expected {ch:?} to append"
            );
        }
    }

    #[test]
    fn non_whitelisted_characters_are_rejected() {
        let mut sm = InputStateMachine::new();
        for ch in ['a', 'Z', '.', ' ', '%', '&', 'é'] {
            assert_eq!(
                sm.handle_key_event(key(KeyCode::Char(ch))),
                InputAction::InvalidInput,
                "expected {ch:?} to be rejected"
            );
        }
    }

    #[test]
    fn modifier_keystrokes_are_rejected() {
        let mut sm = InputStateMachine::new();
        assert_eq!(
            sm.handle_key_event(key_with(KeyCode::Char('7'), KeyModifiers::CONTROL)),
            InputAction::InvalidInput
        );
        assert_eq!(
            sm.handle_key_event(key_with(KeyCode::Char('+'), KeyModifiers::ALT)),
            InputAction::InvalidInput
        );
        assert_eq!(
            sm.handle_key_event(key_with(
                KeyCode::Char('='),
                KeyModifiers::CONTROL | KeyModifiers::ALT
            )),
            InputAction::InvalidInput
        );
    }

    #[test]
    fn submission_triggers() {
        let mut sm = InputStateMachine::new();
        assert_eq!(sm.handle_key_event(key(KeyCode::Enter)), InputAction::Submit);
        assert_eq!(
            sm.handle_key_event(key(KeyCode::Char('='))),
            InputAction::Submit
        );
    }

    #[test]
    fn backspace_deletes_and_escape_quits() {
        let mut sm = InputStateMachine::new();
        assert_eq!(
            sm.handle_key_event(key(KeyCode::Backspace)),
            InputAction::DeleteLast
        );
        assert_eq!(sm.handle_key_event(key(KeyCode::Esc)), InputAction::Quit);
        assert_eq!(
            sm.handle_key_event(key_with(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            InputAction::Quit
        );
    }

    #[test]
    fn key_release_events_are_ignored() {
        let mut sm = InputStateMachine::new();
        let mut release = key(KeyCode::Char('7'));
        release.kind = KeyEventKind::Release;
        assert_eq!(sm.handle_key_event(release), InputAction::NoAction);
    }

    #[test]
    fn service_filters_rejected_input() {
        let mut service = InputService::new();
        assert_eq!(
            service.process_event(Event::Key(key(KeyCode::Char('x')))),
            None
        );
        assert_eq!(
            service.process_event(Event::Key(key(KeyCode::Char('3')))),
            Some(InputAction::AppendChar('3'))
        );
    }

    #[test]
    fn each_keystroke_yields_at_most_one_action() {
        let mut service = InputService::new();
        assert_eq!(
            service.process_event(Event::Key(key(KeyCode::Char('7')))),
            Some(InputAction::AppendChar('7'))
        );
        // Nothing left over: the event was consumed by exactly one path.
        assert!(service.raw_input.is_idle());
    }

    #[test]
    fn clicks_pass_through_with_coordinates() {
        let mut service = InputService::new();
        let click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 8,
            row: 9,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(
            service.process_event(click),
            Some(InputAction::Click { column: 8, row: 9 })
        );
    }

    proptest! {
        /// For every possible character, the state machine appends it iff it is
        /// in the whitelist; `=` submits; everything else is rejected.
        #[test]
        fn whitelist_invariant_holds_for_all_chars(ch in any::<char>()) {
            let mut sm = InputStateMachine::new();
            let action = sm.handle_key_event(KeyEvent::new(
                KeyCode::Char(ch),
                KeyModifiers::NONE,
            ));
            if WHITELIST.contains(ch) {
                prop_assert_eq!(action, InputAction::AppendChar(ch));
            } else if ch == '=' {
                prop_assert_eq!(action, InputAction::Submit);
            } else {
                prop_assert_eq!(action, InputAction::InvalidInput);
            }
        }
    }
}
