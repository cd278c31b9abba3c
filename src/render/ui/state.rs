//! UI state management structures.
//!
//! This module holds the presentation-facing state: the expression buffer,
//! the error slot, the diagnostic slot, and the screen layout used both for
//! drawing and for resolving keypad clicks.

use crate::input::{ButtonAction, ButtonGrid};
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Which surface currently has focus. Affects rendering emphasis only; input
/// routing is exclusive regardless of focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Expression,
    Keypad,
}

/// Screen regions derived from the terminal size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub expression: Rect,
    pub error: Rect,
    pub keypad: Rect,
    pub status: Rect,
}

/// Presentation state for the calculator window.
#[derive(Debug)]
pub struct ViewState {
    /// The single editable expression buffer. Outside of evaluation results,
    /// it only ever contains whitelisted characters.
    pub expression: String,

    /// Latest evaluation error, if any. `None` renders as an empty slot.
    pub error: Option<String>,

    /// Latest diagnostic probe report, shown on the status line.
    pub diagnostic: Option<String>,

    pub focus: Focus,

    /// The on-screen keypad; actions are decoded once at construction.
    pub grid: ButtonGrid,

    pub terminal_width: u16,
    pub terminal_height: u16,
}

impl ViewState {
    pub fn new(terminal_width: u16, terminal_height: u16) -> Self {
        Self {
            expression: String::new(),
            error: None,
            diagnostic: None,
            focus: Focus::Expression,
            grid: ButtonGrid::standard(),
            terminal_width,
            terminal_height,
        }
    }

    /// Append one pre-validated character to the expression buffer.
    pub fn append_char(&mut self, ch: char) {
        self.expression.push(ch);
    }

    /// Remove the last character; no-op on an empty buffer. The error slot is
    /// deliberately left alone, only a full clear empties it.
    pub fn delete_last(&mut self) {
        self.expression.pop();
    }

    /// Empty the expression buffer and the error slot unconditionally.
    pub fn clear_all(&mut self) {
        self.expression.clear();
        self.error = None;
    }

    /// Replace the buffer wholesale with an evaluation result and clear the
    /// error slot. Subsequent edits treat the result as ordinary text.
    pub fn apply_result(&mut self, result: String) {
        self.expression = result;
        self.error = None;
    }

    /// Overwrite the error slot, leaving the expression buffer untouched.
    pub fn set_error(&mut self, message: String) {
        self.error = Some(message);
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Expression => Focus::Keypad,
            Focus::Keypad => Focus::Expression,
        };
    }

    /// Returns true when the size actually changed.
    pub fn update_terminal_size(&mut self, width: u16, height: u16) -> bool {
        if self.terminal_width == width && self.terminal_height == height {
            return false;
        }
        self.terminal_width = width;
        self.terminal_height = height;
        true
    }

    /// Compute the screen regions for the current terminal size. The renderer
    /// and the click hit-test both use this, so they can never disagree.
    pub fn layout(&self) -> ScreenLayout {
        let area = Rect::new(0, 0, self.terminal_width, self.terminal_height);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // expression field (bordered)
                Constraint::Length(1), // error slot
                Constraint::Min(6),    // keypad surface
                Constraint::Length(1), // status / diagnostics
            ])
            .split(area);
        ScreenLayout {
            expression: chunks[0],
            error: chunks[1],
            keypad: chunks[2],
            status: chunks[3],
        }
    }

    /// Resolve a pointer press to a keypad action, updating focus to match
    /// the clicked surface. Clicks that land on neither surface do nothing.
    pub fn resolve_click(&mut self, column: u16, row: u16) -> Option<ButtonAction> {
        let layout = self.layout();
        if contains(layout.expression, column, row) {
            self.focus = Focus::Expression;
            return None;
        }
        let action = self.grid.hit(layout.keypad, column, row);
        if action.is_some() {
            self.focus = Focus::Keypad;
        }
        action
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x + area.width
        && row >= area.y
        && row < area.y + area.height
}
