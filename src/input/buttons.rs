//! On-screen keypad definition and hit-testing.
//!
//! Every virtual button carries its action as a tagged enum decoded once when
//! the grid is built, so clicking never re-parses labels or re-validates
//! characters. Append buttons only ever carry whitelisted literals.

use ratatui::layout::Rect;

/// Action baked into a virtual button at grid construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    /// Append a fixed, pre-validated literal character to the expression.
    Append(char),
    /// Remove the last character of the expression.
    DeleteLast,
    /// Empty the expression and the error slot.
    ClearAll,
    /// Submit the expression to the evaluator.
    Submit,
    /// Invoke the evaluator's diagnostic self-test.
    Probe,
}

/// A single keypad button: display label plus its decoded action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Button {
    pub label: &'static str,
    pub action: ButtonAction,
}

impl Button {
    const fn literal(label: &'static str, ch: char) -> Self {
        Self {
            label,
            action: ButtonAction::Append(ch),
        }
    }

    const fn command(label: &'static str, action: ButtonAction) -> Self {
        Self { label, action }
    }
}

/// Fixed keypad layout shared by the renderer and the click hit-test.
///
/// Both sides derive cell geometry from [`ButtonGrid::cells`], so a click on a
/// drawn button always resolves to that button's action.
#[derive(Debug, Clone)]
pub struct ButtonGrid {
    rows: Vec<Vec<Button>>,
}

impl ButtonGrid {
    /// The standard calculator keypad.
    pub fn standard() -> Self {
        Self {
            rows: vec![
                vec![
                    Button::command("AC", ButtonAction::ClearAll),
                    Button::command("DEL", ButtonAction::DeleteLast),
                    Button::literal("^", '^'),
                    Button::literal("!", '!'),
                ],
                vec![
                    Button::literal("(", '('),
                    Button::literal(")", ')'),
                    Button::literal("*", '*'),
                    Button::literal("/", '/'),
                ],
                vec![
                    Button::literal("7", '7'),
                    Button::literal("8", '8'),
                    Button::literal("9", '9'),
                    Button::literal("-", '-'),
                ],
                vec![
                    Button::literal("4", '4'),
                    Button::literal("5", '5'),
                    Button::literal("6", '6'),
                    Button::literal("+", '+'),
                ],
                vec![
                    Button::literal("1", '1'),
                    Button::literal("2", '2'),
                    Button::literal("3", '3'),
                    Button::command("=", ButtonAction::Submit),
                ],
                vec![
                    Button::literal("0", '0'),
                    Button::command("TEST", ButtonAction::Probe),
                ],
            ],
        }
    }

    pub fn rows(&self) -> &[Vec<Button>] {
        &self.rows
    }

    /// Compute the screen cell for every button inside `area`.
    ///
    /// Rows share the area height evenly; each row shares its width evenly
    /// between its buttons. Remainder cells at the right/bottom edges stay
    /// unused rather than stretching the last button.
    pub fn cells(&self, area: Rect) -> Vec<(Rect, Button)> {
        let row_count = self.rows.len() as u16;
        if row_count == 0 || area.width == 0 {
            return Vec::new();
        }
        let cell_height = area.height / row_count;
        if cell_height == 0 {
            return Vec::new();
        }

        let mut cells = Vec::new();
        for (row_index, row) in self.rows.iter().enumerate() {
            let button_count = row.len() as u16;
            if button_count == 0 {
                continue;
            }
            let cell_width = area.width / button_count;
            if cell_width == 0 {
                continue;
            }
            let y = area.y + row_index as u16 * cell_height;
            for (col_index, button) in row.iter().enumerate() {
                let x = area.x + col_index as u16 * cell_width;
                cells.push((Rect::new(x, y, cell_width, cell_height), *button));
            }
        }
        cells
    }

    /// Resolve a click at `(column, row)` against the grid laid out in `area`.
    pub fn hit(&self, area: Rect, column: u16, row: u16) -> Option<ButtonAction> {
        self.cells(area)
            .into_iter()
            .find(|(cell, _)| {
                column >= cell.x
                    && column < cell.x + cell.width
                    && row >= cell.y
                    && row < cell.y + cell.height
            })
            .map(|(_, button)| button.action)
    }
}

impl Default for ButtonGrid {
    fn default() -> Self {
        Self::standard()
    }
}
