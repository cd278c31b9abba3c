//! Color theme and styling definitions using ratatui colors.

use ratatui::style::{Color, Modifier, Style};

/// Color theme for the calculator surface
#[derive(Debug, Clone)]
pub struct ColorTheme {
    /// Expression field text
    pub expression: Style,

    /// Border of the surface that currently has focus
    pub focused_border: Style,

    /// Border of unfocused surfaces
    pub border: Style,

    /// Error slot text
    pub error_text: Style,

    /// Keypad button labels
    pub button: Style,

    /// Command buttons (AC, DEL, =, TEST)
    pub command_button: Style,

    /// Status line text (diagnostics)
    pub status: Style,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            expression: Style::default().add_modifier(Modifier::BOLD),
            focused_border: Style::default().fg(Color::Cyan),
            border: Style::default().fg(Color::DarkGray),
            error_text: Style::default().fg(Color::Red),
            button: Style::default(),
            command_button: Style::default().fg(Color::Yellow),
            status: Style::default().fg(Color::DarkGray),
        }
    }
}
