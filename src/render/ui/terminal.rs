//! Terminal UI implementation using ratatui.
//!
//! Concrete `UIRenderer` backed by ratatui/crossterm. Drawing reuses the
//! geometry from `ViewState::layout` and `ButtonGrid::cells`, so what is on
//! screen is exactly what click hit-testing resolves against.

use crate::error::{Result, TcalcError};
use crate::input::ButtonAction;
use crate::render::ui::{ColorTheme, UIRenderer, ViewState};
use crate::render::ui::state::Focus;
use ratatui::crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Alignment,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io::{self, Stdout};

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Terminal UI implementation with ratatui backend
pub struct TerminalUI {
    terminal: Option<CrosstermTerminal>,
    theme: ColorTheme,
}

impl TerminalUI {
    pub fn new() -> Result<Self> {
        Ok(Self {
            terminal: None,
            theme: ColorTheme::default(),
        })
    }

    fn draw_frame(frame: &mut Frame, view_state: &ViewState, theme: &ColorTheme) {
        let layout = view_state.layout();

        let expression_border = if view_state.focus == Focus::Expression {
            theme.focused_border
        } else {
            theme.border
        };
        let expression = Paragraph::new(view_state.expression.as_str())
            .style(theme.expression)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(expression_border)
                    .title("expression"),
            );
        frame.render_widget(expression, layout.expression);

        let error_text = view_state.error.as_deref().unwrap_or("");
        let error = Paragraph::new(error_text).style(theme.error_text);
        frame.render_widget(error, layout.error);

        for (cell, button) in view_state.grid.cells(layout.keypad) {
            let style = match button.action {
                ButtonAction::Append(_) => theme.button,
                _ => theme.command_button,
            };
            let border = if view_state.focus == Focus::Keypad {
                theme.focused_border
            } else {
                theme.border
            };
            let widget = Paragraph::new(Line::from(button.label))
                .alignment(Alignment::Center)
                .style(style)
                .block(Block::default().borders(Borders::ALL).border_style(border));
            frame.render_widget(widget, cell);
        }

        let status_text = view_state.diagnostic.as_deref().unwrap_or("");
        let status = Paragraph::new(status_text).style(theme.status);
        frame.render_widget(status, layout.status);
    }
}

impl UIRenderer for TerminalUI {
    fn render(&mut self, view_state: &ViewState) -> Result<()> {
        let terminal = self
            .terminal
            .as_mut()
            .ok_or_else(|| TcalcError::ui("renderer not initialized"))?;
        let theme = &self.theme;
        terminal
            .draw(|frame| Self::draw_frame(frame, view_state, theme))
            .map_err(|err| TcalcError::ui(format!("draw failed: {}", err)))?;
        Ok(())
    }

    fn initialize(&mut self) -> Result<()> {
        enable_raw_mode().map_err(|err| TcalcError::ui(format!("raw mode failed: {}", err)))?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .map_err(|err| TcalcError::ui(format!("terminal setup failed: {}", err)))?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))
            .map_err(|err| TcalcError::ui(format!("terminal init failed: {}", err)))?;
        self.terminal = Some(terminal);
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        if let Some(mut terminal) = self.terminal.take() {
            disable_raw_mode()
                .map_err(|err| TcalcError::ui(format!("raw mode restore failed: {}", err)))?;
            execute!(
                terminal.backend_mut(),
                LeaveAlternateScreen,
                DisableMouseCapture
            )
            .map_err(|err| TcalcError::ui(format!("terminal restore failed: {}", err)))?;
            terminal
                .show_cursor()
                .map_err(|err| TcalcError::ui(format!("cursor restore failed: {}", err)))?;
        }
        Ok(())
    }

    fn get_terminal_size(&self) -> Result<(u16, u16)> {
        let (width, height) = ratatui::crossterm::terminal::size()
            .map_err(|err| TcalcError::ui(format!("terminal size unavailable: {}", err)))?;
        Ok((width, height))
    }
}
