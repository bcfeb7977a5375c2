//! # StatusBar Component
//!
//! Bottom line showing which backend answers and what the app is doing.
//!
//! Purely presentational: every field is a prop, there is no internal state.
//!
//! ## Conditional Formatting
//!
//! 1. **Status message**: `"SmartIA (backend: remote) | Digitando... | Esc sair"`
//! 2. **Default**: `"SmartIA (backend: remote) | Esc sair"`

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Span;

use crate::tui::component::Component;

const QUIT_HINT: &str = "Esc sair";

/// Single-line status bar.
///
/// # Props
///
/// - `backend_name`: which `SimulateBackend` serves the replies
/// - `status_message`: transient status from the core state (may be empty)
pub struct StatusBar<'a> {
    pub backend_name: &'a str,
    pub status_message: &'a str,
}

impl<'a> StatusBar<'a> {
    pub fn new(backend_name: &'a str, status_message: &'a str) -> Self {
        Self {
            backend_name,
            status_message,
        }
    }

    fn text(&self) -> String {
        if self.status_message.is_empty() {
            format!("SmartIA (backend: {}) | {}", self.backend_name, QUIT_HINT)
        } else {
            format!(
                "SmartIA (backend: {}) | {} | {}",
                self.backend_name, self.status_message, QUIT_HINT
            )
        }
    }
}

impl Component for StatusBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(
            Span::styled(self.text(), Style::default().fg(Color::DarkGray)),
            area,
        );
    }
}
