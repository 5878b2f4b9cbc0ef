//! # TitleBar Component
//!
//! Single-line bar at the top of every frame: app name, current mode, and
//! the controller's status message.
//!
//! Stateless: it receives everything as props and renders a styled `Line`.
//!
//! ```text
//! newsfeed │ best stories │ 42 stories
//! newsfeed │ reading      │ Extracting https://...
//! ```

use crate::core::state::Mode;
use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    pub mode: Mode,
    pub status_message: String,
}

impl TitleBar {
    pub fn new(mode: Mode, status_message: String) -> Self {
        Self {
            mode,
            status_message,
        }
    }

    fn mode_label(&self) -> &'static str {
        match self.mode {
            Mode::Loading => "loading",
            Mode::Listing => "best stories",
            Mode::Reading => "reading",
            Mode::Error => "error",
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let separator = Span::styled(" │ ", Style::default().fg(Color::DarkGray));
        let status_style = if self.mode == Mode::Error {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Gray)
        };

        let mut spans = vec![
            Span::styled(
                "newsfeed",
                Style::default()
                    .fg(Color::Rgb(255, 102, 0))
                    .add_modifier(Modifier::BOLD),
            ),
            separator.clone(),
            Span::raw(self.mode_label()),
        ];
        if !self.status_message.is_empty() {
            spans.push(separator);
            spans.push(Span::styled(self.status_message.clone(), status_style));
        }

        frame.render_widget(Line::from(spans), area);
    }
}
