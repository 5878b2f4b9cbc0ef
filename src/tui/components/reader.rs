//! # Reader Component
//!
//! Full-height view of one item: a rounded header with the title, the body
//! in a scroll view, and a footer with the scroll percentage.
//!
//! ```text
//! ╭ story ──────────────────────────────╮
//! │ Show HN: A thing                    │
//! ╰─────────────────────────────────────╯
//!  body text ...                        ▲
//!                                       █
//! ╭─────────────────────────────────────╮
//! │ 312 points by alice        42%      │
//! ╰─────────────────────────────────────╯
//! ```
//!
//! `ReaderState` persists in `TuiState`; `Reader` is built each frame.
//! The body is laid out at the size the controller last recorded in
//! `App::viewport`, never larger than the space between header and footer.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect, Size};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::state::Viewport;
use crate::feed::Item;
use crate::tui::component::Component;
use crate::tui::components::story_list::meta_line;

pub const HEADER_HEIGHT: u16 = 3;
pub const FOOTER_HEIGHT: u16 = 3;

#[derive(Default)]
pub struct ReaderState {
    pub scroll_state: ScrollViewState,
    /// Content and viewport heights from the last render, for clamping.
    pub content_height: u16,
    pub viewport_height: u16,
}

impl ReaderState {
    pub fn reset(&mut self) {
        self.scroll_state = ScrollViewState::default();
    }

    pub fn scroll_up(&mut self) {
        self.scroll_state.scroll_up();
    }

    pub fn scroll_down(&mut self) {
        self.scroll_state.scroll_down();
        self.clamp_scroll();
    }

    pub fn page_up(&mut self) {
        self.scroll_state.scroll_page_up();
    }

    pub fn page_down(&mut self) {
        self.scroll_state.scroll_page_down();
        self.clamp_scroll();
    }

    fn max_offset(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    /// Keep the offset within the content from the last render.
    pub fn clamp_scroll(&mut self) {
        let current = self.scroll_state.offset();
        let max_y = self.max_offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    pub fn scroll_percent(&self) -> u16 {
        let max_y = self.max_offset();
        if max_y == 0 {
            return 100;
        }
        let y = self.scroll_state.offset().y.min(max_y);
        ((y as u32 * 100) / max_y as u32) as u16
    }
}

pub struct Reader<'a> {
    item: &'a Item,
    article: Option<&'a str>,
    viewport: Viewport,
    now: i64,
    state: &'a mut ReaderState,
}

impl<'a> Reader<'a> {
    pub fn new(
        item: &'a Item,
        article: Option<&'a str>,
        viewport: Viewport,
        now: i64,
        state: &'a mut ReaderState,
    ) -> Self {
        Self {
            item,
            article,
            viewport,
            now,
            state,
        }
    }

    fn body(&self) -> String {
        if let Some(article) = self.article {
            return article.trim_end().to_string();
        }
        let text = self.item.plain_text();
        match (&self.item.url, text.trim().is_empty()) {
            (Some(url), true) => format!("{url}\n\nPress o to extract the linked article."),
            (Some(url), false) => format!("{url}\n\n{}", text.trim()),
            (None, true) => String::from("(no text)"),
            (None, false) => text.trim().to_string(),
        }
    }
}

impl Component for Reader<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [header_area, body_area, footer_area] = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .areas(area);

        let accent = Style::default().fg(Color::Rgb(255, 102, 0));
        let header = Paragraph::new(self.item.display_title().to_string()).block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(accent)
                .title(Span::styled(format!(" {} ", self.item.kind.label()), accent)),
        );
        frame.render_widget(header, header_area);

        // Body
        let body_area = Rect {
            width: self.viewport.width.min(body_area.width),
            height: self.viewport.height.min(body_area.height),
            ..body_area
        };
        let content_width = body_area.width.saturating_sub(1);
        let paragraph = Paragraph::new(self.body()).wrap(Wrap { trim: false });
        let content_height = paragraph.line_count(content_width).min(u16::MAX as usize) as u16;

        let mut scroll_view = ScrollView::new(Size::new(content_width, content_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(paragraph, Rect::new(0, 0, content_width, content_height));

        self.state.content_height = content_height;
        self.state.viewport_height = body_area.height;
        self.state.clamp_scroll();
        frame.render_stateful_widget(scroll_view, body_area, &mut self.state.scroll_state);

        // Footer
        let source = if self.article.is_some() { "article" } else { "item" };
        let footer = Paragraph::new(Line::from(vec![
            Span::styled(meta_line(self.item, self.now), Style::default().fg(Color::DarkGray)),
            Span::raw(format!("  {}  {:>3}%", source, self.state.scroll_percent())),
        ]))
        .block(Block::bordered().border_type(BorderType::Rounded))
        .right_aligned();
        frame.render_widget(footer, footer_area);
    }
}
