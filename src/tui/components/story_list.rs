//! # StoryList Component
//!
//! The paginated ranking. Shows the page that holds the cursor, a dot
//! paginator, and the key help line. When there is nothing to list it falls
//! back to the controller's status message.
//!
//! ```text
//! >   1. Show HN: A thing            312 points by alice 3 hours ago | 88 comments
//!     2. Why X is hard               201 points by bob 5 hours ago | 140 comments
//!   • • • •
//!
//!   j/k ↑/↓ move • h/l ←/→ page • enter read • r refresh • q quit
//! ```
//!
//! Pagination is derived from the cursor (`App::page_bounds`), so the visible
//! page can never disagree with the highlighted row.

use chrono::TimeDelta;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::state::{App, Mode};
use crate::feed::Item;
use crate::tui::component::Component;

/// Past this many pages the dots stop fitting; show "page x/y" instead.
const MAX_DOTS: usize = 20;

/// Marker plus rank column: "> " and "123. ".
const ROW_PREFIX_WIDTH: usize = 7;

/// Below this many title columns the meta is dropped instead.
const MIN_TITLE_WIDTH: usize = 16;

const HELP: &str = "  j/k ↑/↓ move • h/l ←/→ page • enter read • r refresh • q quit";

pub struct StoryList<'a> {
    app: &'a App,
    now: i64,
}

impl<'a> StoryList<'a> {
    pub fn new(app: &'a App, now: i64) -> Self {
        Self { app, now }
    }

    fn row(&self, index: usize, item: &Item, width: usize) -> Line<'static> {
        let is_cursor = index == self.app.cursor;
        let marker = if is_cursor { "> " } else { "  " };
        let title_style = match (is_cursor, item.is_hidden()) {
            (_, true) => Style::default().fg(Color::DarkGray),
            (true, false) => Style::default()
                .fg(Color::Rgb(255, 102, 0))
                .add_modifier(Modifier::BOLD),
            (false, false) => Style::default(),
        };

        let available = width.saturating_sub(ROW_PREFIX_WIDTH);
        let meta = (!item.is_hidden())
            .then(|| format!("  {}", meta_line(item, self.now)))
            .filter(|meta| available.saturating_sub(meta.width()) >= MIN_TITLE_WIDTH);
        let title_width = available.saturating_sub(meta.as_deref().map_or(0, |m| m.width()));

        let mut spans = vec![
            Span::styled(marker, Style::default().fg(Color::Rgb(255, 102, 0))),
            Span::styled(
                format!("{:>3}. ", index + 1),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(truncate(item.display_title(), title_width), title_style),
        ];
        if let Some(meta) = meta {
            spans.push(Span::styled(meta, Style::default().fg(Color::DarkGray)));
        }
        Line::from(spans)
    }

    fn paginator(&self) -> Line<'static> {
        let pages = self.app.total_pages();
        let current = self.app.page();
        if pages > MAX_DOTS {
            return Line::from(format!("  page {}/{}", current + 1, pages));
        }
        let mut spans = vec![Span::raw("  ")];
        for page in 0..pages {
            let color = if page == current {
                Color::Gray
            } else {
                Color::DarkGray
            };
            spans.push(Span::styled("•", Style::default().fg(color)));
            spans.push(Span::raw(" "));
        }
        Line::from(spans)
    }
}

impl Component for StoryList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.app.items.is_empty() {
            let style = if self.app.mode() == Mode::Error {
                Style::default().fg(Color::Red)
            } else {
                Style::default()
            };
            let message = Paragraph::new(format!("\n  {}", self.app.status_message))
                .style(style)
                .wrap(Wrap { trim: false });
            frame.render_widget(message, area);
            return;
        }

        let [list_area, pager_area, help_area] = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(2),
        ])
        .areas(area);

        let (start, end) = self.app.page_bounds();
        let rows: Vec<Line> = self.app.items[start..end]
            .iter()
            .enumerate()
            .map(|(offset, item)| self.row(start + offset, item, list_area.width as usize))
            .collect();

        frame.render_widget(Paragraph::new(rows), list_area);
        frame.render_widget(self.paginator(), pager_area);
        frame.render_widget(
            Paragraph::new(vec![
                Line::raw(""),
                Line::styled(HELP, Style::default().fg(Color::DarkGray)),
            ]),
            help_area,
        );
    }
}

/// "312 points by alice 3 hours ago | 88 comments"
pub fn meta_line(item: &Item, now: i64) -> String {
    let mut meta = format!("{} points by {}", item.score, item.author);
    if item.time > 0 {
        meta.push(' ');
        meta.push_str(&format_age(item.time, now));
    }
    meta.push_str(&format!(" | {} comments", item.descendants));
    meta
}

/// Cut `text` to at most `width` display columns, ending in "…" when cut.
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    if width > 0 {
        out.push('…');
    }
    out
}

pub fn format_age(time: i64, now: i64) -> String {
    let age = TimeDelta::seconds(now.saturating_sub(time).max(0));
    let (n, unit) = if age.num_days() > 0 {
        (age.num_days(), "day")
    } else if age.num_hours() > 0 {
        (age.num_hours(), "hour")
    } else if age.num_minutes() > 0 {
        (age.num_minutes(), "minute")
    } else {
        return String::from("just now");
    };
    let plural = if n == 1 { "" } else { "s" };
    format!("{n} {unit}{plural} ago")
}
