use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect, Size};
use ratatui::widgets::Paragraph;

use crate::core::state::{App, Mode};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::reader::{FOOTER_HEIGHT, HEADER_HEIGHT};
use crate::tui::components::{Reader, StoryList, TitleBar};

const TITLE_HEIGHT: u16 = 1;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, now: i64) {
    let [title_area, main_area] =
        Layout::vertical([Constraint::Length(TITLE_HEIGHT), Constraint::Min(0)]).areas(frame.area());

    TitleBar::new(app.mode(), app.status_message.clone()).render(frame, title_area);

    match (app.mode(), app.selected_item()) {
        (Mode::Reading, Some(item)) => {
            if app.viewport.ready {
                Reader::new(item, app.selected_article(), app.viewport, now, &mut tui.reader)
                    .render(frame, main_area);
            } else {
                draw_initializing(frame, main_area);
            }
        }
        _ => StoryList::new(app, now).render(frame, main_area),
    }
}

fn draw_initializing(frame: &mut Frame, area: Rect) {
    frame.render_widget(Paragraph::new("\n Initializing reader..."), area);
}

/// Size of the reader body for a terminal of `size`, i.e. what is left after
/// the title bar and the reader's header and footer.
pub fn reader_body_size(size: Size) -> (u16, u16) {
    let chrome = TITLE_HEIGHT + HEADER_HEIGHT + FOOTER_HEIGHT;
    (size.width, size.height.saturating_sub(chrome))
}
