//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI, and
//! translates keyboard events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! One iteration:
//!
//! 1. Draw if anything changed since the last frame.
//! 2. Poll terminal input (up to 100ms), then drain everything pending.
//!    Each event is mapped to an action for the current mode and folded
//!    through `update()` before the next one is looked at.
//! 3. Drain the scheduler channel the same way.
//!
//! Effects returned by `update()` are dispatched immediately: fetches go to
//! the scheduler (never awaited here), viewport queries are answered from
//! the terminal size, and `Quit` ends the loop.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::sync::mpsc::{self, Sender};
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::DefaultTerminal;
use ratatui::layout::Size;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::{App, Mode};
use crate::scheduler::Scheduler;
use crate::tui::components::ReaderState;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
#[derive(Default)]
pub struct TuiState {
    pub reader: ReaderState,
}

impl TuiState {
    pub fn new() -> Self {
        Self::default()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture)?;
        info!("Terminal modes enabled (mouse)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let scheduler = Scheduler::from_config(&config).map_err(std::io::Error::other)?;
    let mut app = App::from_config(&config);

    let mut terminal = ratatui::init();
    let result = TerminalModeGuard::new()
        .and_then(|_guard| event_loop(&mut terminal, &mut app, &scheduler));
    ratatui::restore();

    info!("Quitting");
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    app: &mut App,
    scheduler: &Scheduler,
) -> std::io::Result<()> {
    let mut tui = TuiState::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let mut should_quit = dispatch(app, &mut tui, scheduler, &tx, terminal.size()?, Action::Init);
    let mut needs_redraw = true;

    while !should_quit {
        if needs_redraw {
            let now = chrono::Utc::now().timestamp();
            terminal.draw(|f| ui::draw_ui(f, app, &mut tui, now))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(Duration::from_millis(100));
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            needs_redraw = true;
            if let Some(action) = to_action(app, &mut tui, event)
                && dispatch(app, &mut tui, scheduler, &tx, terminal.size()?, action)
            {
                should_quit = true;
                break;
            }
        }

        // Results from scheduled effects
        while !should_quit && let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            should_quit = dispatch(app, &mut tui, scheduler, &tx, terminal.size()?, action);
        }
    }

    Ok(())
}

/// Fold one action into the app and carry out its effect.
/// Returns true when the loop should stop.
fn dispatch(
    app: &mut App,
    tui: &mut TuiState,
    scheduler: &Scheduler,
    tx: &Sender<Action>,
    terminal_size: Size,
    action: Action,
) -> bool {
    debug!("Event loop received: {:?}", ActionName(&action));
    match update(app, action) {
        Effect::None => false,
        Effect::Quit => true,
        Effect::Fetch(request) => {
            scheduler.spawn(request, tx.clone());
            false
        }
        Effect::QueryViewport => {
            tui.reader.reset();
            let (width, height) = ui::reader_body_size(terminal_size);
            update(app, Action::ViewportResized { width, height }) == Effect::Quit
        }
    }
}

/// Map an input event to an action for the current mode. Reader scrolling
/// is presentation state and is handled here without an action.
fn to_action(app: &App, tui: &mut TuiState, event: TuiEvent) -> Option<Action> {
    if event == TuiEvent::Quit {
        return Some(Action::Quit);
    }
    if let TuiEvent::Resize(width, height) = event {
        let (width, height) = ui::reader_body_size(Size::new(width, height));
        return Some(Action::ViewportResized { width, height });
    }

    if app.mode() == Mode::Reading {
        match event {
            TuiEvent::Up => tui.reader.scroll_up(),
            TuiEvent::Down => tui.reader.scroll_down(),
            TuiEvent::PageUp => tui.reader.page_up(),
            TuiEvent::PageDown => tui.reader.page_down(),
            TuiEvent::Back => return Some(Action::Deselect),
            TuiEvent::Extract => return Some(Action::ExtractContent),
            TuiEvent::Refresh => return Some(Action::Init),
            _ => {}
        }
        return None;
    }

    match event {
        TuiEvent::Up => Some(Action::CursorUp),
        TuiEvent::Down => Some(Action::CursorDown),
        TuiEvent::PageUp => Some(Action::PrevPage),
        TuiEvent::PageDown => Some(Action::NextPage),
        TuiEvent::Enter => Some(Action::Select),
        TuiEvent::Refresh => Some(Action::Init),
        _ => None,
    }
}

/// Variant name only; payloads can be hundreds of items.
struct ActionName<'a>(&'a Action);

impl std::fmt::Debug for ActionName<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Action::IdentifierBatchReceived(ids) => write!(f, "IdentifierBatchReceived({})", ids.len()),
            Action::ItemsReceived(items) => write!(f, "ItemsReceived({})", items.len()),
            Action::ContentReceived { item_id, .. } => write!(f, "ContentReceived({item_id})"),
            other => write!(f, "{other:?}"),
        }
    }
}
