//! # Actions
//!
//! Everything that can happen in the reader becomes an `Action`.
//! User presses `j`? That's `Action::CursorDown`.
//! The item batch resolves? That's `Action::ItemsReceived(items)`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns at most one `Effect` for the event loop to run.
//! No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//!                                              │
//!        Action  ◄──  scheduler  ◄── Request ──┘
//! ```
//!
//! Every `Effect::Fetch` eventually re-enters as exactly one action: the
//! success payload or `FetchFailed`.

use log::{debug, info, warn};

use crate::core::state::{App, Article, Viewport};
use crate::feed::Item;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Startup, and every manual refresh.
    Init,
    IdentifierBatchReceived(Vec<u32>),
    ItemsReceived(Vec<Item>),
    ContentReceived { item_id: u32, text: String },
    FetchFailed(String),
    CursorDown,
    CursorUp,
    NextPage,
    PrevPage,
    Select,
    Deselect,
    /// Ask for the selected item's external URL to be extracted.
    ExtractContent,
    /// Reader body size reported by the rendering side.
    ViewportResized { width: u16, height: u16 },
    Quit,
}

/// I/O the scheduler performs. Each request yields exactly one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    BestIdentifiers,
    Items(Vec<u32>),
    Content { item_id: u32, url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    Fetch(Request),
    /// Ask the renderer for the current reader size. Answered with
    /// `Action::ViewportResized`.
    QueryViewport,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Init => {
            app.is_loading = true;
            app.error = None;
            app.status_message = String::from("Fetching best stories");
            info!("Requesting best story identifiers");
            Effect::Fetch(Request::BestIdentifiers)
        }
        Action::IdentifierBatchReceived(mut ids) => {
            if ids.len() > app.max_stories {
                debug!("Truncating {} identifiers to {}", ids.len(), app.max_stories);
                ids.truncate(app.max_stories);
            }
            app.status_message = format!("Fetching {} items", ids.len());
            Effect::Fetch(Request::Items(ids))
        }
        Action::ItemsReceived(items) => {
            info!("Received {} items", items.len());
            app.items = items;
            app.loaded = true;
            app.is_loading = false;
            app.error = None;
            app.cursor = 0;
            app.selected = None;
            app.article = None;
            app.status_message = if app.items.is_empty() {
                String::from("No stories to show")
            } else {
                format!("{} stories", app.items.len())
            };
            Effect::None
        }
        Action::ContentReceived { item_id, text } => {
            if app.selected_item().map(|i| i.id) == Some(item_id) {
                app.status_message = String::from("Article extracted");
                app.article = Some(Article { item_id, text });
            } else {
                debug!("Dropping extracted content for item {} (no longer selected)", item_id);
            }
            Effect::None
        }
        Action::FetchFailed(message) => {
            warn!("Fetch failed: {}", message);
            app.is_loading = false;
            app.status_message = message.clone();
            app.error = Some(message);
            Effect::None
        }
        Action::CursorDown => {
            if app.selected.is_none() && !app.items.is_empty() {
                app.cursor = (app.cursor + 1).min(app.items.len() - 1);
            }
            Effect::None
        }
        Action::CursorUp => {
            if app.selected.is_none() {
                app.cursor = app.cursor.saturating_sub(1);
            }
            Effect::None
        }
        Action::NextPage => {
            if app.selected.is_none() && !app.items.is_empty() {
                app.cursor = (app.cursor + app.page_size).min(app.items.len() - 1);
            }
            Effect::None
        }
        Action::PrevPage => {
            if app.selected.is_none() {
                app.cursor = app.cursor.saturating_sub(app.page_size);
            }
            Effect::None
        }
        Action::Select => select(app),
        Action::Deselect => {
            app.selected = None;
            Effect::None
        }
        Action::ExtractContent => {
            let Some(item) = app.selected_item() else {
                return Effect::None;
            };
            match item.url.clone() {
                Some(url) => {
                    let item_id = item.id;
                    app.status_message = format!("Extracting {}", url);
                    Effect::Fetch(Request::Content { item_id, url })
                }
                None => {
                    app.status_message = String::from("This item has no link");
                    Effect::None
                }
            }
        }
        Action::ViewportResized { width, height } => {
            if app.selected.is_none() {
                return Effect::None;
            }
            if !app.viewport.ready {
                debug!("Initialising reader viewport at {}x{}", width, height);
                app.viewport = Viewport {
                    ready: true,
                    width,
                    height,
                };
            } else {
                app.viewport.width = width;
                app.viewport.height = height;
            }
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn select(app: &mut App) -> Effect {
    if app.selected.is_some() {
        return Effect::None;
    }
    let Some(item) = app.items.get(app.cursor) else {
        return Effect::None;
    };
    if item.is_hidden() {
        app.status_message = format!("Item {} is no longer available", item.id);
        return Effect::None;
    }
    app.selected = Some(app.cursor);
    Effect::QueryViewport
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::Mode;
    use crate::test_support::{story, test_app};

    fn loaded_app(ids: &[u32]) -> App {
        let mut app = test_app();
        update(&mut app, Action::Init);
        update(
            &mut app,
            Action::ItemsReceived(ids.iter().map(|&id| story(id, "t")).collect()),
        );
        app
    }

    #[test]
    fn test_init_requests_best_identifiers() {
        let mut app = test_app();
        let effect = update(&mut app, Action::Init);
        assert_eq!(effect, Effect::Fetch(Request::BestIdentifiers));
        assert_eq!(app.mode(), Mode::Loading);
        assert!(app.is_loading);
    }

    #[test]
    fn test_identifier_batch_requests_items_in_order() {
        let mut app = test_app();
        update(&mut app, Action::Init);
        let effect = update(&mut app, Action::IdentifierBatchReceived(vec![5, 9, 2]));
        assert_eq!(effect, Effect::Fetch(Request::Items(vec![5, 9, 2])));
        assert_eq!(app.mode(), Mode::Loading);
        assert_eq!(app.status_message, "Fetching 3 items");
    }

    #[test]
    fn test_identifier_batch_truncated_to_max_stories() {
        let mut app = App::new(20, 2);
        let effect = update(&mut app, Action::IdentifierBatchReceived(vec![5, 9, 2]));
        assert_eq!(effect, Effect::Fetch(Request::Items(vec![5, 9])));
    }

    #[test]
    fn test_full_browse_scenario() {
        let mut app = test_app();
        update(&mut app, Action::Init);
        update(&mut app, Action::IdentifierBatchReceived(vec![5, 9, 2]));
        update(
            &mut app,
            Action::ItemsReceived(vec![story(5, "A"), story(9, "B"), story(2, "C")]),
        );
        assert_eq!(app.cursor, 0);
        assert_eq!(app.mode(), Mode::Listing);

        update(&mut app, Action::CursorDown);
        assert_eq!(app.cursor, 1);

        let effect = update(&mut app, Action::Select);
        assert_eq!(effect, Effect::QueryViewport);
        assert_eq!(app.selected_item().map(|i| i.id), Some(9));
        assert_eq!(app.mode(), Mode::Reading);

        update(&mut app, Action::Deselect);
        assert_eq!(app.mode(), Mode::Listing);
        assert_eq!(app.cursor, 1);
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut app = loaded_app(&[1, 2, 3]);
        let script = [
            Action::CursorUp,
            Action::CursorUp,
            Action::CursorDown,
            Action::CursorDown,
            Action::CursorDown,
            Action::CursorDown,
            Action::CursorUp,
            Action::CursorDown,
            Action::CursorDown,
        ];
        for action in script {
            update(&mut app, action);
            assert!(app.cursor < app.items.len());
        }
        assert_eq!(app.cursor, 2);
    }

    #[test]
    fn test_cursor_no_wraparound() {
        let mut app = loaded_app(&[1, 2]);
        update(&mut app, Action::CursorUp);
        assert_eq!(app.cursor, 0);
        update(&mut app, Action::CursorDown);
        update(&mut app, Action::CursorDown);
        assert_eq!(app.cursor, 1);
    }

    #[test]
    fn test_cursor_on_empty_collection_stays_zero() {
        let mut app = loaded_app(&[]);
        update(&mut app, Action::CursorDown);
        update(&mut app, Action::NextPage);
        update(&mut app, Action::CursorUp);
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn test_select_with_empty_collection_is_ignored() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Select), Effect::None);
        assert_eq!(app.selected, None);

        let mut app = loaded_app(&[]);
        assert_eq!(update(&mut app, Action::Select), Effect::None);
        assert_eq!(app.mode(), Mode::Listing);
    }

    #[test]
    fn test_empty_items_received_is_listing_with_status() {
        let mut app = test_app();
        update(&mut app, Action::Init);
        update(&mut app, Action::ItemsReceived(Vec::new()));
        assert_eq!(app.mode(), Mode::Listing);
        assert!(app.items.is_empty());
        assert_eq!(app.status_message, "No stories to show");
    }

    #[test]
    fn test_fetch_failed_on_first_load_is_error() {
        let mut app = test_app();
        update(&mut app, Action::Init);
        update(&mut app, Action::FetchFailed("connection refused".into()));
        assert_eq!(app.status_message, "connection refused");
        assert!(app.items.is_empty());
        assert_eq!(app.mode(), Mode::Error);
        assert!(!app.is_loading);
    }

    #[test]
    fn test_fetch_failed_after_empty_load_is_error() {
        let mut app = test_app();
        update(&mut app, Action::Init);
        update(&mut app, Action::ItemsReceived(Vec::new()));
        update(&mut app, Action::Init);
        assert_eq!(app.mode(), Mode::Listing);

        update(&mut app, Action::FetchFailed("connection refused".into()));
        assert!(app.items.is_empty());
        assert_eq!(app.status_message, "connection refused");
        assert_eq!(app.mode(), Mode::Error);
    }

    #[test]
    fn test_fetch_failed_twice_keeps_items() {
        let mut app = loaded_app(&[1, 2, 3]);
        update(&mut app, Action::CursorDown);
        let before = app.items.clone();

        update(&mut app, Action::FetchFailed("first".into()));
        assert_eq!(app.items, before);
        assert_eq!(app.status_message, "first");

        update(&mut app, Action::FetchFailed("second".into()));
        assert_eq!(app.items, before);
        assert_eq!(app.status_message, "second");
        assert_eq!(app.cursor, 1);
        assert_eq!(app.mode(), Mode::Listing);
    }

    #[test]
    fn test_fetch_failed_while_reading_keeps_selection() {
        let mut app = loaded_app(&[1, 2]);
        update(&mut app, Action::Select);
        update(&mut app, Action::FetchFailed("timeout".into()));
        assert_eq!(app.mode(), Mode::Reading);
        assert_eq!(app.selected_item().map(|i| i.id), Some(1));
    }

    #[test]
    fn test_refresh_keeps_items_until_replaced() {
        let mut app = loaded_app(&[1, 2, 3]);
        update(&mut app, Action::CursorDown);
        update(&mut app, Action::Init);
        assert_eq!(app.items.len(), 3);
        assert_eq!(app.mode(), Mode::Listing);

        update(&mut app, Action::ItemsReceived(vec![story(7, "new")]));
        assert_eq!(app.cursor, 0);
        assert_eq!(app.items[0].id, 7);
    }

    #[test]
    fn test_items_received_clears_selection() {
        let mut app = loaded_app(&[1, 2]);
        update(&mut app, Action::Select);
        update(&mut app, Action::ItemsReceived(vec![story(3, "x")]));
        assert_eq!(app.selected, None);
        assert_eq!(app.mode(), Mode::Listing);
    }

    #[test]
    fn test_cursor_frozen_while_reading() {
        let mut app = loaded_app(&[1, 2, 3]);
        update(&mut app, Action::Select);
        update(&mut app, Action::CursorDown);
        update(&mut app, Action::NextPage);
        assert_eq!(app.cursor, 0);
        assert_eq!(app.selected, Some(0));
    }

    #[test]
    fn test_paging_moves_cursor_by_page_size() {
        let mut app = App::new(3, 100);
        update(
            &mut app,
            Action::ItemsReceived((1..=8).map(|id| story(id, "t")).collect()),
        );
        update(&mut app, Action::NextPage);
        assert_eq!(app.cursor, 3);
        assert_eq!(app.page(), 1);
        update(&mut app, Action::NextPage);
        update(&mut app, Action::NextPage);
        assert_eq!(app.cursor, 7);
        update(&mut app, Action::PrevPage);
        assert_eq!(app.cursor, 4);
        update(&mut app, Action::PrevPage);
        update(&mut app, Action::PrevPage);
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn test_select_hidden_item_is_rejected() {
        let mut app = test_app();
        update(&mut app, Action::ItemsReceived(vec![Item::missing(4)]));
        assert_eq!(update(&mut app, Action::Select), Effect::None);
        assert_eq!(app.selected, None);
        assert_eq!(app.status_message, "Item 4 is no longer available");
    }

    #[test]
    fn test_viewport_initialised_once_then_resized() {
        let mut app = loaded_app(&[1]);
        update(&mut app, Action::ViewportResized { width: 10, height: 10 });
        assert!(!app.viewport.ready);

        update(&mut app, Action::Select);
        update(&mut app, Action::ViewportResized { width: 80, height: 20 });
        assert_eq!(
            app.viewport,
            Viewport {
                ready: true,
                width: 80,
                height: 20
            }
        );

        update(&mut app, Action::Deselect);
        update(&mut app, Action::Select);
        update(&mut app, Action::ViewportResized { width: 100, height: 30 });
        assert!(app.viewport.ready);
        assert_eq!((app.viewport.width, app.viewport.height), (100, 30));
    }

    #[test]
    fn test_extract_content_requests_url() {
        let mut app = test_app();
        let mut item = story(11, "Linked");
        item.url = Some("https://example.com/post".into());
        update(&mut app, Action::ItemsReceived(vec![item]));
        update(&mut app, Action::Select);

        let effect = update(&mut app, Action::ExtractContent);
        assert_eq!(
            effect,
            Effect::Fetch(Request::Content {
                item_id: 11,
                url: "https://example.com/post".into()
            })
        );

        update(
            &mut app,
            Action::ContentReceived {
                item_id: 11,
                text: "body".into(),
            },
        );
        assert_eq!(app.selected_article(), Some("body"));
    }

    #[test]
    fn test_extract_content_without_url() {
        let mut app = loaded_app(&[1]);
        update(&mut app, Action::Select);
        assert_eq!(update(&mut app, Action::ExtractContent), Effect::None);
        assert_eq!(app.status_message, "This item has no link");
    }

    #[test]
    fn test_extract_content_when_listing_is_noop() {
        let mut app = loaded_app(&[1]);
        assert_eq!(update(&mut app, Action::ExtractContent), Effect::None);
    }

    #[test]
    fn test_late_content_for_deselected_item_dropped() {
        let mut app = loaded_app(&[1, 2]);
        update(&mut app, Action::Select);
        update(&mut app, Action::Deselect);
        update(
            &mut app,
            Action::ContentReceived {
                item_id: 1,
                text: "late".into(),
            },
        );
        assert_eq!(app.article, None);
    }

    #[test]
    fn test_quit_returns_quit_effect() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
