//! # Application State
//!
//! The single source of truth for the reader. Domain state only; scroll
//! offsets and widget state live in the `tui` module.
//!
//! ```text
//! App
//! ├── items: Vec<Item>            // ranked collection, replaced wholesale
//! ├── loaded: bool                // a collection has arrived at least once
//! ├── is_loading: bool            // a fetch chain is in flight
//! ├── cursor: usize               // highlighted index, always in bounds
//! ├── selected: Option<usize>     // index of the item being read
//! ├── status_message: String      // status line / empty-list fallback
//! ├── error: Option<String>       // last failure, cleared on success
//! ├── viewport: Viewport          // reader geometry, lazily initialised
//! ├── article: Option<Article>    // extracted text for the selected item
//! ├── page_size: usize
//! └── max_stories: usize
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::config::{DEFAULT_MAX_STORIES, DEFAULT_PAGE_SIZE, ResolvedConfig};
use crate::feed::Item;

pub const WELCOME_MESSAGE: &str = "Running Application...";

/// Informal grouping of state combinations. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// No collection loaded yet.
    Loading,
    /// Collection loaded, nothing selected.
    Listing,
    /// An item is selected.
    Reading,
    /// No items to show and the last fetch failed.
    Error,
}

/// Reader body geometry. Initialised once, resized thereafter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub ready: bool,
    pub width: u16,
    pub height: u16,
}

/// Text pulled from an item's external URL.
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    pub item_id: u32,
    pub text: String,
}

#[derive(Debug)]
pub struct App {
    pub items: Vec<Item>,
    pub loaded: bool,
    pub is_loading: bool,
    pub cursor: usize,
    pub selected: Option<usize>,
    pub status_message: String,
    pub error: Option<String>,
    pub viewport: Viewport,
    pub article: Option<Article>,
    pub page_size: usize,
    pub max_stories: usize,
}

impl Default for App {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, DEFAULT_MAX_STORIES)
    }
}

impl App {
    pub fn new(page_size: usize, max_stories: usize) -> Self {
        Self {
            items: Vec::new(),
            loaded: false,
            is_loading: false,
            cursor: 0,
            selected: None,
            status_message: String::from(WELCOME_MESSAGE),
            error: None,
            viewport: Viewport::default(),
            article: None,
            page_size: page_size.max(1),
            max_stories,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(config.page_size, config.max_stories)
    }

    pub fn mode(&self) -> Mode {
        if self.selected.is_some() {
            Mode::Reading
        } else if self.items.is_empty() && self.error.is_some() {
            Mode::Error
        } else if self.loaded {
            Mode::Listing
        } else {
            Mode::Loading
        }
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.selected.and_then(|i| self.items.get(i))
    }

    /// Extracted article text, only if it belongs to the selected item.
    pub fn selected_article(&self) -> Option<&str> {
        let item = self.selected_item()?;
        self.article
            .as_ref()
            .filter(|a| a.item_id == item.id)
            .map(|a| a.text.as_str())
    }

    pub fn page(&self) -> usize {
        self.cursor / self.page_size
    }

    pub fn total_pages(&self) -> usize {
        self.items.len().div_ceil(self.page_size).max(1)
    }

    /// Index range of the page holding the cursor.
    pub fn page_bounds(&self) -> (usize, usize) {
        let start = (self.page() * self.page_size).min(self.items.len());
        let end = (start + self.page_size).min(self.items.len());
        (start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{story, test_app};

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.status_message, WELCOME_MESSAGE);
        assert!(!app.is_loading);
        assert_eq!(app.mode(), Mode::Loading);
        assert!(!app.viewport.ready);
    }

    #[test]
    fn test_page_size_never_zero() {
        let app = App::new(0, 10);
        assert_eq!(app.page_size, 1);
    }

    #[test]
    fn test_page_bounds_follow_cursor() {
        let mut app = App::new(3, 100);
        app.items = (1..=7).map(|id| story(id, "t")).collect();
        app.loaded = true;

        assert_eq!(app.page_bounds(), (0, 3));
        app.cursor = 4;
        assert_eq!(app.page(), 1);
        assert_eq!(app.page_bounds(), (3, 6));
        app.cursor = 6;
        assert_eq!(app.page_bounds(), (6, 7));
        assert_eq!(app.total_pages(), 3);
    }

    #[test]
    fn test_empty_collection_has_one_page() {
        let app = test_app();
        assert_eq!(app.total_pages(), 1);
        assert_eq!(app.page_bounds(), (0, 0));
    }

    #[test]
    fn test_article_for_other_item_is_hidden() {
        let mut app = test_app();
        app.items = vec![story(1, "a"), story(2, "b")];
        app.selected = Some(1);
        app.article = Some(Article {
            item_id: 1,
            text: "stale".into(),
        });
        assert_eq!(app.selected_article(), None);
    }
}
