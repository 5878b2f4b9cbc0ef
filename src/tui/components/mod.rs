//! # TUI Components
//!
//! - `TitleBar`: stateless, one line of mode + status
//! - `StoryList`: stateless view of the ranked page holding the cursor
//! - `Reader`: transient wrapper around persistent `ReaderState` (scroll)
//!
//! Components receive external data as props, not by reaching into global
//! state, so each one can be rendered against a `TestBackend` in isolation.

pub mod reader;
pub mod story_list;
mod title_bar;

pub use reader::{Reader, ReaderState};
pub use story_list::StoryList;
pub use title_bar::TitleBar;
