//! # Fetch Layer
//!
//! Stateless retrieval of feed data. Every call is independent and returns a
//! typed result or a [`FetchError`].
//!
//! - [`source`]: the `FeedSource` trait every fetch goes through
//! - [`client`]: the reqwest-backed Hacker News implementation
//! - [`batch`]: bounded, order-preserving resolution of identifier batches
//! - [`extract`]: article text via an external process

pub mod batch;
pub mod client;
pub mod error;
pub mod extract;
pub mod source;
pub mod types;

pub use batch::fetch_item_batch;
pub use client::HackerNewsClient;
pub use error::FetchError;
pub use extract::ContentExtractor;
pub use source::{BEST_STORIES, FeedSource};
pub use types::{Item, ItemKind};
