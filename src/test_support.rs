//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::core::state::App;
use crate::feed::{FeedSource, FetchError, Item, ItemKind};

type LatencyFn = Box<dyn Fn(u32) -> Duration + Send + Sync>;

/// In-memory feed. Every id resolves to `story(id, "Story <id>")` unless
/// scripted otherwise.
pub struct ScriptedSource {
    ranking: Result<Vec<u32>, FetchError>,
    failures: HashMap<u32, FetchError>,
    latency: Option<LatencyFn>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self {
            ranking: Ok(Vec::new()),
            failures: HashMap::new(),
            latency: None,
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_ranking(mut self, ids: Vec<u32>) -> Self {
        self.ranking = Ok(ids);
        self
    }

    pub fn failing_ranking(mut self, err: FetchError) -> Self {
        self.ranking = Err(err);
        self
    }

    pub fn failing_item(mut self, id: u32, err: FetchError) -> Self {
        self.failures.insert(id, err);
        self
    }

    pub fn with_latency(mut self, f: impl Fn(u32) -> Duration + Send + Sync + 'static) -> Self {
        self.latency = Some(Box::new(f));
        self
    }

    /// Highest number of `fetch_item` calls that were in progress at once.
    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn item_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeedSource for ScriptedSource {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn fetch_identifier_batch(&self, _route: &str) -> Result<Vec<u32>, FetchError> {
        self.ranking.clone()
    }

    async fn fetch_item(&self, id: u32) -> Result<Item, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        if let Some(latency) = &self.latency {
            tokio::time::sleep(latency(id)).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.failures.get(&id) {
            Some(err) => Err(err.clone()),
            None => Ok(story(id, &format!("Story {id}"))),
        }
    }
}

pub fn story(id: u32, title: &str) -> Item {
    Item {
        id,
        kind: ItemKind::Story,
        author: "pg".to_string(),
        title: Some(title.to_string()),
        score: 100,
        ..Item::default()
    }
}

/// Creates a default App.
pub fn test_app() -> App {
    App::default()
}
