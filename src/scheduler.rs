//! # Effect Scheduler
//!
//! Turns a [`Request`] from the controller into a tokio task that performs
//! the fetch and sends back exactly one [`Action`]. Errors never escape a
//! task: every failure becomes `Action::FetchFailed`.
//!
//! The event loop never waits on these tasks. Results come back through the
//! same `mpsc` channel the loop drains between frames, so the controller
//! only ever sees them as ordinary actions.

use std::sync::Arc;
use std::sync::mpsc::Sender;

use log::{debug, info, warn};

use crate::core::action::{Action, Request};
use crate::core::config::ResolvedConfig;
use crate::feed::{
    BEST_STORIES, ContentExtractor, FeedSource, FetchError, HackerNewsClient, fetch_item_batch,
};

#[derive(Clone)]
pub struct Scheduler {
    source: Arc<dyn FeedSource>,
    extractor: Arc<ContentExtractor>,
    workers: usize,
}

impl Scheduler {
    pub fn new(source: Arc<dyn FeedSource>, extractor: ContentExtractor, workers: usize) -> Self {
        Self {
            source,
            extractor: Arc::new(extractor),
            workers,
        }
    }

    /// Build the HTTP-backed scheduler described by a resolved config.
    pub fn from_config(config: &ResolvedConfig) -> Result<Self, FetchError> {
        let client = HackerNewsClient::new(config.base_url.clone(), config.request_timeout)?;
        let extractor = ContentExtractor::new(
            config.extractor_command.clone(),
            config.extractor_args.clone(),
            config.extractor_timeout,
        );
        Ok(Self::new(Arc::new(client), extractor, config.workers))
    }

    /// Performs one request and folds its outcome into a single action.
    pub async fn execute(&self, request: Request) -> Action {
        match request {
            Request::BestIdentifiers => {
                match self.source.fetch_identifier_batch(BEST_STORIES).await {
                    Ok(ids) => Action::IdentifierBatchReceived(ids),
                    Err(e) => failed("best stories", e),
                }
            }
            Request::Items(ids) => {
                match fetch_item_batch(self.source.clone(), &ids, self.workers).await {
                    Ok(items) => Action::ItemsReceived(items),
                    Err(e) => failed("items", e),
                }
            }
            Request::Content { item_id, url } => match self.extractor.extract(&url).await {
                Ok(text) => Action::ContentReceived { item_id, text },
                Err(e) => failed("content", e),
            },
        }
    }

    /// Runs `request` on the tokio runtime and posts the resulting action to `tx`.
    pub fn spawn(&self, request: Request, tx: Sender<Action>) -> tokio::task::JoinHandle<()> {
        info!("Scheduling {:?}", RequestLabel(&request));
        let scheduler = self.clone();
        tokio::spawn(async move {
            let action = scheduler.execute(request).await;
            debug!("Effect finished: {}", action_label(&action));
            if tx.send(action).is_err() {
                warn!("Failed to deliver effect result: receiver dropped");
            }
        })
    }
}

fn failed(what: &str, e: FetchError) -> Action {
    warn!("Fetching {} failed ({}): {}", what, e.kind(), e);
    Action::FetchFailed(e.to_string())
}

/// Short form for logs; a full item batch is too noisy to print.
struct RequestLabel<'a>(&'a Request);

impl std::fmt::Debug for RequestLabel<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Request::BestIdentifiers => write!(f, "BestIdentifiers"),
            Request::Items(ids) => write!(f, "Items({} ids)", ids.len()),
            Request::Content { item_id, url } => write!(f, "Content({item_id}, {url})"),
        }
    }
}

fn action_label(action: &Action) -> String {
    match action {
        Action::IdentifierBatchReceived(ids) => format!("IdentifierBatchReceived({})", ids.len()),
        Action::ItemsReceived(items) => format!("ItemsReceived({})", items.len()),
        Action::ContentReceived { item_id, text } => {
            format!("ContentReceived({item_id}, {} bytes)", text.len())
        }
        other => format!("{other:?}"),
    }
}
