//! # Batch Item Resolution
//!
//! Resolves a ranked identifier batch into full items with a fixed-size
//! worker pool.
//!
//! ```text
//!   ids: [5, 9, 2, 7]          next: AtomicUsize
//!          │                          │
//!   ┌──────┴───────┬──────────────────┘
//!   ▼              ▼
//! worker 0      worker 1   ...  (claim index i, fetch ids[i])
//!   │              │
//!   └──── (i, Result<Item>) ────► slots[i]
//! ```
//!
//! Workers finish in any order, but every result is tagged with the index it
//! was claimed at and written into a pre-sized slot vector, so the output
//! order always equals the input order.
//!
//! The batch is all-or-nothing: the first failed fetch aborts the remaining
//! workers and the whole call fails. No partial list is ever returned.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::{debug, warn};
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use super::error::FetchError;
use super::source::FeedSource;
use super::types::Item;

pub const DEFAULT_WORKERS: usize = 8;
pub const MAX_WORKERS: usize = 32;

pub async fn fetch_item_batch(
    source: Arc<dyn FeedSource>,
    ids: &[u32],
    workers: usize,
) -> Result<Vec<Item>, FetchError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Arc<[u32]> = Arc::from(ids);
    let next = Arc::new(AtomicUsize::new(0));
    let worker_count = workers.clamp(1, MAX_WORKERS).min(ids.len());
    let (tx, mut rx) = mpsc::unbounded_channel::<(usize, Result<Item, FetchError>)>();

    debug!(
        "Resolving {} items from {} with {} workers",
        ids.len(),
        source.name(),
        worker_count
    );

    let mut pool = JoinSet::new();
    for _ in 0..worker_count {
        let source = source.clone();
        let ids = ids.clone();
        let next = next.clone();
        let tx = tx.clone();
        pool.spawn(async move {
            loop {
                let index = next.fetch_add(1, Ordering::Relaxed);
                let Some(&id) = ids.get(index) else {
                    break;
                };
                let result = source.fetch_item(id).await;
                let failed = result.is_err();
                if tx.send((index, result)).is_err() || failed {
                    break;
                }
            }
        });
    }
    // Only workers hold senders now; the channel closes when the last one exits.
    drop(tx);

    let mut slots: Vec<Option<Item>> = std::iter::repeat_with(|| None).take(ids.len()).collect();
    while let Some((index, result)) = rx.recv().await {
        match result {
            Ok(item) => slots[index] = Some(item),
            Err(e) => {
                warn!("Item {} failed, abandoning batch: {}", ids[index], e);
                pool.abort_all();
                return Err(e);
            }
        }
    }

    let resolved = slots.len();
    slots.into_iter().collect::<Option<Vec<Item>>>().ok_or_else(|| {
        warn!("Item batch ended with unfilled slots ({} expected)", resolved);
        FetchError::Transport("item batch ended early".to_string())
    })
}
