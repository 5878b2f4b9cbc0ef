use async_trait::async_trait;

use super::error::FetchError;
use super::types::Item;

/// Ranking route for the best stories.
pub const BEST_STORIES: &str = "beststories";

/// One logical retrieval per call. Implementations hold no per-call state,
/// so every call is independent and safe to issue concurrently.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Returns the name of the source, for logs.
    fn name(&self) -> &str;

    /// Fetches a ranked list of item identifiers, e.g. `"beststories"`.
    async fn fetch_identifier_batch(&self, route: &str) -> Result<Vec<u32>, FetchError>;

    /// Fetches one item record. Unknown identifiers come back as a deleted
    /// placeholder rather than an error.
    async fn fetch_item(&self, id: u32) -> Result<Item, FetchError>;
}
