//! HTTP client for the public Hacker News Firebase API.
//!
//! ```text
//! GET <base>/beststories.json  →  [u32, ...]
//! GET <base>/item/<id>.json    →  { "id": .., "type": .., ... } | null
//! ```

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use serde::de::DeserializeOwned;

use super::error::FetchError;
use super::source::FeedSource;
use super::types::Item;

pub const DEFAULT_BASE_URL: &str = "https://hacker-news.firebaseio.com/v0";

pub struct HackerNewsClient {
    base_url: String,
    client: reqwest::Client,
}

impl HackerNewsClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("newsfeed/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_client(base_url, client))
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GETs `<base>/<route>.json` and decodes the body as `T`.
    async fn fetch_resource<T: DeserializeOwned>(&self, route: &str) -> Result<T, FetchError> {
        let url = format!("{}/{}.json", self.base_url, route.trim_start_matches('/'));
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("GET {} failed with HTTP {}", url, status.as_u16());
            return Err(FetchError::Transport(format!(
                "HTTP {}: {}",
                status.as_u16(),
                route
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Io(e.to_string()))?;

        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl FeedSource for HackerNewsClient {
    fn name(&self) -> &str {
        "hacker-news"
    }

    async fn fetch_identifier_batch(&self, route: &str) -> Result<Vec<u32>, FetchError> {
        let ids: Vec<u32> = self.fetch_resource(route).await?;
        debug!("{} returned {} identifiers", route, ids.len());
        Ok(ids)
    }

    async fn fetch_item(&self, id: u32) -> Result<Item, FetchError> {
        let item: Option<Item> = self.fetch_resource(&format!("item/{id}")).await?;
        Ok(item.unwrap_or_else(|| Item::missing(id)))
    }
}
