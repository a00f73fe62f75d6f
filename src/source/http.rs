//! HTTP data source.
//!
//! Fetches pages from the collection endpoint:
//! `GET {base_url}?limit=<limit>&skip=<offset>` returning a JSON array of
//! item records. Wire-shape tolerance (`_id` / `type` field spellings) is
//! handled by the [`Item`](crate::domain::Item) serde derives.

use crate::domain::{Item, LocalistError, Result};
use crate::source::backend::DataSource;
use async_trait::async_trait;

/// Data source backed by the remote collection's HTTP endpoint.
pub struct HttpDataSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDataSource {
    /// Creates a source fetching from `base_url`.
    ///
    /// `base_url` is the full resource URL, e.g.
    /// `http://localhost:5000/api/local-items`; `limit` and `skip` query
    /// parameters are appended per request.
    #[must_use]
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }
}

#[async_trait]
impl DataSource for HttpDataSource {
    async fn fetch_page(&self, offset: usize, limit: usize) -> Result<Vec<Item>> {
        tracing::debug!(url = %self.base_url, offset, limit, "fetching page");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("limit", limit), ("skip", offset)])
            .send()
            .await
            .map_err(|e| LocalistError::Network(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LocalistError::Network(format!(
                "server returned {status}"
            )));
        }

        let items: Vec<Item> = response
            .json()
            .await
            .map_err(|e| LocalistError::Network(format!("invalid response body: {e}")))?;

        tracing::debug!(count = items.len(), "page fetched");
        Ok(items)
    }
}
