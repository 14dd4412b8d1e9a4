use crate::domain::model::{Record, SearchResponse, SearchResult};
use crate::utils::error::Result;
use reqwest::Client;
use std::time::Duration;

/// Upper bound the datastore accepts for a single page.
pub const PAGE_SIZE: usize = 100;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for a CKAN `datastore_search` endpoint.
///
/// Endpoint and resource id are injected so tests can point at a mock
/// server. The client keeps no state between calls.
pub struct CkanClient {
    endpoint: String,
    resource_id: String,
    client: Client,
}

impl CkanClient {
    pub fn new(endpoint: impl Into<String>, resource_id: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            resource_id: resource_id.into(),
            client: Client::new(),
        }
    }

    /// Fetch a single page of results. Any transport failure (network
    /// error, non-success status, timeout) is fatal to the caller.
    pub async fn fetch_page(
        &self,
        keyword: &str,
        offset: usize,
        limit: usize,
    ) -> Result<SearchResult> {
        tracing::debug!(
            "GET {} q='{}' offset={} limit={}",
            self.endpoint,
            keyword,
            offset,
            limit
        );

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("resource_id", self.resource_id.as_str()), ("q", keyword)])
            .query(&[("offset", offset), ("limit", limit)])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?
            .error_for_status()?;

        let body: SearchResponse = response.json().await?;
        tracing::debug!(
            "Page returned {} records (total reported: {:?})",
            body.result.records.len(),
            body.result.total
        );

        Ok(body.result)
    }

    /// Fetch up to `max_records` records for `keyword`, paging sequentially.
    ///
    /// Stops on the first empty page, and on the first page shorter than
    /// [`PAGE_SIZE`] even when fewer than `max_records` have accumulated.
    pub async fn fetch_all(&self, keyword: &str, max_records: usize) -> Result<Vec<Record>> {
        let mut results = Vec::new();
        let mut offset = 0;

        while offset < max_records {
            let limit = PAGE_SIZE.min(max_records - offset);
            let page = self.fetch_page(keyword, offset, limit).await?;

            if page.records.is_empty() {
                break;
            }

            let returned = page.records.len();
            results.extend(page.records);
            offset += returned;

            // A short page means the datastore ran out of matches.
            if returned < PAGE_SIZE {
                break;
            }
        }

        Ok(results)
    }
}
