//! Search execution over the offset range

use super::models::{parse_downloads, PageOutcome, SearchItem, SearchOutcome, SearchQuery};
use crate::error::FetchError;
use crate::network::HttpClient;
use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

/// Search executor for the downloads index
pub struct Search {
    /// HTTP client for making requests
    client: HttpClient,
    /// Index endpoint URL
    endpoint: String,
}

impl Search {
    /// Create a new search executor
    pub fn new(client: HttpClient, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Request every offset in turn and fold the pages into one outcome
    pub async fn collect(&self, query: &SearchQuery) -> SearchOutcome {
        info!(
            "Searching '{}' over {} pages of {}",
            query.query, query.pages, self.endpoint
        );

        let outcome = stream::iter(query.offsets())
            .then(|offset| self.fetch_page(query, offset))
            .fold(SearchOutcome::default(), |outcome, page| async move {
                outcome.absorb(page)
            })
            .await;

        info!(
            "Found {} items, {} pages failed",
            outcome.items.len(),
            outcome.failures.len()
        );

        outcome
    }

    /// Request a single page
    pub async fn fetch_page(&self, query: &SearchQuery, offset: u32) -> PageOutcome {
        match self.request_page(query, offset).await {
            Ok(items) => {
                debug!("Offset {} returned {} items", offset, items.len());
                PageOutcome::Items(items)
            }
            Err(error) => {
                warn!("Search request failed at offset {}: {}", offset, error);
                PageOutcome::Failed { offset, error }
            }
        }
    }

    async fn request_page(
        &self,
        query: &SearchQuery,
        offset: u32,
    ) -> Result<Vec<SearchItem>, FetchError> {
        let response = self
            .client
            .get_with_params(&self.endpoint, &query.params(offset))
            .await?
            .error_for_status()?;

        parse_downloads(&response.text)
    }
}
