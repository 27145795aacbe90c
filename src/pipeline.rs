//! Search → detail fetch → extraction → report

use crate::config::{SearchSettings, Settings};
use crate::detail::{DetailResolver, MetaUrlExtractor};
use crate::error::FetchError;
use crate::network::HttpClient;
use crate::results::SearchReport;
use crate::search::{Search, SearchQuery};
use futures::stream::{self, StreamExt};
use tracing::{info, warn};

/// Runs one query end to end
pub struct Pipeline {
    search: Search,
    resolver: DetailResolver,
    search_settings: SearchSettings,
    detail_concurrency: usize,
}

impl Pipeline {
    /// Build a pipeline with its own HTTP client
    pub fn new(settings: &Settings) -> Result<Self, FetchError> {
        let client = HttpClient::with_settings(&settings.outgoing)?;
        Ok(Self::with_client(client, settings))
    }

    pub fn with_client(client: HttpClient, settings: &Settings) -> Self {
        Self {
            search: Search::new(client.clone(), settings.search.endpoint.clone()),
            resolver: DetailResolver::new(
                client,
                MetaUrlExtractor::new(settings.extraction.match_mode),
            ),
            search_settings: settings.search.clone(),
            detail_concurrency: settings.outgoing.detail_concurrency.max(1),
        }
    }

    /// Search for `query` and resolve every hit.
    ///
    /// `count` is the number of raw search items; packages keep search order
    /// even though detail pages are fetched concurrently.
    pub async fn run(&self, query: &str) -> SearchReport {
        let query = SearchQuery::with_settings(query, &self.search_settings);
        let outcome = self.search.collect(&query).await;
        let count = outcome.items.len();

        let resolutions: Vec<_> = stream::iter(outcome.items.iter())
            .map(|item| self.resolver.resolve(item))
            .buffered(self.detail_concurrency)
            .collect()
            .await;

        let (packages, detail_failures): (Vec<_>, Vec<_>) = resolutions
            .into_iter()
            .map(|r| (r.package, r.failure))
            .unzip();

        let failures: Vec<_> = outcome
            .failures
            .into_iter()
            .chain(detail_failures.into_iter().flatten())
            .collect();

        let report = SearchReport::new(count, packages, failures);

        info!(
            "Resolved {} of {} packages for '{}'",
            report.resolved(),
            report.count,
            query.query
        );
        if report.is_partial() {
            warn!("{} steps failed, report is partial", report.failures.len());
        }

        report
    }
}
