//! Detail page fetching and download link resolution

use super::extractor::MetaUrlExtractor;
use crate::error::FetchError;
use crate::network::HttpClient;
use crate::results::{Failure, FailureStage, Package};
use crate::search::SearchItem;
use tracing::{debug, warn};

/// A package built from one search item, with the failure that left its url empty
#[derive(Debug)]
pub struct Resolution {
    pub package: Package,
    pub failure: Option<Failure>,
}

/// Fetches detail pages and extracts their download link
#[derive(Clone)]
pub struct DetailResolver {
    client: HttpClient,
    extractor: MetaUrlExtractor,
}

impl DetailResolver {
    pub fn new(client: HttpClient, extractor: MetaUrlExtractor) -> Self {
        Self { client, extractor }
    }

    /// Fetch a detail page body. The URL is requested verbatim.
    pub async fn fetch_body(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).await?.error_for_status()?;
        Ok(response.text)
    }

    /// Resolve one search item into a package
    pub async fn resolve(&self, item: &SearchItem) -> Resolution {
        let title = item.display_title().to_string();

        let Some(url) = item.url.as_deref() else {
            warn!("Search item '{}' has no detail url", title);
            return Resolution {
                package: Package::new(title.clone(), None),
                failure: Some(Failure::new(
                    FailureStage::Detail,
                    title,
                    &FetchError::MissingUrl,
                )),
            };
        };

        let (download, failure) = match self.fetch_body(url).await {
            Ok(body) => match self.extractor.extract(&body) {
                Ok(download) => {
                    debug!("Resolved {} -> {}", url, download);
                    (Some(download), None)
                }
                Err(e) => {
                    warn!("No download link in {}: {}", url, e);
                    (None, Some(Failure::new(FailureStage::Extraction, url, &e)))
                }
            },
            Err(e) => {
                warn!("Detail request failed for {}: {}", url, e);
                (None, Some(Failure::new(FailureStage::Detail, url, &e)))
            }
        };

        Resolution {
            package: Package::new(title, download),
            failure,
        }
    }
}
