//! Search stage models

use crate::config::SearchSettings;
use crate::error::FetchError;
use crate::results::{Failure, FailureStage};
use serde_json::Value;
use std::ops::Range;

/// A query against the downloads index, with the fixed parameter set
#[derive(Debug, Clone)]
pub struct SearchQuery {
    /// Search keyword, sent as `q` without validation
    pub query: String,
    pub locale: String,
    pub sort: String,
    pub facet: String,
    pub category: String,
    /// Number of offsets to request
    pub pages: u32,
}

impl SearchQuery {
    /// Query with the default parameter set
    pub fn new(query: impl Into<String>) -> Self {
        Self::with_settings(query, &SearchSettings::default())
    }

    pub fn with_settings(query: impl Into<String>, settings: &SearchSettings) -> Self {
        Self {
            query: query.into(),
            locale: settings.locale.clone(),
            sort: settings.sort.clone(),
            facet: settings.facet.clone(),
            category: settings.category.clone(),
            pages: settings.pages,
        }
    }

    /// Offsets requested for this query, `0..pages`
    pub fn offsets(&self) -> Range<u32> {
        0..self.pages
    }

    /// Query parameters for one page
    pub fn params(&self, offset: u32) -> Vec<(&'static str, String)> {
        vec![
            ("page", "downloads_search".to_string()),
            ("offset", offset.to_string()),
            ("sort", self.sort.clone()),
            ("facet", self.facet.clone()),
            ("category", self.category.clone()),
            ("q", self.query.clone()),
            ("locale", self.locale.clone()),
        ]
    }
}

/// One entry of the index's `downloads` array
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchItem {
    pub title: Option<String>,
    /// Detail page URL, including whatever query string the index put on it
    pub url: Option<String>,
}

impl SearchItem {
    pub fn new(title: Option<&str>, url: Option<&str>) -> Self {
        Self {
            title: title.map(str::to_string),
            url: url.map(str::to_string),
        }
    }

    /// Read an item leniently; non-string fields count as missing
    pub fn from_value(value: &Value) -> Self {
        Self::new(
            value.get("title").and_then(Value::as_str),
            value.get("url").and_then(Value::as_str),
        )
    }

    /// Title, or the `<none>` placeholder
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(crate::NO_TITLE)
    }
}

/// Parse an index response body into its search items.
///
/// A body that is JSON but has no `downloads` array yields no items.
pub fn parse_downloads(text: &str) -> Result<Vec<SearchItem>, FetchError> {
    let json: Value = serde_json::from_str(text)?;

    Ok(json
        .get("downloads")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(SearchItem::from_value).collect())
        .unwrap_or_default())
}

/// Outcome of requesting a single page
#[derive(Debug)]
pub enum PageOutcome {
    Items(Vec<SearchItem>),
    Failed { offset: u32, error: FetchError },
}

/// Items and failures accumulated over all pages
#[derive(Debug, Default)]
pub struct SearchOutcome {
    pub items: Vec<SearchItem>,
    pub failures: Vec<Failure>,
}

impl SearchOutcome {
    /// Fold one page into the outcome
    pub fn absorb(mut self, page: PageOutcome) -> Self {
        match page {
            PageOutcome::Items(items) => self.items.extend(items),
            PageOutcome::Failed { offset, error } => self.failures.push(Failure::new(
                FailureStage::Search,
                format!("offset {}", offset),
                &error,
            )),
        }
        self
    }
}
