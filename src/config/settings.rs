//! Settings structures for dmgmonkey configuration

use crate::detail::MatchMode;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

/// Main settings structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub search: SearchSettings,
    pub outgoing: OutgoingSettings,
    pub extraction: ExtractionSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with environment variables (DMGMONKEY_* prefix)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("DMGMONKEY_ENDPOINT") {
            self.search.endpoint = val;
        }
        if let Ok(val) = std::env::var("DMGMONKEY_LOCALE") {
            self.search.locale = val;
        }
        if let Some(pages) = parse_env("DMGMONKEY_PAGES") {
            self.search.pages = pages;
        }
        if let Some(timeout) = parse_env("DMGMONKEY_TIMEOUT") {
            self.outgoing.request_timeout = timeout;
        }
        if let Some(concurrency) = parse_env("DMGMONKEY_CONCURRENCY") {
            self.outgoing.detail_concurrency = concurrency;
        }
        if let Some(mode) = parse_env("DMGMONKEY_MATCH_MODE") {
            self.extraction.match_mode = mode;
        }
    }

    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if let Err(e) = url::Url::parse(&self.search.endpoint) {
            bail!("invalid search endpoint '{}': {}", self.search.endpoint, e);
        }
        if self.search.pages == 0 {
            bail!("search.pages must be at least 1");
        }
        if self.outgoing.detail_concurrency == 0 {
            bail!("outgoing.detail_concurrency must be at least 1");
        }
        let timeout = self.outgoing.request_timeout;
        if timeout <= 0.0 || Duration::try_from_secs_f64(timeout).is_err() {
            bail!(
                "outgoing.request_timeout must be a positive number of seconds, got {}",
                timeout
            );
        }
        Ok(())
    }
}

/// Read and parse an environment variable, warning when it is set but malformed
fn parse_env<T: FromStr>(key: &str) -> Option<T> {
    let val = std::env::var(key).ok()?;
    match val.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!("Ignoring unparseable {}={}", key, val);
            None
        }
    }
}

/// Downloads index settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Search endpoint URL
    pub endpoint: String,
    /// Locale sent with every search request
    pub locale: String,
    /// Sort order
    pub sort: String,
    /// Facet filter
    pub facet: String,
    /// Category filter (empty = all)
    pub category: String,
    /// Number of result pages to walk (offsets `0..pages`)
    pub pages: u32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://support.apple.com/kb/index".to_string(),
            locale: "en_US".to_string(),
            sort: "relevancy".to_string(),
            facet: "all".to_string(),
            category: String::new(),
            pages: crate::DEFAULT_PAGE_COUNT,
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Request timeout in seconds
    pub request_timeout: f64,
    /// User agent string (none = dmgmonkey/<version>)
    pub user_agent: Option<String>,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
    /// Detail pages fetched at the same time
    pub detail_concurrency: usize,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: crate::DEFAULT_TIMEOUT,
            user_agent: None,
            verify_ssl: true,
            proxies: ProxySettings::default(),
            detail_concurrency: 4,
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

/// metaUrl extraction settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionSettings {
    pub match_mode: MatchMode,
}
