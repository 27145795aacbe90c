//! metaUrl extraction

use crate::error::FetchError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Leading `.*` cannot cross a newline: the first line holding a match wins,
/// and within that line the greedy prefix selects the last occurrence.
static GREEDY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#".*"metaUrl"\s*:\s*"(https?://[^"\s]+)""#).unwrap());

static FIRST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""metaUrl"\s*:\s*"(https?://[^"\s]+)""#).unwrap());

/// Which occurrence wins when a detail page carries several metaUrl keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Last occurrence on the first line that has one
    #[default]
    Greedy,
    /// First occurrence in the body
    First,
}

impl FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "greedy" | "last" => Ok(Self::Greedy),
            "first" => Ok(Self::First),
            other => Err(format!("unknown match mode '{}'", other)),
        }
    }
}

/// Pulls the download link out of a detail page body
#[derive(Debug, Clone, Copy, Default)]
pub struct MetaUrlExtractor {
    mode: MatchMode,
}

impl MetaUrlExtractor {
    pub fn new(mode: MatchMode) -> Self {
        Self { mode }
    }

    fn pattern(&self) -> &'static Regex {
        match self.mode {
            MatchMode::Greedy => &GREEDY,
            MatchMode::First => &FIRST,
        }
    }

    /// Extract the metaUrl value from `body`
    pub fn extract(&self, body: &str) -> Result<String, FetchError> {
        self.pattern()
            .captures(body)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or(FetchError::MetaUrlNotFound)
    }
}
