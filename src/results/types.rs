//! Result type definitions

use crate::error::FetchError;
use serde::{Deserialize, Serialize};

/// One resolved update package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Title of the search item
    pub title: String,
    /// Direct download link, `null` when it could not be resolved
    pub url: Option<String>,
}

impl Package {
    pub fn new(title: impl Into<String>, url: Option<String>) -> Self {
        Self {
            title: title.into(),
            url,
        }
    }
}

/// Pipeline stage a failure happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    Search,
    Detail,
    Extraction,
}

impl std::fmt::Display for FailureStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Search => write!(f, "search"),
            Self::Detail => write!(f, "detail"),
            Self::Extraction => write!(f, "extraction"),
        }
    }
}

/// A step that did not succeed, kept for the partial-failure summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub stage: FailureStage,
    /// Search offset or detail URL the failure belongs to
    pub target: String,
    pub error: String,
}

impl Failure {
    pub fn new(stage: FailureStage, target: impl Into<String>, error: &FetchError) -> Self {
        Self {
            stage,
            target: target.into(),
            error: error.to_string(),
        }
    }
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}: {}", self.stage, self.target, self.error)
    }
}
