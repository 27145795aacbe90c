//! The consolidated report printed once per run

use super::types::{Failure, Package};
use serde::{Deserialize, Serialize};

/// Number of raw search items plus one package per item, in search order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchReport {
    /// Raw search items found, whether or not their download link resolved
    pub count: usize,
    pub packages: Vec<Package>,
    /// Pages, detail fetches and extractions that failed during the run
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<Failure>,
}

impl SearchReport {
    pub fn new(count: usize, packages: Vec<Package>, failures: Vec<Failure>) -> Self {
        Self {
            count,
            packages,
            failures,
        }
    }

    /// Packages whose download link was resolved
    pub fn resolved(&self) -> usize {
        self.packages.iter().filter(|p| p.url.is_some()).count()
    }

    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Serialize with a one-space indent
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;
        // serde_json only ever writes valid UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
