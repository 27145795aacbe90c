//! Detail stage
//!
//! Fetches each search item's detail page and extracts the download link
//! embedded in it as `"metaUrl": "<url>"`.

mod extractor;
mod resolver;

pub use extractor::{MatchMode, MetaUrlExtractor};
pub use resolver::{DetailResolver, Resolution};
