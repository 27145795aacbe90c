//! dmgmonkey: search macOS update packages and resolve their download links
//!
//! Queries the support downloads index for a keyword, follows every hit to its
//! detail page and pulls the embedded `metaUrl` out of it.

pub mod config;
pub mod detail;
pub mod error;
pub mod network;
pub mod pipeline;
pub mod results;
pub mod search;

pub use config::Settings;
pub use error::FetchError;
pub use pipeline::Pipeline;
pub use results::{Package, SearchReport};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default timeout for outgoing requests in seconds
pub const DEFAULT_TIMEOUT: f64 = 30.0;

/// Number of result pages the downloads index serves for a query.
///
/// Offsets past 16 come back empty regardless of the `totalresults` value the
/// index reports, so the search stage always walks offsets `0..17`.
pub const DEFAULT_PAGE_COUNT: u32 = 17;

/// Title used for search items that carry none
pub const NO_TITLE: &str = "<none>";
