//! Search stage
//!
//! Walks the fixed offset range of the downloads index for a query and
//! collects every search item, recording pages that could not be read.

mod executor;
mod models;

pub use executor::Search;
pub use models::*;
