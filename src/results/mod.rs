//! Report types
//!
//! This module defines the packages and the report printed at the end of a run.

mod report;
mod types;

pub use report::SearchReport;
pub use types::*;
