//! HTTP networking module
//!
//! Provides the HTTP client used for the downloads index and detail pages.

mod client;
mod user_agent;

pub use client::{HttpClient, HttpResponse};
pub use user_agent::default_user_agent;
