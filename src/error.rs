//! Errors raised while talking to the downloads index and detail pages

use thiserror::Error;

/// Failure of a single fetch or extraction step
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP error {status} from {url}")]
    Status { status: u16, url: String },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("request timeout of {0} seconds is out of range")]
    InvalidTimeout(f64),

    #[error("search item has no detail url")]
    MissingUrl,

    #[error("no metaUrl found in detail page")]
    MetaUrlNotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        let err = FetchError::Status {
            status: 503,
            url: "http://example/kb/index".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP error 503 from http://example/kb/index");
    }

    #[test]
    fn test_decode_from_serde() {
        let err: FetchError = serde_json::from_str::<serde_json::Value>("<html>")
            .unwrap_err()
            .into();
        assert!(matches!(err, FetchError::Decode(_)));
    }
}
