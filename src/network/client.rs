//! HTTP client for the downloads index and detail pages

use super::user_agent::{accept_html, accept_json, default_user_agent};
use crate::config::OutgoingSettings;
use crate::error::FetchError;
use reqwest::{header, Client, RequestBuilder, Response};
use std::time::Duration;
use tracing::debug;

/// HTTP client wrapper configured from [`OutgoingSettings`]
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    user_agent: String,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, FetchError> {
        Self::with_settings(&OutgoingSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &OutgoingSettings) -> Result<Self, FetchError> {
        let timeout = Duration::try_from_secs_f64(settings.request_timeout)
            .map_err(|_| FetchError::InvalidTimeout(settings.request_timeout))?;

        let mut builder = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .brotli(true);

        if !settings.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        if let Some(ref proxy_url) = settings.proxies.all {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        } else {
            if let Some(ref http) = settings.proxies.http {
                builder = builder.proxy(reqwest::Proxy::http(http)?);
            }
            if let Some(ref https) = settings.proxies.https {
                builder = builder.proxy(reqwest::Proxy::https(https)?);
            }
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            user_agent: settings
                .user_agent
                .clone()
                .unwrap_or_else(default_user_agent),
        })
    }

    /// GET a page as-is. The URL is used verbatim, no parameters are added.
    pub async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        let request = self
            .client
            .get(url)
            .header(header::ACCEPT, accept_html());
        self.send(request).await
    }

    /// GET with query parameters appended to `url`
    pub async fn get_with_params(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<HttpResponse, FetchError> {
        let request = self
            .client
            .get(url)
            .header(header::ACCEPT, accept_json())
            .query(params);
        self.send(request).await
    }

    async fn send(&self, request: RequestBuilder) -> Result<HttpResponse, FetchError> {
        let response = request
            .header(header::USER_AGENT, &self.user_agent)
            .send()
            .await?;

        HttpResponse::read(response).await
    }

    /// Get current user agent
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

/// Buffered HTTP response
#[derive(Debug)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response URL (after redirects)
    pub url: String,
    /// Response body as text
    pub text: String,
}

impl HttpResponse {
    async fn read(response: Response) -> Result<Self, FetchError> {
        let status = response.status().as_u16();
        let url = response.url().to_string();
        let text = response.text().await?;

        debug!("GET {} -> {} ({} bytes)", url, status, text.len());

        Ok(Self { status, url, text })
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-2xx response into [`FetchError::Status`]
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(FetchError::Status {
                status: self.status,
                url: self.url,
            })
        }
    }
}
