//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests made during a scrape, including:
//! - Building the blocking HTTP client with the session headers and timeout
//! - GET requests for feed pages, update payloads and photo pages
//! - Error classification into a [`FetchResult`]

use crate::config::SessionConfig;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug, Clone)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Response body
        body: String,
    },

    /// Server answered with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, unreadable body, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

/// Something that can GET a URL
///
/// The pagination driver and the image extractor share one implementation for
/// the lifetime of a scrape.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> FetchResult;
}

/// [`Fetcher`] backed by a blocking reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds the client from session configuration
    pub fn from_config(config: &SessionConfig) -> Result<Self, reqwest::Error> {
        build_http_client(config).map(Self::new)
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> FetchResult {
        fetch_url(&self.client, url)
    }
}

/// Builds an HTTP client with the session's user agent, language and timeout
///
/// # Example
///
/// ```no_run
/// use fb_post_scraper::config::SessionConfig;
/// use fb_post_scraper::feed::build_http_client;
///
/// let client = build_http_client(&SessionConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &SessionConfig) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    if let Ok(language) = HeaderValue::from_str(&config.accept_language) {
        headers.insert(ACCEPT_LANGUAGE, language);
    } else {
        tracing::warn!(
            "Ignoring invalid accept-language header value: {}",
            config.accept_language
        );
    }

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)
        .timeout(Duration::from_secs(config.timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the outcome
///
/// | Condition | Result |
/// |-----------|--------|
/// | HTTP 2xx with readable body | `Success` |
/// | Any other HTTP status | `HttpError` |
/// | Timeout, connection failure, body read failure | `NetworkError` |
///
/// Nothing is retried.
pub fn fetch_url(client: &Client, url: &str) -> FetchResult {
    tracing::trace!("GET {}", url);

    match client.get(url).send() {
        Ok(response) => {
            let status = response.status();
            let final_url = response.url().to_string();

            if !status.is_success() {
                return FetchResult::HttpError {
                    status_code: status.as_u16(),
                };
            }

            match response.text() {
                Ok(body) => FetchResult::Success {
                    final_url,
                    status_code: status.as_u16(),
                    body,
                },
                Err(e) => FetchResult::NetworkError {
                    error: e.to_string(),
                },
            }
        }
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                "Connection refused".to_string()
            } else {
                e.to_string()
            };
            FetchResult::NetworkError { error }
        }
    }
}
