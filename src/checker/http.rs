// src/checker/http.rs
// =============================================================================
// This module talks to web servers.
//
// Key functionality:
// - Full GET of a page that is going to be crawled (we need its HTML)
// - Lightweight HEAD "existence check" for every link and image
//   (no body download, we only care whether it loads)
// - Turns transport errors (timeout, DNS, TLS, ...) into readable text that
//   ends up in the report
//
// The crawl engine only sees the PageFetcher trait, so tests can swap the
// network for an in-memory fake.
//
// Rust concepts:
// - Traits: an interface the engine is generic over
// - async fn in traits: each request is awaited, one at a time
// - Result<T, E>: transport errors are values, not panics
// =============================================================================

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use std::error::Error as _;
use std::time::Duration;
use tracing::warn;

use crate::crawl::AbsoluteUrl;
use crate::error::{CrawlError, Result};

/// What a full GET brings back
#[derive(Debug, Clone)]
pub struct PageResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

/// What a HEAD existence check brings back
#[derive(Debug, Clone)]
pub struct ProbeResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
}

/// Result of verifying one reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// 2xx response, with whatever content type the server announced
    Success { content_type: Option<String> },
    /// Non-2xx status or transport error, described for the report
    Failure { status: String },
}

impl VerificationOutcome {
    // Collapses a probe result into success/failure
    //
    // HTTP status codes:
    // - 200-299: Success
    // - anything else (after redirects were followed): Failure
    // - no response at all: Failure with the transport error text
    pub fn from_probe(result: Result<ProbeResponse>) -> Self {
        match result {
            Ok(probe) if probe.status.is_success() => VerificationOutcome::Success {
                content_type: probe.content_type,
            },
            Ok(probe) => VerificationOutcome::Failure {
                status: CrawlError::HttpStatus(probe.status).to_string(),
            },
            Err(e) => VerificationOutcome::Failure {
                status: e.to_string(),
            },
        }
    }
}

/// Whether a Content-Type header value announces an HTML document
pub fn is_html(content_type: Option<&str>) -> bool {
    content_type
        .map(|ct| ct.to_ascii_lowercase().contains("text/html"))
        .unwrap_or(false)
}

/// The two kinds of request the crawl engine needs
#[allow(async_fn_in_trait)]
pub trait PageFetcher {
    /// GET the whole document. Non-2xx statuses are returned, not errors;
    /// only a missing response is an Err.
    async fn fetch_full(&self, url: &AbsoluteUrl) -> Result<PageResponse>;

    /// HEAD the URL to see whether it loads
    async fn check_exists(&self, url: &AbsoluteUrl) -> Result<ProbeResponse>;
}

/// Settings for the real HTTP client
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

/// PageFetcher backed by a reqwest Client
///
/// The client is built once and reused for every request (connection pooling).
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(5)) // Follow up to 5 redirects
            .build()?;

        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch_full(&self, url: &AbsoluteUrl) -> Result<PageResponse> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| CrawlError::Transport(categorize_error(&e)))?;

        let status = response.status();
        let content_type = content_type_of(&response);

        // A body that fails halfway still leaves us with a page to (not) parse
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(url = %url, error = %categorize_error(&e), "Could not read page body");
                String::new()
            }
        };

        Ok(PageResponse {
            status,
            content_type,
            body,
        })
    }

    async fn check_exists(&self, url: &AbsoluteUrl) -> Result<ProbeResponse> {
        let response = self
            .client
            .head(url.as_str())
            .send()
            .await
            .map_err(|e| CrawlError::Transport(categorize_error(&e)))?;

        Ok(ProbeResponse {
            status: response.status(),
            content_type: content_type_of(&response),
        })
    }
}

fn content_type_of(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

// Categorizes different error types from reqwest
//
// reqwest errors can happen for many reasons:
// - Network timeout
// - DNS resolution failure
// - SSL certificate issues
// - Too many redirects
// - etc.
//
// The top-level message of a reqwest error is vague ("error sending request"),
// so the whole source chain is inspected.
fn categorize_error(error: &reqwest::Error) -> String {
    let chain = error_chain(error).to_lowercase();

    if error.is_timeout() {
        "Request timed out".to_string()
    } else if error.is_redirect() {
        "Too many redirects".to_string()
    } else if chain.contains("dns") || chain.contains("failed to lookup address") {
        "Could not resolve hostname".to_string()
    } else if chain.contains("certificate") || chain.contains("tls") || chain.contains("ssl") {
        "SSL certificate error".to_string()
    } else if error.is_connect() {
        "Connection failed".to_string()
    } else {
        error_chain(error)
    }
}

fn error_chain(error: &reqwest::Error) -> String {
    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}
