// src/error.rs
// =============================================================================
// This file defines the error type shared by the crawl engine and its
// collaborators (fetcher, extractor, report sink).
//
// How errors flow:
// - MalformedUrl: a single reference is skipped, the crawl goes on
// - Transport / HttpStatus: a check failed, it becomes a report row
// - SeedUnreachable, InvalidConfig, sink errors: fatal, the run stops
//
// Rust concepts:
// - thiserror: derives std::error::Error and Display from attributes
// - #[from]: lets the ? operator convert other error types into ours
// =============================================================================

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrawlError {
    /// A link reference could not be resolved into an absolute URL
    #[error("Malformed URL '{reference}': {source}")]
    MalformedUrl {
        reference: String,
        #[source]
        source: url::ParseError,
    },

    /// The request never got a response (timeout, DNS, TLS, refused, ...)
    #[error("{0}")]
    Transport(String),

    /// The server answered with a non-success status
    #[error("{0}")]
    HttpStatus(StatusCode),

    /// The base URL itself could not be retrieved, so there is nothing to crawl
    #[error("Could not retrieve seed page {url}: {reason}")]
    SeedUnreachable { url: String, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Report I/O failure: {0}")]
    SinkIo(#[from] std::io::Error),

    #[error("CSV report failure: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON report failure: {0}")]
    Json(#[from] serde_json::Error),

    /// The HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, CrawlError>;
