// src/checker/mod.rs
// =============================================================================
// This module contains the crawler's collaborators that touch the outside
// world: the HTTP fetcher and the HTML reference extractor.
//
// Submodules:
// - http: GET pages and HEAD-check links/images
// - html: Extracts link and image references from HTML pages
//
// This file (mod.rs) is the module root - it ties everything together and
// exports the public API that other parts of our application can use.
// =============================================================================

mod html;
mod http;

// Re-export public items from submodules
// This lets users write `checker::HttpFetcher` instead of
// `checker::http::HttpFetcher`
pub use html::{HtmlExtractor, LinkExtractor, Reference, ReferenceKind};
pub use http::{
    is_html, FetcherConfig, HttpFetcher, PageFetcher, PageResponse, ProbeResponse,
    VerificationOutcome,
};
