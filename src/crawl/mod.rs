// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Depth-first crawling from a base URL (last discovered page goes first)
// - Every URL verified at most once after it succeeds
// - Only pages whose URL contains the base URL are crawled further
// - Polite crawling: one request at a time, fixed pause after each one
//
// Submodules:
// - normalize: canonical absolute URLs
// - visited: URLs that already passed their check
// - frontier: pages waiting for a full fetch
// - rate_limit: the pause between requests
// - engine: ties it all together
// =============================================================================

mod engine;
mod frontier;
mod normalize;
mod rate_limit;
mod visited;

pub use engine::{CrawlSummary, Crawler};
pub use normalize::AbsoluteUrl;
pub use rate_limit::RateLimiter;
