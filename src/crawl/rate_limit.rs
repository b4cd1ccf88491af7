// src/crawl/rate_limit.rs
// =============================================================================
// Politeness: a fixed pause after every network request.
//
// The pause is applied after full fetches and existence checks alike, whether
// the request succeeded or not. Requests are strictly sequential, so a simple
// sleep is all the coordination needed.
// =============================================================================

use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct RateLimiter {
    gap: Duration,
}

impl RateLimiter {
    pub fn new(gap: Duration) -> Self {
        Self { gap }
    }

    pub fn gap(&self) -> Duration {
        self.gap
    }

    /// Waits out the configured gap. Call once after each request.
    pub async fn pause(&self) {
        if self.gap.is_zero() {
            return;
        }
        debug!(gap_ms = self.gap.as_millis() as u64, "Rate limit pause");
        tokio::time::sleep(self.gap).await;
    }
}
