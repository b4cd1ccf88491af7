// src/crawl/frontier.rs
// =============================================================================
// The crawl frontier: pages that passed their existence check and still need
// a full GET.
//
// Ordering: last-in-first-out. The most recently discovered page is explored
// next, which makes the crawl depth-first. A plain Vec is enough because we
// only ever touch one end.
//
// Termination: a URL is pushed only right after it was marked visited, and a
// visited URL is never checked again, so each page enters the frontier at
// most once. On a finite site the stack must eventually run dry.
// =============================================================================

use super::normalize::AbsoluteUrl;

#[derive(Debug, Default)]
pub struct Frontier {
    stack: Vec<AbsoluteUrl>,
}

impl Frontier {
    /// Creates a frontier holding just the seed URL
    pub fn seeded(seed: AbsoluteUrl) -> Self {
        Self { stack: vec![seed] }
    }

    pub fn push(&mut self, url: AbsoluteUrl) {
        self.stack.push(url);
    }

    pub fn pop(&mut self) -> Option<AbsoluteUrl> {
        self.stack.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }
}
