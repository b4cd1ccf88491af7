// src/crawl/visited.rs
// =============================================================================
// The visited set: every URL whose existence check succeeded.
//
// It is the only deduplication mechanism in the crawler. Once a URL is in
// here it is never requested again (neither HEAD nor GET) for the rest of
// the run. Entries are never removed.
//
// Failed URLs are NOT inserted, so a broken link referenced from two pages
// is checked (and reported) once per referencing page.
// =============================================================================

use std::collections::HashSet;

use super::normalize::AbsoluteUrl;

#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: HashSet<AbsoluteUrl>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, url: &AbsoluteUrl) -> bool {
        self.urls.contains(url)
    }

    /// Marks a URL as verified. Marking it twice is a no-op.
    ///
    /// Returns true if the URL was not already present.
    pub fn mark_visited(&mut self, url: AbsoluteUrl) -> bool {
        self.urls.insert(url)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }
}
