// src/checker/html.rs
// =============================================================================
// This module pulls link and image references out of an HTML page.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// We do NOT resolve or filter anything here. The raw attribute value is
// handed to the crawl engine, which owns normalization and scope decisions.
//
// Rust concepts:
// - Traits: the engine only needs "something that extracts references"
// - Iterators: select() yields elements in document order
// =============================================================================

use scraper::{Html, Selector};

use crate::crawl::AbsoluteUrl;

/// What kind of element a reference came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// <a href="...">
    Link,
    /// <img src="...">
    Image,
}

/// One href/src found on a page, not yet resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub kind: ReferenceKind,
    pub source: AbsoluteUrl,
    pub target: String,
}

pub trait LinkExtractor {
    /// All Link and Image references in `body`, in document order,
    /// each tagged with `page` as its source
    fn extract_references(&self, body: &str, page: &AbsoluteUrl) -> Vec<Reference>;
}

/// LinkExtractor built on scraper's CSS selectors
pub struct HtmlExtractor {
    selector: Selector,
}

impl HtmlExtractor {
    pub fn new() -> Self {
        // One combined selector so links and images come out interleaved
        // exactly as they appear in the document.
        // This selector is a constant and known to be valid.
        let selector = Selector::parse("a[href], img[src]").unwrap();
        Self { selector }
    }
}

impl Default for HtmlExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkExtractor for HtmlExtractor {
    fn extract_references(&self, body: &str, page: &AbsoluteUrl) -> Vec<Reference> {
        let document = Html::parse_document(body);

        document
            .select(&self.selector)
            .filter_map(|element| {
                let el = element.value();
                let (kind, target) = match el.name() {
                    "a" => (ReferenceKind::Link, el.attr("href")?),
                    "img" => (ReferenceKind::Image, el.attr("src")?),
                    _ => return None,
                };
                Some(Reference {
                    kind,
                    source: page.clone(),
                    target: target.to_string(),
                })
            })
            .collect()
    }
}
