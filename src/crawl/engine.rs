// src/crawl/engine.rs
// =============================================================================
// The traversal engine: walks the site one page at a time and reports every
// link or image that fails to load.
//
// How it works:
// 1. Pop the next page from the frontier (the seed URL first)
// 2. GET the page
// 3. Extract all <a href> and <img src> references from it
// 4. For each reference, in document order:
//    a. resolve it against the page URL (malformed ones are skipped)
//    b. skip anything that is not http/https
//    c. skip anything already verified
//    d. HEAD it
//       - success: mark verified; in-scope HTML links go on the frontier
//       - failure: write a report row (the URL stays unverified)
// 5. Repeat until the frontier is empty
//
// Politeness:
// - Exactly one request in flight at any time
// - A fixed pause after every request, successful or not
//
// All per-page and per-reference failures stay in here and only show up as
// report rows. The errors that escape run() are fatal: an unreachable seed
// or a report that cannot be written.
// =============================================================================

use tracing::{debug, info, warn};

use super::frontier::Frontier;
use super::normalize::{normalize, AbsoluteUrl};
use super::rate_limit::RateLimiter;
use super::visited::VisitedSet;
use crate::checker::{
    is_html, LinkExtractor, PageFetcher, Reference, ReferenceKind, VerificationOutcome,
};
use crate::error::{CrawlError, Result};
use crate::report::{FailureKind, FailureRecord, ReportSink};

/// Counters reported at the end of a crawl
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    /// Pages retrieved with a full GET (the seed included)
    pub pages_fetched: usize,
    /// Existence checks issued
    pub references_checked: usize,
    /// Report rows written
    pub failures: usize,
}

// Everything that changes while crawling. Created fresh for each run and
// owned by it; nothing outside run() ever sees it.
struct CrawlState {
    frontier: Frontier,
    visited: VisitedSet,
    summary: CrawlSummary,
}

impl CrawlState {
    fn seeded(seed: AbsoluteUrl) -> Self {
        // The seed counts as verified up front, so a page linking back to the
        // home page never triggers a second fetch of it
        let mut visited = VisitedSet::new();
        visited.mark_visited(seed.clone());

        Self {
            frontier: Frontier::seeded(seed),
            visited,
            summary: CrawlSummary::default(),
        }
    }
}

pub struct Crawler<F, E> {
    fetcher: F,
    extractor: E,
    limiter: RateLimiter,
    seed: AbsoluteUrl,
    // Textual scope prefix: the normalized base URL
    scope: String,
}

impl<F: PageFetcher, E: LinkExtractor> Crawler<F, E> {
    // Creates a crawler for one site
    //
    // Parameters:
    //   base_url: seed page, and the substring a URL must contain to be crawled
    //   fetcher: issues GET and HEAD requests
    //   extractor: finds references in fetched pages
    //   limiter: pause applied after each request
    pub fn new(base_url: &str, fetcher: F, extractor: E, limiter: RateLimiter) -> Result<Self> {
        let seed = AbsoluteUrl::parse(base_url.trim())?;

        if !seed.is_http() {
            return Err(CrawlError::InvalidConfig(format!(
                "base URL must be http or https, got '{}'",
                seed.scheme()
            )));
        }

        let scope = scope_of(&seed);

        Ok(Self {
            fetcher,
            extractor,
            limiter,
            seed,
            scope,
        })
    }

    pub fn seed(&self) -> &AbsoluteUrl {
        &self.seed
    }

    /// Whether a URL is part of the site being crawled.
    ///
    /// This is a plain substring test against the normalized base URL
    /// (lowercased scheme and host, no fragment), not a host or
    /// path comparison, so e.g. `http://example.org.mirror.net/` also matches
    /// a base of `http://example.org`.
    pub fn in_scope(&self, url: &AbsoluteUrl) -> bool {
        url.as_str().contains(&self.scope)
    }

    /// Crawls the whole site, writing one row to `sink` per failure.
    ///
    /// The sink is not closed here; that is the caller's job once this returns.
    pub async fn run(&self, sink: &mut dyn ReportSink) -> Result<CrawlSummary> {
        info!(base = %self.seed, gap_ms = self.limiter.gap().as_millis() as u64, "Starting crawl");

        let mut state = CrawlState::seeded(self.seed.clone());
        let mut seed_pending = true;

        while let Some(page_url) = state.frontier.pop() {
            let body = if seed_pending {
                seed_pending = false;
                self.fetch_seed(&page_url).await?
            } else {
                self.fetch_page(&page_url).await
            };
            state.summary.pages_fetched += 1;

            let references = self.extractor.extract_references(&body, &page_url);
            info!(
                url = %page_url,
                references = references.len(),
                queued = state.frontier.len(),
                "Crawled page"
            );

            for reference in references {
                self.verify(reference, &mut state, sink).await?;
            }
        }
        debug_assert!(state.frontier.is_empty());

        info!(
            pages = state.summary.pages_fetched,
            checked = state.summary.references_checked,
            verified = state.visited.len(),
            failures = state.summary.failures,
            "Crawl finished"
        );
        Ok(state.summary)
    }

    // The seed has no earlier existence check vouching for it, so if it
    // cannot be retrieved there is nothing to crawl
    async fn fetch_seed(&self, url: &AbsoluteUrl) -> Result<String> {
        let result = self.fetcher.fetch_full(url).await;
        self.limiter.pause().await;

        let page = result.map_err(|e| CrawlError::SeedUnreachable {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        if !page.status.is_success() {
            return Err(CrawlError::SeedUnreachable {
                url: url.to_string(),
                reason: CrawlError::HttpStatus(page.status).to_string(),
            });
        }

        Ok(page.body)
    }

    // Every other page already passed a HEAD check. If the GET fails anyway
    // we log it and carry on with whatever body we got (possibly none).
    async fn fetch_page(&self, url: &AbsoluteUrl) -> String {
        let result = self.fetcher.fetch_full(url).await;
        self.limiter.pause().await;

        match result {
            Ok(page) => {
                if !page.status.is_success() {
                    warn!(
                        url = %url,
                        status = %page.status,
                        content_type = page.content_type.as_deref().unwrap_or("unknown"),
                        "Page failed on full fetch"
                    );
                }
                page.body
            }
            Err(e) => {
                warn!(url = %url, error = %e, "Page failed on full fetch");
                String::new()
            }
        }
    }

    async fn verify(
        &self,
        reference: Reference,
        state: &mut CrawlState,
        sink: &mut dyn ReportSink,
    ) -> Result<()> {
        let target = match normalize(&reference.target, &reference.source) {
            Ok(url) => url,
            Err(e) => {
                debug!(source = %reference.source, error = %e, "Skipping malformed reference");
                return Ok(());
            }
        };

        if !target.is_http() {
            debug!(url = %target, "Skipping non-http reference");
            return Ok(());
        }

        if state.visited.contains(&target) {
            debug!(url = %target, "Already verified");
            return Ok(());
        }

        debug!(url = %target, kind = ?reference.kind, "Checking");
        let result = self.fetcher.check_exists(&target).await;
        self.limiter.pause().await;
        state.summary.references_checked += 1;

        match VerificationOutcome::from_probe(result) {
            VerificationOutcome::Success { content_type } => {
                state.visited.mark_visited(target.clone());

                if reference.kind == ReferenceKind::Link
                    && self.in_scope(&target)
                    && is_html(content_type.as_deref())
                {
                    debug!(url = %target, "Queued for crawling");
                    state.frontier.push(target);
                }
            }
            VerificationOutcome::Failure { status } => {
                let kind = match reference.kind {
                    ReferenceKind::Link => FailureKind::BrokenLink,
                    ReferenceKind::Image => FailureKind::BrokenImage,
                };
                info!(url = %target, source = %reference.source, status = %status, "Broken reference");

                // Not marked visited: another page linking here is checked again
                sink.record(&FailureRecord {
                    status,
                    kind,
                    source: reference.source,
                    destination: target,
                })?;
                state.summary.failures += 1;
            }
        }

        Ok(())
    }
}

// The url crate serializes an empty path as "/", so `http://example.org`
// comes back as `http://example.org/`. That slash is dropped again, otherwise
// `http://example.org/about` would not contain the scope.
fn scope_of(seed: &AbsoluteUrl) -> String {
    let url = seed.as_url();
    let text = seed.as_str();

    if url.path() == "/" && url.query().is_none() {
        text.strip_suffix('/').unwrap_or(text).to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::{HtmlExtractor, PageResponse, ProbeResponse};
    use crate::report::CsvReport;
    use reqwest::StatusCode;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::time::Duration;

    // --- In-memory site -----------------------------------------------------

    #[derive(Clone)]
    enum Resource {
        Page { status: u16, content_type: &'static str, body: String },
        Unreachable,
    }

    #[derive(Default)]
    struct FakeSite {
        resources: HashMap<String, Resource>,
        requests: RefCell<Vec<String>>,
    }

    impl FakeSite {
        fn html(mut self, url: &str, body: &str) -> Self {
            self.resources.insert(
                url.to_string(),
                Resource::Page {
                    status: 200,
                    content_type: "text/html; charset=utf-8",
                    body: body.to_string(),
                },
            );
            self
        }

        fn file(mut self, url: &str, status: u16, content_type: &'static str) -> Self {
            self.resources.insert(
                url.to_string(),
                Resource::Page {
                    status,
                    content_type,
                    body: String::new(),
                },
            );
            self
        }

        fn unreachable(mut self, url: &str) -> Self {
            self.resources.insert(url.to_string(), Resource::Unreachable);
            self
        }

        fn lookup(&self, verb: &str, url: &AbsoluteUrl) -> Result<(StatusCode, String, String)> {
            self.requests
                .borrow_mut()
                .push(format!("{} {}", verb, url));

            match self.resources.get(url.as_str()) {
                Some(Resource::Page {
                    status,
                    content_type,
                    body,
                }) => Ok((
                    StatusCode::from_u16(*status).unwrap(),
                    content_type.to_string(),
                    body.clone(),
                )),
                Some(Resource::Unreachable) => {
                    Err(CrawlError::Transport("Connection failed".to_string()))
                }
                None => Ok((StatusCode::NOT_FOUND, "text/html".to_string(), String::new())),
            }
        }

        fn requests(&self) -> Vec<String> {
            self.requests.borrow().clone()
        }

        fn count(&self, request: &str) -> usize {
            self.requests.borrow().iter().filter(|r| *r == request).count()
        }
    }

    impl PageFetcher for &FakeSite {
        async fn fetch_full(&self, url: &AbsoluteUrl) -> Result<PageResponse> {
            let (status, content_type, body) = self.lookup("GET", url)?;
            Ok(PageResponse {
                status,
                content_type: Some(content_type),
                body,
            })
        }

        async fn check_exists(&self, url: &AbsoluteUrl) -> Result<ProbeResponse> {
            let (status, content_type, _) = self.lookup("HEAD", url)?;
            Ok(ProbeResponse {
                status,
                content_type: Some(content_type),
            })
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        records: Vec<FailureRecord>,
    }

    impl ReportSink for RecordingSink {
        fn record(&mut self, record: &FailureRecord) -> Result<()> {
            self.records.push(record.clone());
            Ok(())
        }

        fn close(&mut self) -> Result<()> {
            Ok(())
        }
    }

    fn crawler<'a>(base: &str, site: &'a FakeSite) -> Crawler<&'a FakeSite, HtmlExtractor> {
        Crawler::new(
            base,
            site,
            HtmlExtractor::new(),
            RateLimiter::new(Duration::ZERO),
        )
        .unwrap()
    }

    async fn crawl(base: &str, site: &FakeSite) -> (CrawlSummary, Vec<FailureRecord>) {
        let mut sink = RecordingSink::default();
        let summary = crawler(base, site).run(&mut sink).await.unwrap();
        (summary, sink.records)
    }

    fn url(s: &str) -> AbsoluteUrl {
        AbsoluteUrl::parse(s).unwrap()
    }

    // --- Scenarios ----------------------------------------------------------

    #[tokio::test]
    async fn test_broken_image_reported_and_page_enqueued() {
        let site = FakeSite::default()
            .html(
                "http://example.org/",
                r#"<a href="http://example.org/about">About</a>
                   <img src="http://example.org/logo.png">"#,
            )
            .html("http://example.org/about", "<p>About us</p>")
            .file("http://example.org/logo.png", 404, "text/html");

        let (summary, records) = crawl("http://example.org", &site).await;

        assert_eq!(
            records,
            vec![FailureRecord {
                status: "404 Not Found".to_string(),
                kind: FailureKind::BrokenImage,
                source: url("http://example.org/"),
                destination: url("http://example.org/logo.png"),
            }]
        );
        assert_eq!(site.count("GET http://example.org/about"), 1);
        assert_eq!(summary.pages_fetched, 2);
        assert_eq!(summary.failures, 1);
    }

    #[tokio::test]
    async fn test_mailto_is_never_requested() {
        let site = FakeSite::default().html(
            "http://example.org/",
            r#"<a href="mailto:someone@example.org">Mail</a>
               <a href="javascript:void(0)">JS</a>"#,
        );

        let (summary, records) = crawl("http://example.org", &site).await;

        assert_eq!(site.requests(), vec!["GET http://example.org/"]);
        assert!(records.is_empty());
        assert_eq!(summary.references_checked, 0);
    }

    #[tokio::test]
    async fn test_external_html_checked_but_not_crawled() {
        let site = FakeSite::default()
            .html(
                "http://example.org/",
                r#"<a href="http://external.org/page">Elsewhere</a>"#,
            )
            .html("http://external.org/page", "<a href='/more'>more</a>");

        let (_, records) = crawl("http://example.org", &site).await;

        assert_eq!(
            site.requests(),
            vec!["GET http://example.org/", "HEAD http://external.org/page"]
        );
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_cycle_visits_each_page_once() {
        let site = FakeSite::default()
            .html("http://example.org/", r#"<a href="/a">A</a>"#)
            .html("http://example.org/a", r#"<a href="/b">B</a><a href="/">Home</a>"#)
            .html("http://example.org/b", r#"<a href="/a">A</a><a href="/">Home</a>"#);

        let (summary, records) = crawl("http://example.org", &site).await;

        assert_eq!(summary.pages_fetched, 3);
        assert_eq!(site.count("GET http://example.org/"), 1);
        assert_eq!(site.count("GET http://example.org/a"), 1);
        assert_eq!(site.count("GET http://example.org/b"), 1);
        assert_eq!(site.count("HEAD http://example.org/a"), 1);
        assert_eq!(site.count("HEAD http://example.org/"), 0);
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_verified_url_is_not_checked_again() {
        let site = FakeSite::default()
            .html(
                "http://example.org/",
                r#"<a href="/one">1</a><a href="/two">2</a><img src="/shared.png">"#,
            )
            .html("http://example.org/one", r#"<img src="/shared.png#x">"#)
            .html("http://example.org/two", r#"<img src="/shared.png">"#)
            .file("http://example.org/shared.png", 200, "image/png");

        let (_, records) = crawl("http://example.org", &site).await;

        assert_eq!(site.count("HEAD http://example.org/shared.png"), 1);
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_failed_url_is_rechecked_from_other_pages() {
        let site = FakeSite::default()
            .html(
                "http://example.org/",
                r#"<a href="/missing">gone</a><a href="/other">other</a>"#,
            )
            .html("http://example.org/other", r#"<a href="/missing">gone</a>"#);

        let (summary, records) = crawl("http://example.org", &site).await;

        assert_eq!(site.count("HEAD http://example.org/missing"), 2);
        assert_eq!(summary.failures, 2);
        let sources: Vec<_> = records.iter().map(|r| r.source.as_str()).collect();
        assert_eq!(sources, vec!["http://example.org/", "http://example.org/other"]);
        assert!(records.iter().all(|r| r.kind == FailureKind::BrokenLink));
    }

    #[tokio::test]
    async fn test_images_are_never_crawled() {
        let site = FakeSite::default()
            .html("http://example.org/", r#"<img src="/banner">"#)
            .html("http://example.org/banner", "<a href='/secret'>x</a>");

        let (summary, _) = crawl("http://example.org", &site).await;

        assert_eq!(summary.pages_fetched, 1);
        assert_eq!(site.count("GET http://example.org/banner"), 0);
    }

    #[tokio::test]
    async fn test_in_scope_non_html_is_not_crawled() {
        let site = FakeSite::default()
            .html("http://example.org/", r#"<a href="/manual.pdf">PDF</a>"#)
            .file("http://example.org/manual.pdf", 200, "application/pdf");

        let (summary, _) = crawl("http://example.org", &site).await;

        assert_eq!(summary.pages_fetched, 1);
        assert_eq!(summary.references_checked, 1);
    }

    #[tokio::test]
    async fn test_scope_is_a_substring_match() {
        let site = FakeSite::default()
            .html(
                "http://example.org/docs/",
                r#"<a href="/blog/">Blog</a><a href="http://mirror.net/?from=http://example.org/docs/">Mirror</a>"#,
            )
            .html("http://example.org/blog/", "")
            .html("http://mirror.net/?from=http://example.org/docs/", "");

        let (_, _) = crawl("http://example.org/docs/", &site).await;

        assert_eq!(site.count("GET http://example.org/blog/"), 0);
        assert_eq!(
            site.count("GET http://mirror.net/?from=http://example.org/docs/"),
            1
        );
    }

    #[tokio::test]
    async fn test_mixed_case_base_still_crawls_site() {
        let site = FakeSite::default()
            .html("http://example.org/", r#"<a href="/about">About</a>"#)
            .html("http://example.org/about", "");

        let (summary, _) = crawl("HTTP://Example.ORG", &site).await;

        assert_eq!(summary.pages_fetched, 2);
        assert_eq!(site.count("GET http://example.org/about"), 1);
    }

    #[tokio::test]
    async fn test_base_with_fragment_still_crawls_site() {
        let site = FakeSite::default()
            .html("http://example.org/", r#"<a href="/about">About</a>"#)
            .html("http://example.org/about", "");

        let (summary, _) = crawl("http://example.org/#top", &site).await;

        assert_eq!(summary.pages_fetched, 2);
        assert_eq!(site.count("GET http://example.org/about"), 1);
    }

    #[test]
    fn test_scope_of_drops_root_slash_only() {
        assert_eq!(scope_of(&url("http://example.org")), "http://example.org");
        assert_eq!(scope_of(&url("HTTP://Example.org/#x")), "http://example.org");
        assert_eq!(scope_of(&url("http://example.org/docs/")), "http://example.org/docs/");
        assert_eq!(scope_of(&url("http://example.org/?lang=en")), "http://example.org/?lang=en");
    }

    #[tokio::test]
    async fn test_failing_sink_stops_crawl() {
        struct FailingSink;

        impl ReportSink for FailingSink {
            fn record(&mut self, _record: &FailureRecord) -> Result<()> {
                Err(CrawlError::SinkIo(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "disk full",
                )))
            }

            fn close(&mut self) -> Result<()> {
                Ok(())
            }
        }

        let site = FakeSite::default().html(
            "http://example.org/",
            r#"<img src="/one.png"><img src="/two.png"><a href="/next">next</a>"#,
        );

        let err = crawler("http://example.org", &site)
            .run(&mut FailingSink)
            .await
            .unwrap_err();

        assert!(matches!(err, CrawlError::SinkIo(_)));
        assert_eq!(
            site.requests(),
            vec!["GET http://example.org/", "HEAD http://example.org/one.png"]
        );
    }

    #[tokio::test]
    async fn test_error_status_page_body_still_parsed() {
        // HEAD says fine, the GET comes back 500 but still carries links
        struct ErrorOnGet<'a>(&'a FakeSite);

        impl PageFetcher for ErrorOnGet<'_> {
            async fn fetch_full(&self, url: &AbsoluteUrl) -> Result<PageResponse> {
                let mut page = (&self.0).fetch_full(url).await?;
                if url.as_str().ends_with("/busy") {
                    page.status = StatusCode::INTERNAL_SERVER_ERROR;
                }
                Ok(page)
            }

            async fn check_exists(&self, url: &AbsoluteUrl) -> Result<ProbeResponse> {
                (&self.0).check_exists(url).await
            }
        }

        let site = FakeSite::default()
            .html("http://example.org/", r#"<a href="/busy">busy</a>"#)
            .html("http://example.org/busy", r#"<img src="/missing.png">"#);

        let crawler = Crawler::new(
            "http://example.org",
            ErrorOnGet(&site),
            HtmlExtractor::new(),
            RateLimiter::new(Duration::ZERO),
        )
        .unwrap();
        let mut sink = RecordingSink::default();
        let summary = crawler.run(&mut sink).await.unwrap();

        assert_eq!(summary.pages_fetched, 2);
        assert_eq!(sink.records.len(), 1);
        assert_eq!(sink.records[0].source, url("http://example.org/busy"));
    }

    #[tokio::test]
    async fn test_lifo_order() {
        let site = FakeSite::default()
            .html("http://example.org/", r#"<a href="/a">A</a><a href="/b">B</a>"#)
            .html("http://example.org/a", r#"<a href="/c">C</a>"#)
            .html("http://example.org/b", "")
            .html("http://example.org/c", "");

        crawl("http://example.org", &site).await;

        let gets: Vec<_> = site
            .requests()
            .into_iter()
            .filter(|r| r.starts_with("GET"))
            .collect();
        assert_eq!(
            gets,
            vec![
                "GET http://example.org/",
                "GET http://example.org/b",
                "GET http://example.org/a",
                "GET http://example.org/c",
            ]
        );
    }

    #[tokio::test]
    async fn test_malformed_reference_is_skipped_silently() {
        let site = FakeSite::default().html(
            "http://example.org/",
            r#"<a href="http://[::1">bad</a><a href="/ok">ok</a>"#,
        )
        .html("http://example.org/ok", "");

        let (summary, records) = crawl("http://example.org", &site).await;

        assert!(records.is_empty());
        assert_eq!(summary.references_checked, 1);
    }

    #[tokio::test]
    async fn test_transport_failure_becomes_report_row() {
        let site = FakeSite::default()
            .html("http://example.org/", r#"<a href="http://down.example.net/">x</a>"#)
            .unreachable("http://down.example.net/");

        let (_, records) = crawl("http://example.org", &site).await;

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, "Connection failed");
        assert_eq!(records[0].kind, FailureKind::BrokenLink);
    }

    #[tokio::test]
    async fn test_page_failing_full_fetch_does_not_stop_crawl() {
        // HEAD says fine, GET blows up
        struct Flaky<'a>(&'a FakeSite);

        impl PageFetcher for Flaky<'_> {
            async fn fetch_full(&self, url: &AbsoluteUrl) -> Result<PageResponse> {
                if url.as_str().ends_with("/flaky") {
                    return Err(CrawlError::Transport("Request timed out".to_string()));
                }
                (&self.0).fetch_full(url).await
            }

            async fn check_exists(&self, url: &AbsoluteUrl) -> Result<ProbeResponse> {
                (&self.0).check_exists(url).await
            }
        }

        let site = FakeSite::default()
            .html(
                "http://example.org/",
                r#"<a href="/fine">fine</a><a href="/flaky">flaky</a>"#,
            )
            .html("http://example.org/flaky", "")
            .html("http://example.org/fine", r#"<img src="/missing.png">"#);

        let crawler = Crawler::new(
            "http://example.org",
            Flaky(&site),
            HtmlExtractor::new(),
            RateLimiter::new(Duration::ZERO),
        )
        .unwrap();
        let mut sink = RecordingSink::default();
        let summary = crawler.run(&mut sink).await.unwrap();

        assert_eq!(summary.pages_fetched, 3);
        assert_eq!(sink.records.len(), 1);
        assert_eq!(sink.records[0].kind, FailureKind::BrokenImage);
    }

    #[tokio::test]
    async fn test_unreachable_seed_is_fatal() {
        let site = FakeSite::default().unreachable("http://example.org/");
        let mut sink = RecordingSink::default();

        let err = crawler("http://example.org", &site)
            .run(&mut sink)
            .await
            .unwrap_err();

        assert!(matches!(err, CrawlError::SeedUnreachable { .. }));
    }

    #[tokio::test]
    async fn test_seed_error_status_is_fatal() {
        let site = FakeSite::default().file("http://example.org/", 500, "text/html");
        let mut sink = RecordingSink::default();

        let err = crawler("http://example.org", &site)
            .run(&mut sink)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("500 Internal Server Error"));
    }

    #[test]
    fn test_non_http_base_rejected() {
        let site = FakeSite::default();
        let result = Crawler::new(
            "ftp://example.org",
            &site,
            HtmlExtractor::new(),
            RateLimiter::new(Duration::ZERO),
        );
        assert!(matches!(result, Err(CrawlError::InvalidConfig(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_after_every_request() {
        let site = FakeSite::default()
            .html(
                "http://example.org/",
                r#"<a href="/a">A</a><img src="/missing.png"><a href="mailto:x@y.z">m</a>"#,
            )
            .html("http://example.org/a", "");

        let crawler = Crawler::new(
            "http://example.org",
            &site,
            HtmlExtractor::new(),
            RateLimiter::new(Duration::from_secs(1)),
        )
        .unwrap();
        let start = tokio::time::Instant::now();
        crawler.run(&mut RecordingSink::default()).await.unwrap();
        let elapsed = start.elapsed();

        // GET /, HEAD /a, HEAD /missing.png, GET /a
        assert_eq!(site.requests().len(), 4);
        assert!(elapsed >= Duration::from_secs(4));
        assert!(elapsed < Duration::from_secs(5));
    }

    // --- Against a real HTTP server -----------------------------------------

    #[tokio::test]
    async fn test_end_to_end_with_mock_server() {
        use crate::checker::{FetcherConfig, HttpFetcher};
        use wiremock::{
            matchers::{method, path},
            Mock, MockServer, ResponseTemplate,
        };

        let server = MockServer::start().await;
        let html = |body: &str| {
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_bytes(body.as_bytes().to_vec())
        };

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(html(r#"<a href="/about">About</a><img src="/logo.png">"#))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("HEAD"))
            .and(path("/about"))
            .respond_with(html(""))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/about"))
            .respond_with(html(r#"<a href="/">Home</a>"#))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("HEAD"))
            .and(path("/logo.png"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&FetcherConfig {
            timeout: Duration::from_secs(5),
            user_agent: "link-warden-test".to_string(),
        })
        .unwrap();
        let crawler = Crawler::new(
            &server.uri(),
            fetcher,
            HtmlExtractor::new(),
            RateLimiter::new(Duration::ZERO),
        )
        .unwrap();

        let mut report = CsvReport::new(Vec::new()).unwrap();
        let summary = crawler.run(&mut report).await.unwrap();
        report.close().unwrap();
        let out = String::from_utf8(report.into_inner().unwrap()).unwrap();

        assert_eq!(summary.pages_fetched, 2);
        assert_eq!(summary.failures, 1);
        let rows: Vec<_> = out.lines().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[1],
            format!(
                "\"404 Not Found\",\"Broken image\",\"{0}/\",\"{0}/logo.png\"",
                server.uri()
            )
        );
    }
}
