// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr, so stdout stays free for the report)
// 3. Open the report, crawl the site, close the report
// 4. Exit with proper code (0 = nothing broken, 1 = broken links, 2 = error)
//
// Rust concepts used:
// - async/await: network requests are awaited one after another
// - Result<T, E>: For error handling (T = success type, E = error type)
// - Box<dyn Trait>: the report format is picked at runtime
// =============================================================================

// Module declarations - tells Rust about our other source files
mod checker; // src/checker/ - HTTP fetching and HTML reference extraction
mod cli; // src/cli.rs - command-line parsing
mod crawl; // src/crawl/ - the crawl engine
mod error; // src/error.rs - shared error type
mod report; // src/report/ - failure report writers

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use checker::{HtmlExtractor, HttpFetcher};
use cli::Cli;
use crawl::{Crawler, RateLimiter};

// The #[tokio::main] attribute transforms our async main into a real main function
// It creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = no broken links or images
//   Ok(1) = at least one failure was reported
//   Err = fatal error (bad config, seed unreachable, report I/O)
async fn run() -> Result<i32> {
    let config = Cli::parse().into_config()?;
    init_logging(config.debug);

    let fetcher = HttpFetcher::new(&config.fetcher)?;
    let crawler = Crawler::new(
        &config.base_url,
        fetcher,
        HtmlExtractor::new(),
        RateLimiter::new(config.request_gap),
    )?;

    eprintln!("🔍 Crawling website: {}", crawler.seed());

    let mut sink = report::open(&config.output, config.format)
        .context("could not open report destination")?;

    let summary = crawler.run(sink.as_mut()).await?;

    sink.close().context("could not close report")?;

    eprintln!();
    eprintln!("📊 Summary:");
    eprintln!("   📄 Pages crawled: {}", summary.pages_fetched);
    eprintln!("   🌐 URLs checked: {}", summary.references_checked);
    eprintln!("   ❌ Broken: {}", summary.failures);

    if summary.failures > 0 {
        Ok(1) // Exit code 1 = broken links found
    } else {
        Ok(0) // Exit code 0 = all good
    }
}

// Logs go to stderr. Our own events at INFO by default, DEBUG with --debug.
// Without --debug, RUST_LOG overrides the default if set.
fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("link_warden=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("link_warden=info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
