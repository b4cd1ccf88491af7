// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate, and
// turns the parsed arguments into a validated CrawlConfig.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
// =============================================================================

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::checker::FetcherConfig;
use crate::error::{CrawlError, Result};
use crate::report::{ReportFormat, ReportTarget};

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "link-warden",
    version,
    about = "Crawl a website and report broken links and images",
    long_about = "link-warden starts at a base URL, follows every link that stays on the site, \
                  checks each link and image it finds, and writes one report row per failure."
)]
pub struct Cli {
    /// Base URL to start from (e.g., https://example.com)
    ///
    /// Only pages whose URL contains this text are crawled further;
    /// everything else is just checked.
    pub base_url: String,

    /// Seconds to wait after every request (fractions allowed)
    #[arg(short, long, value_name = "SECONDS", default_value_t = 1.0)]
    pub wait: f64,

    /// Write the report to this file instead of standard output
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Csv)]
    pub format: ReportFormat,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECONDS", default_value_t = 10)]
    pub timeout: u64,

    /// User-Agent header sent with every request
    #[arg(long, value_name = "UA")]
    pub user_agent: Option<String>,

    /// Log every URL as it is checked
    #[arg(short, long)]
    pub debug: bool,
}

/// Everything a crawl run needs, validated
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub base_url: String,
    pub request_gap: Duration,
    pub output: ReportTarget,
    pub format: ReportFormat,
    pub fetcher: FetcherConfig,
    pub debug: bool,
}

impl Cli {
    pub fn into_config(self) -> Result<CrawlConfig> {
        // try_from_secs_f64 rejects negative, NaN and infinite values
        let request_gap = Duration::try_from_secs_f64(self.wait).map_err(|_| {
            CrawlError::InvalidConfig(format!(
                "--wait must be a non-negative number of seconds, got {}",
                self.wait
            ))
        })?;

        if self.timeout == 0 {
            return Err(CrawlError::InvalidConfig(
                "--timeout must be at least 1 second".to_string(),
            ));
        }

        let output = match self.output {
            Some(path) => ReportTarget::File(path),
            None => ReportTarget::Stdout,
        };

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("link-warden/{}", env!("CARGO_PKG_VERSION")));

        Ok(CrawlConfig {
            base_url: self.base_url,
            request_gap,
            output,
            format: self.format,
            fetcher: FetcherConfig {
                timeout: Duration::from_secs(self.timeout),
                user_agent,
            },
            debug: self.debug,
        })
    }
}
