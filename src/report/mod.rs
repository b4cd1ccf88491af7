// src/report/mod.rs
// =============================================================================
// This module writes the failure report.
//
// Every confirmed failure becomes one FailureRecord, handed to a ReportSink
// in the order it was discovered. The sink is a plain serial writer:
// - each record is flushed before the next one is produced
// - close() is called exactly once, at the end of a successful crawl
// - any I/O error (open, write, close) is fatal for the run
//
// Submodules:
// - delimited: CSV with every field quoted (the default)
// - json_lines: one JSON object per line
// =============================================================================

mod delimited;
mod json_lines;

pub use delimited::CsvReport;
pub use json_lines::JsonLinesReport;

use clap::ValueEnum;
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::crawl::AbsoluteUrl;
use crate::error::Result;

/// Column names, in output order
pub const HEADER: [&str; 4] = ["Error", "Type", "Source URL", "Destination URL"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureKind {
    #[serde(rename = "Broken link")]
    BrokenLink,
    #[serde(rename = "Broken image")]
    BrokenImage,
}

/// One row of the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureRecord {
    #[serde(rename = "Error")]
    pub status: String,
    #[serde(rename = "Type")]
    pub kind: FailureKind,
    #[serde(rename = "Source URL")]
    pub source: AbsoluteUrl,
    #[serde(rename = "Destination URL")]
    pub destination: AbsoluteUrl,
}

/// A report destination that can be made durable on close
///
/// `flush()` only empties user-space buffers. For files, `sync` also pushes
/// the data to disk so write-back errors show up before the run ends.
pub trait ReportWrite: Write {
    fn sync(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl ReportWrite for File {
    fn sync(&mut self) -> io::Result<()> {
        self.sync_all()
    }
}

impl ReportWrite for io::Stdout {}

impl ReportWrite for Vec<u8> {}

impl<W: ReportWrite + ?Sized> ReportWrite for Box<W> {
    fn sync(&mut self) -> io::Result<()> {
        (**self).sync()
    }
}

pub trait ReportSink {
    /// Appends one record; it must be on its way to the destination
    /// (flushed) before this returns
    fn record(&mut self, record: &FailureRecord) -> Result<()>;

    /// Flushes everything and syncs file targets. Called once, after the
    /// crawl finished.
    fn close(&mut self) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    /// Comma separated, every field quoted, with a header row
    #[default]
    Csv,
    /// One JSON object per failure
    Json,
}

/// Where the report goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportTarget {
    Stdout,
    File(PathBuf),
}

// Opens the report destination and writes any header row
//
// Failing to create the file is a fatal error, surfaced to the caller
// before a single request is made.
pub fn open(target: &ReportTarget, format: ReportFormat) -> Result<Box<dyn ReportSink>> {
    let writer: Box<dyn ReportWrite> = match target {
        ReportTarget::Stdout => Box::new(io::stdout()),
        ReportTarget::File(path) => Box::new(File::create(path)?),
    };

    let sink: Box<dyn ReportSink> = match format {
        ReportFormat::Csv => Box::new(CsvReport::new(writer)?),
        ReportFormat::Json => Box::new(JsonLinesReport::new(writer)),
    };
    Ok(sink)
}
