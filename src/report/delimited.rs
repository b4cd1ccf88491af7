// src/report/delimited.rs
// =============================================================================
// CSV report writer. Every field is quoted, header row first:
//
//   "Error","Type","Source URL","Destination URL"
//   "404 Not Found","Broken image","http://example.org/","http://example.org/logo.png"
// =============================================================================

use csv::{QuoteStyle, Writer, WriterBuilder};

use super::{FailureRecord, ReportSink, ReportWrite, HEADER};
use crate::error::Result;

pub struct CsvReport<W: ReportWrite> {
    writer: Writer<W>,
}

impl<W: ReportWrite> CsvReport<W> {
    /// Wraps `inner` and immediately writes the header row
    pub fn new(inner: W) -> Result<Self> {
        // Headers are written by hand so they appear even when nothing fails
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .quote_style(QuoteStyle::Always)
            .from_writer(inner);

        writer.write_record(HEADER)?;
        writer.flush()?;

        Ok(Self { writer })
    }

    /// Hands back the underlying writer, flushing first
    #[cfg(test)]
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| e.into_error().into())
    }
}

impl<W: ReportWrite> ReportSink for CsvReport<W> {
    fn record(&mut self, record: &FailureRecord) -> Result<()> {
        self.writer.serialize(record)?;
        self.writer.flush()?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.writer.flush()?;
        self.writer.get_mut().sync()?;
        Ok(())
    }
}
