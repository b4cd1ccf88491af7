// src/report/json_lines.rs
// =============================================================================
// JSON Lines report writer: one object per failure, same field names as the
// CSV columns. There is no header line.
// =============================================================================

use std::io::Write;

use super::{FailureRecord, ReportSink, ReportWrite};
use crate::error::Result;

pub struct JsonLinesReport<W: ReportWrite> {
    writer: W,
}

impl<W: ReportWrite> JsonLinesReport<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: ReportWrite> ReportSink for JsonLinesReport<W> {
    fn record(&mut self, record: &FailureRecord) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.writer.flush()?;
        self.writer.sync()?;
        Ok(())
    }
}
