//! CSV sink

use anyhow::{anyhow, Result};

use crate::export::Grid;

use super::Sink;

/// MIME type for comma-separated values
pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// Sink producing RFC 4180 comma-separated output
///
/// Cell values are rendered through their display form; quoting is handled
/// by the csv writer.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvSink;

impl CsvSink {
    pub fn new() -> Self {
        Self
    }
}

impl Sink for CsvSink {
    fn write(&self, grid: &Grid) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&grid.headers)?;
        for row in &grid.rows {
            writer.write_record(row.iter().map(|cell| cell.display().into_owned()))?;
        }
        writer
            .into_inner()
            .map_err(|e| anyhow!("failed to flush csv output: {e}"))
    }

    fn content_type(&self) -> &'static str {
        CSV_CONTENT_TYPE
    }

    fn file_name(&self) -> String {
        format!("csv-export-{}.csv", super::file_name_stamp())
    }
}
