//! Workbook-serialization sinks

mod csv;
mod xlsx;

use anyhow::Result;

use crate::export::Grid;

pub use self::csv::{CsvSink, CSV_CONTENT_TYPE};
pub use self::xlsx::{XlsxSink, XLSX_CONTENT_TYPE};

/// Serializes a grid into download-ready bytes
pub trait Sink {
    /// Serialize the grid; failures are opaque and propagate unchanged
    fn write(&self, grid: &Grid) -> Result<Vec<u8>>;

    /// MIME type of the serialized bytes
    fn content_type(&self) -> &'static str;

    /// Suggested download file name
    fn file_name(&self) -> String;
}

/// Timestamp fragment for default file names, e.g. `21-08-2026-14-30`
pub(crate) fn file_name_stamp() -> String {
    chrono::Local::now().format("%d-%m-%Y-%H-%M").to_string()
}
