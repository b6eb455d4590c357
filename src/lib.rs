//! gridexport - Sanitizing spreadsheet export for tabular grid data
//!
//! Turns an ordered sequence of records plus a column specification into a
//! 2-D grid of scalar cell values, with formula-injection sanitization of
//! user-controlled content, and hands the grid to a workbook sink (XLSX, CSV)
//! producing download-ready bytes.

pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod sink;

pub use config::ExportConfig;
pub use error::ExportError;
pub use export::{Export, Grid, TableExporter};
pub use model::{CellValue, Column, ColumnSpec, Record};
pub use sink::{CsvSink, Sink, XlsxSink};
