//! XLSX workbook sink

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};

use crate::export::Grid;
use crate::model::CellValue;

use super::Sink;

/// MIME type for Office Open XML spreadsheets
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

type WorksheetHook = Box<dyn Fn(&mut Worksheet) -> Result<(), XlsxError> + Send + Sync>;

/// Sink producing a single-sheet `.xlsx` workbook
///
/// Headers land in row 0, data from row 1; column widths are auto-fitted
/// after the data is written.
#[derive(Default)]
pub struct XlsxSink {
    sheet_name: Option<String>,
    after_write: Option<WorksheetHook>,
}

impl XlsxSink {
    /// Create a sink with the library's default sheet name
    pub fn new() -> Self {
        Self::default()
    }

    /// Name the worksheet instead of the library default
    pub fn with_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = Some(name.into());
        self
    }

    /// Run a hook on the finished worksheet before serialization, for
    /// host-side touches like freezing the header row
    pub fn with_after_write<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut Worksheet) -> Result<(), XlsxError> + Send + Sync + 'static,
    {
        self.after_write = Some(Box::new(hook));
        self
    }
}

impl Sink for XlsxSink {
    fn write(&self, grid: &Grid) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        if let Some(ref name) = self.sheet_name {
            worksheet
                .set_name(name)
                .with_context(|| format!("invalid sheet name: {name}"))?;
        }

        for (col, title) in grid.headers.iter().enumerate() {
            worksheet.write_string(0, col as u16, title)?;
        }
        for (row, cells) in grid.rows.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                write_cell(worksheet, (row + 1) as u32, col as u16, cell)?;
            }
        }
        worksheet.autofit();

        if let Some(ref hook) = self.after_write {
            hook(worksheet).context("after-write hook failed")?;
        }

        workbook
            .save_to_buffer()
            .context("failed to serialize workbook")
    }

    fn content_type(&self) -> &'static str {
        XLSX_CONTENT_TYPE
    }

    fn file_name(&self) -> String {
        format!("excel-export-{}.xlsx", super::file_name_stamp())
    }
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &CellValue,
) -> Result<(), XlsxError> {
    match cell {
        CellValue::Null => worksheet.write_string(row, col, "")?,
        CellValue::Bool(b) => worksheet.write_boolean(row, col, *b)?,
        CellValue::Int(i) => worksheet.write_number(row, col, *i as f64)?,
        CellValue::Float(f) => worksheet.write_number(row, col, *f)?,
        CellValue::String(s) => worksheet.write_string(row, col, s.as_ref())?,
        // Temporal cells render as ISO strings, the shape grid hosts display
        CellValue::Date(d) => worksheet.write_string(row, col, d.to_string())?,
        CellValue::DateTime(dt) => {
            worksheet.write_string(row, col, dt.format("%Y-%m-%d %H:%M:%S").to_string())?
        }
    };
    Ok(())
}
