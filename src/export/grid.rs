//! The 2-D export grid handed to sinks

use serde::Serialize;

use crate::model::CellValue;

/// Header row plus sanitized data rows
///
/// Every data row has exactly `headers.len()` cells, in header order. Built
/// fresh per export call; nothing persists across calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    /// Column titles, row 0 of the output
    pub headers: Vec<String>,
    /// Data rows in record order
    pub rows: Vec<Vec<CellValue>>,
}

impl Grid {
    /// Assemble a grid from headers and rows
    pub fn new(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == headers.len()));
        Self { headers, rows }
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Number of data rows, excluding the header
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Whether the grid has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
