//! Error taxonomy for export operations

use thiserror::Error;

/// Errors surfaced by the export pipeline
///
/// Single-pass, single-attempt: nothing here is retried, and there is no
/// partial-success state to recover. All failures go to the immediate caller.
#[derive(Debug, Error)]
pub enum ExportError {
    /// A named field could not be resolved on a record and no fallback
    /// applied. Only raised under strict resolution; the lenient default
    /// degrades to an empty cell instead.
    #[error("column `{key}` could not be resolved for record {record}")]
    ColumnResolution { key: String, record: usize },

    /// A column key was added twice to the same spec
    #[error("duplicate column key `{0}` in column spec")]
    DuplicateColumn(String),

    /// Opaque failure from the workbook-serialization sink
    #[error("sink write failed: {0:#}")]
    Sink(anyhow::Error),
}
