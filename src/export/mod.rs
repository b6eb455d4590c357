//! Table extraction: records + column spec -> sanitized grid

mod grid;
mod sanitize;

use crate::config::ExportConfig;
use crate::error::ExportError;
use crate::model::{CellValue, Column, ColumnSource, ColumnSpec, Record};
use crate::sink::Sink;

pub use grid::Grid;
pub use sanitize::{escape_formula, is_formula_like, normalize_line_breaks, sanitize_cell};

/// Download-ready export artifact
#[derive(Debug, Clone)]
pub struct Export {
    /// Serialized workbook bytes
    pub bytes: Vec<u8>,
    /// MIME type for the download response
    pub content_type: &'static str,
    /// Suggested file name
    pub file_name: String,
}

/// Extracts sanitized rows from a record source
///
/// Pure given pure record resolution: no shared state, one sequential pass
/// over the source, a fresh grid per call.
#[derive(Debug, Clone, Default)]
pub struct TableExporter {
    config: ExportConfig,
}

impl TableExporter {
    /// Create an exporter with the given configuration
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// The active configuration
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Header titles in column order
    pub fn resolve_headers(&self, spec: &ColumnSpec) -> Vec<String> {
        spec.iter().map(|c| c.header().to_string()).collect()
    }

    /// Extract sanitized data rows, one per visible record, in source order
    ///
    /// Each record's `dispose` hook runs once the record has been handled,
    /// whether it produced a row, was skipped, or failed resolution.
    pub fn build_rows<R: Record>(
        &self,
        records: impl IntoIterator<Item = R>,
        spec: &ColumnSpec,
    ) -> Result<Vec<Vec<CellValue>>, ExportError> {
        let mut rows = Vec::new();
        for (index, mut record) in records.into_iter().enumerate() {
            let row = if record.is_visible() {
                Some(self.build_row(&record, spec, index))
            } else {
                None
            };
            record.dispose();
            if let Some(row) = row {
                rows.push(row?);
            }
        }
        Ok(rows)
    }

    /// Headers plus data rows as one grid
    pub fn build_grid<R: Record>(
        &self,
        records: impl IntoIterator<Item = R>,
        spec: &ColumnSpec,
    ) -> Result<Grid, ExportError> {
        let headers = self.resolve_headers(spec);
        let rows = self.build_rows(records, spec)?;
        Ok(Grid::new(headers, rows))
    }

    /// Build the grid and serialize it through a sink
    pub fn export<R: Record>(
        &self,
        records: impl IntoIterator<Item = R>,
        spec: &ColumnSpec,
        sink: &dyn Sink,
    ) -> Result<Export, ExportError> {
        let grid = self.build_grid(records, spec)?;
        let bytes = sink.write(&grid).map_err(ExportError::Sink)?;
        Ok(Export {
            bytes,
            content_type: sink.content_type(),
            file_name: sink.file_name(),
        })
    }

    fn build_row(
        &self,
        record: &dyn Record,
        spec: &ColumnSpec,
        index: usize,
    ) -> Result<Vec<CellValue>, ExportError> {
        let mut cells = Vec::with_capacity(spec.len());
        for column in spec.iter() {
            let raw = self.resolve_cell(record, column, index)?;
            cells.push(sanitize_cell(raw, self.config.sanitize));
        }
        Ok(cells)
    }

    fn resolve_cell(
        &self,
        record: &dyn Record,
        column: &Column,
        index: usize,
    ) -> Result<CellValue, ExportError> {
        match &column.source {
            // Computed columns see the relation of the same name when the
            // record exposes one, otherwise the record itself.
            ColumnSource::Computed(producer) => Ok(match record.related(&column.key) {
                Some(related) => producer(related),
                None => producer(record),
            }),
            ColumnSource::Field => {
                let mut value = record.field(&column.key);
                if value.is_none() && self.config.title_field_fallback {
                    if let Some(title) = &column.title {
                        value = record.field(title);
                    }
                }
                match value {
                    Some(v) => Ok(v),
                    None if self.config.strict_resolution => {
                        Err(ExportError::ColumnResolution {
                            key: column.key.clone(),
                            record: index,
                        })
                    }
                    None => Ok(CellValue::Null),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MapRecord;

    fn name_total_spec() -> ColumnSpec {
        ColumnSpec::from_titled_fields([("name", "Name"), ("total", "Total")]).unwrap()
    }

    fn sample_records() -> Vec<MapRecord> {
        vec![
            MapRecord::new().with_field("name", "=SUM(A1)").with_field("total", 5),
            MapRecord::new().with_field("name", "Widget").with_field("total", 12),
        ]
    }

    #[test]
    fn test_headers_use_titles() {
        let exporter = TableExporter::default();
        assert_eq!(exporter.resolve_headers(&name_total_spec()), ["Name", "Total"]);
    }

    #[test]
    fn test_headers_fall_back_to_key() {
        let mut spec = ColumnSpec::new();
        spec.push(Column::field("name")).unwrap();
        spec.push(Column::computed("fullName", |_| CellValue::Null)).unwrap();
        let exporter = TableExporter::default();
        assert_eq!(exporter.resolve_headers(&spec), ["name", "fullName"]);
    }

    #[test]
    fn test_formula_cell_escaped() {
        let exporter = TableExporter::default();
        let grid = exporter.build_grid(sample_records(), &name_total_spec()).unwrap();
        assert_eq!(grid.headers, ["Name", "Total"]);
        assert_eq!(
            grid.rows[0],
            vec![CellValue::from("\t=SUM(A1)"), CellValue::Int(5)]
        );
    }

    #[test]
    fn test_formula_cell_untouched_when_sanitize_off() {
        let exporter = TableExporter::new(ExportConfig::new().with_sanitize(false));
        let rows = exporter.build_rows(sample_records(), &name_total_spec()).unwrap();
        assert_eq!(rows[0], vec![CellValue::from("=SUM(A1)"), CellValue::Int(5)]);
    }

    #[test]
    fn test_rows_match_header_width() {
        let mut spec = name_total_spec();
        spec.push(Column::field("missing")).unwrap();
        let exporter = TableExporter::default();
        let grid = exporter.build_grid(sample_records(), &spec).unwrap();
        for row in &grid.rows {
            assert_eq!(row.len(), grid.column_count());
        }
        // Unresolvable field degrades to an empty cell under the default policy
        assert_eq!(grid.rows[0][2], CellValue::from(""));
    }

    #[test]
    fn test_invisible_records_skipped_in_order() {
        let records = vec![
            MapRecord::new().with_field("name", "first").with_field("total", 1),
            MapRecord::new()
                .with_field("name", "hidden")
                .with_field("total", 2)
                .with_visible(false),
            MapRecord::new().with_field("name", "third").with_field("total", 3),
        ];
        let exporter = TableExporter::default();
        let rows = exporter.build_rows(records, &name_total_spec()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], CellValue::from("first"));
        assert_eq!(rows[1][0], CellValue::from("third"));
    }

    #[test]
    fn test_title_fallback_lookup() {
        // Field stored under the title, not the key
        let records = vec![MapRecord::new().with_field("Name", "Ada")];
        let spec = ColumnSpec::from_titled_fields([("name", "Name")]).unwrap();

        let exporter = TableExporter::default();
        let rows = exporter.build_rows(records.clone(), &spec).unwrap();
        assert_eq!(rows[0][0], CellValue::from("Ada"));

        let exporter =
            TableExporter::new(ExportConfig::new().with_title_field_fallback(false));
        let rows = exporter.build_rows(records, &spec).unwrap();
        assert_eq!(rows[0][0], CellValue::from(""));
    }

    #[test]
    fn test_strict_resolution_errors() {
        let exporter = TableExporter::new(ExportConfig::new().with_strict_resolution(true));
        let records = vec![MapRecord::new().with_field("name", "Ada")];
        let err = exporter.build_rows(records, &name_total_spec()).unwrap_err();
        assert!(
            matches!(err, ExportError::ColumnResolution { ref key, record: 0 } if key == "total")
        );
    }

    #[test]
    fn test_computed_column_receives_relation() {
        let record = MapRecord::new()
            .with_field("name", "Report")
            .with_relation("author", MapRecord::new().with_field("name", "Ada"));
        let mut spec = ColumnSpec::new();
        spec.push(Column::titled("name", "Name")).unwrap();
        spec.push(Column::computed_titled("author", "Author", |r| {
            r.field("name").into()
        }))
        .unwrap();

        let exporter = TableExporter::default();
        let rows = exporter.build_rows(vec![record], &spec).unwrap();
        assert_eq!(rows[0], vec![CellValue::from("Report"), CellValue::from("Ada")]);
    }

    #[test]
    fn test_computed_column_without_relation_gets_record() {
        let record = MapRecord::new().with_field("total", 5);
        let mut spec = ColumnSpec::new();
        spec.push(Column::computed("doubled", |r| {
            match r.field("total") {
                Some(CellValue::Int(i)) => CellValue::Int(i * 2),
                _ => CellValue::Null,
            }
        }))
        .unwrap();

        let exporter = TableExporter::default();
        let rows = exporter.build_rows(vec![record], &spec).unwrap();
        assert_eq!(rows[0], vec![CellValue::Int(10)]);
    }

    #[test]
    fn test_line_breaks_normalized_in_rows() {
        let records = vec![MapRecord::new()
            .with_field("name", "line one\r\nline two\rline three")
            .with_field("total", 0)];
        let exporter = TableExporter::default();
        let rows = exporter.build_rows(records, &name_total_spec()).unwrap();
        assert_eq!(
            rows[0][0],
            CellValue::from("line one\nline two\nline three")
        );
    }

    #[test]
    fn test_replay_is_idempotent() {
        let exporter = TableExporter::default();
        let spec = name_total_spec();
        let first = exporter.build_grid(sample_records(), &spec).unwrap();
        let second = exporter.build_grid(sample_records(), &spec).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_export_through_sink() {
        let exporter = TableExporter::default();
        let export = exporter
            .export(sample_records(), &name_total_spec(), &crate::sink::CsvSink::new())
            .unwrap();
        assert_eq!(export.content_type, "text/csv");
        assert!(export.file_name.ends_with(".csv"));
        let text = String::from_utf8(export.bytes).unwrap();
        assert!(text.starts_with("Name,Total\n"));
        assert!(text.contains("\t=SUM(A1)"));
    }

    #[test]
    fn test_dispose_runs_for_every_record() {
        let mut records = vec![
            MapRecord::new().with_field("name", "a").with_field("total", 1),
            MapRecord::new().with_field("name", "b").with_visible(false),
        ];
        let exporter = TableExporter::default();
        // Iterate by mutable reference so we can observe the hook afterwards
        let rows = exporter
            .build_rows(records.iter_mut().map(ProxyRecord), &name_total_spec())
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert!(records.iter().all(|r| r.is_disposed()));
    }

    struct ProxyRecord<'a>(&'a mut MapRecord);

    impl Record for ProxyRecord<'_> {
        fn field(&self, name: &str) -> Option<CellValue> {
            self.0.field(name)
        }

        fn is_visible(&self) -> bool {
            self.0.is_visible()
        }

        fn dispose(&mut self) {
            self.0.dispose()
        }
    }
}
