//! Column definitions and the ordered column specification

use indexmap::IndexMap;

use crate::error::ExportError;

use super::{CellValue, Record};

/// Value producer for a computed column
pub type ValueProducer = Box<dyn Fn(&dyn Record) -> CellValue + Send + Sync>;

/// Where a column's cell values come from
pub enum ColumnSource {
    /// Resolve the column key as a named field on the record
    Field,
    /// Invoke a producer with the record, or with the record's relation of
    /// the same name when one exists
    Computed(ValueProducer),
}

impl std::fmt::Debug for ColumnSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnSource::Field => write!(f, "Field"),
            ColumnSource::Computed(_) => write!(f, "Computed(..)"),
        }
    }
}

/// A single column definition
#[derive(Debug)]
pub struct Column {
    /// Field name, unique within a spec
    pub key: String,
    /// Display title for the header row
    pub title: Option<String>,
    /// Value source
    pub source: ColumnSource,
}

impl Column {
    /// Named-field column without an explicit title
    pub fn field(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: None,
            source: ColumnSource::Field,
        }
    }

    /// Named-field column with a display title
    pub fn titled(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: Some(title.into()),
            source: ColumnSource::Field,
        }
    }

    /// Computed column without an explicit title; the key doubles as header
    pub fn computed<F>(key: impl Into<String>, producer: F) -> Self
    where
        F: Fn(&dyn Record) -> CellValue + Send + Sync + 'static,
    {
        Self {
            key: key.into(),
            title: None,
            source: ColumnSource::Computed(Box::new(producer)),
        }
    }

    /// Computed column with a display title
    pub fn computed_titled<F>(
        key: impl Into<String>,
        title: impl Into<String>,
        producer: F,
    ) -> Self
    where
        F: Fn(&dyn Record) -> CellValue + Send + Sync + 'static,
    {
        Self {
            key: key.into(),
            title: Some(title.into()),
            source: ColumnSource::Computed(Box::new(producer)),
        }
    }

    /// Header title: the explicit title when present, else the field name
    pub fn header(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.key)
    }
}

/// Ordered, key-unique sequence of column definitions
///
/// Order is significant and defines output column order.
#[derive(Debug, Default)]
pub struct ColumnSpec {
    columns: IndexMap<String, Column>,
}

impl ColumnSpec {
    /// Create an empty spec
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column; fails if the key is already present
    pub fn push(&mut self, column: Column) -> Result<(), ExportError> {
        if self.columns.contains_key(&column.key) {
            return Err(ExportError::DuplicateColumn(column.key.clone()));
        }
        self.columns.insert(column.key.clone(), column);
        Ok(())
    }

    /// Build a spec from `(field, title)` pairs, the common widget shape
    pub fn from_titled_fields<K, T>(
        pairs: impl IntoIterator<Item = (K, T)>,
    ) -> Result<Self, ExportError>
    where
        K: Into<String>,
        T: Into<String>,
    {
        let mut spec = Self::new();
        for (key, title) in pairs {
            spec.push(Column::titled(key, title))?;
        }
        Ok(spec)
    }

    /// Look up a column by key
    pub fn get(&self, key: &str) -> Option<&Column> {
        self.columns.get(key)
    }

    /// Columns in output order
    pub fn iter(&self) -> impl Iterator<Item = &Column> {
        self.columns.values()
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the spec has no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
