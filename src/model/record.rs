//! Record capability interface

use indexmap::IndexMap;

use super::CellValue;

/// Capability interface for one exported row
///
/// Replaces dynamic method detection on host objects: the exporter only
/// needs field resolution, optional relation lookup, a visibility check,
/// and an optional cleanup hook.
pub trait Record {
    /// Resolve a named field to a scalar value
    fn field(&self, name: &str) -> Option<CellValue>;

    /// Resolve a related sub-object by name, when the record exposes one
    fn related(&self, name: &str) -> Option<&dyn Record> {
        let _ = name;
        None
    }

    /// Whether this record should contribute a row at all
    fn is_visible(&self) -> bool {
        true
    }

    /// Release per-record resources; called once after the record's row is
    /// built or skipped. Default is a no-op.
    fn dispose(&mut self) {}
}

impl<R: Record + ?Sized> Record for Box<R> {
    fn field(&self, name: &str) -> Option<CellValue> {
        (**self).field(name)
    }

    fn related(&self, name: &str) -> Option<&dyn Record> {
        (**self).related(name)
    }

    fn is_visible(&self) -> bool {
        (**self).is_visible()
    }

    fn dispose(&mut self) {
        (**self).dispose()
    }
}

/// Ordered-map record backed by owned cell values
///
/// The concrete record type for tests, fixtures, and JSON ingestion. Hosts
/// with their own data objects implement [`Record`] directly instead.
#[derive(Debug, Clone)]
pub struct MapRecord {
    fields: IndexMap<String, CellValue>,
    relations: IndexMap<String, MapRecord>,
    visible: bool,
    disposed: bool,
}

impl Default for MapRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl MapRecord {
    /// Create an empty, visible record
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
            relations: IndexMap::new(),
            visible: true,
            disposed: false,
        }
    }

    /// Set a field value
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Attach a related sub-record under the given name
    pub fn with_relation(mut self, name: impl Into<String>, related: MapRecord) -> Self {
        self.relations.insert(name.into(), related);
        self
    }

    /// Set the visibility flag
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Whether `dispose` has run
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Build a record from a JSON object; nested objects become relations,
    /// arrays are flattened to their JSON text. Returns `None` for
    /// non-object values.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        let object = value.as_object()?;
        let mut record = Self::new();
        for (name, value) in object {
            match value {
                serde_json::Value::Object(_) => {
                    if let Some(related) = Self::from_json(value) {
                        record.relations.insert(name.clone(), related);
                    }
                }
                other => {
                    record.fields.insert(name.clone(), json_to_cell(other));
                }
            }
        }
        Some(record)
    }
}

fn json_to_cell(value: &serde_json::Value) -> CellValue {
    match value {
        serde_json::Value::Null => CellValue::Null,
        serde_json::Value::Bool(b) => CellValue::Bool(*b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Int(i)
            } else {
                CellValue::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        serde_json::Value::String(s) => CellValue::from(s.as_str()),
        other => CellValue::from(other.to_string()),
    }
}

impl Record for MapRecord {
    fn field(&self, name: &str) -> Option<CellValue> {
        self.fields.get(name).cloned()
    }

    fn related(&self, name: &str) -> Option<&dyn Record> {
        self.relations.get(name).map(|r| r as &dyn Record)
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn dispose(&mut self) {
        self.disposed = true;
    }
}
