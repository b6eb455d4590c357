//! Cell, column, and record data structures

mod cell;
mod column;
mod record;

pub use cell::CellValue;
pub use column::{Column, ColumnSource, ColumnSpec, ValueProducer};
pub use record::{MapRecord, Record};
