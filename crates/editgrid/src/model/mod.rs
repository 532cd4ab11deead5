//! Data model for the editable grid.
//!
//! # Core Types
//!
//! - `CellValue`: A single field value (text, number, date, boolean, or none)
//! - `Record`: One row of host data, keyed by field name
//! - `ColumnDefinition`: Static description of a column's display and edit behavior
//! - `DataKind` / `EditorKind`: What a column holds and which editor edits it
//! - `SortDescriptor`: One entry of the sort specification
//!
//! Records belong to the host. The grid sorts its own copy of the collection
//! and hands clones to the edit controller while a row is being edited.

mod column;
mod record;
mod sort;
mod value;

pub use column::{ColumnDefinition, DataKind, EditorKind, map_editor_kind};
pub use record::{DEFAULT_ID_FIELD, Record};
pub use sort::{SortDescriptor, SortOrder, compare_records, sort_records};
pub use value::{CellValue, DATE_FORMAT};
