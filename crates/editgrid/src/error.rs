//! Error types for the editable grid.

use std::path::PathBuf;

/// Result type alias for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;

/// Errors that can occur while driving the grid or its edit controller.
///
/// Validation failures are not errors: they are reported through
/// `edit_completed` and never block a save.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// An edit operation was requested while no row is in edit mode.
    #[error("Cannot {operation}: no row is being edited")]
    NotEditing { operation: &'static str },

    /// The field is not part of the grid's columns.
    #[error("Unknown field '{field}'")]
    UnknownField { field: String },

    /// The field exists but its column is not editable.
    #[error("Field '{field}' is not editable")]
    FieldNotEditable { field: String },

    /// A row index beyond the record collection.
    #[error("Row {row} is out of range (grid has {len} rows)")]
    RowOutOfRange { row: isize, len: usize },

    /// A column index beyond the column list.
    #[error("Column {column} is out of range (grid has {len} columns)")]
    ColumnOutOfRange { column: usize, len: usize },

    /// A sort was requested on a field that is unknown or not sortable.
    #[error("Column '{field}' cannot be sorted")]
    NotSortable { field: String },

    /// The configuration could not be parsed.
    #[error("Invalid grid configuration: {message}")]
    Config { message: String },

    /// A configuration file could not be read.
    #[error("Failed to read grid configuration '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GridError {
    /// Create a not-editing error for `operation`.
    pub fn not_editing(operation: &'static str) -> Self {
        Self::NotEditing { operation }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` for errors caused by calling an edit operation in the
    /// wrong state.
    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, Self::NotEditing { .. })
    }
}

impl From<toml::de::Error> for GridError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(err.to_string())
    }
}

impl From<serde_json::Error> for GridError {
    fn from(err: serde_json::Error) -> Self {
        Self::config(err.to_string())
    }
}
