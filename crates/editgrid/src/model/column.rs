//! Column definitions and editor selection.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of data a column holds.
///
/// Parsed from the lowercase names `boolean`, `date`, `integer`, `decimal`
/// and `string`. Any other name is kept verbatim as [`DataKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DataKind {
    /// True/false values.
    Boolean,
    /// Calendar dates.
    Date,
    /// Whole numbers.
    Integer,
    /// Fractional numbers.
    Decimal,
    /// Free text.
    #[default]
    String,
    /// A kind this crate does not know about.
    Other(String),
}

impl DataKind {
    /// The canonical name of this kind.
    pub fn as_str(&self) -> &str {
        match self {
            DataKind::Boolean => "boolean",
            DataKind::Date => "date",
            DataKind::Integer => "integer",
            DataKind::Decimal => "decimal",
            DataKind::String => "string",
            DataKind::Other(name) => name,
        }
    }

    /// Returns `true` for integer and decimal columns.
    pub fn is_numeric(&self) -> bool {
        matches!(self, DataKind::Integer | DataKind::Decimal)
    }
}

impl From<&str> for DataKind {
    fn from(name: &str) -> Self {
        match name {
            "boolean" => DataKind::Boolean,
            "date" => DataKind::Date,
            "integer" => DataKind::Integer,
            "decimal" => DataKind::Decimal,
            "string" => DataKind::String,
            other => DataKind::Other(other.to_string()),
        }
    }
}

impl From<String> for DataKind {
    fn from(name: String) -> Self {
        DataKind::from(name.as_str())
    }
}

impl From<DataKind> for String {
    fn from(kind: DataKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The editor a cell uses while its row is in edit mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorKind {
    /// Checkbox editor.
    Boolean,
    /// Date picker.
    Date,
    /// Numeric input.
    Numeric,
    /// Plain text input.
    Text,
}

impl EditorKind {
    /// Selects the editor for a data kind.
    ///
    /// Kinds without a dedicated editor, including unknown ones, get
    /// [`EditorKind::Text`]. There is no error case.
    pub fn for_data_kind(kind: &DataKind) -> Self {
        match kind {
            DataKind::Boolean => EditorKind::Boolean,
            DataKind::Date => EditorKind::Date,
            DataKind::Integer | DataKind::Decimal => EditorKind::Numeric,
            DataKind::String | DataKind::Other(_) => EditorKind::Text,
        }
    }

    /// The editor's name as rendered by the view layer.
    pub fn as_str(&self) -> &'static str {
        match self {
            EditorKind::Boolean => "boolean-editor",
            EditorKind::Date => "date-editor",
            EditorKind::Numeric => "numeric-editor",
            EditorKind::Text => "text-editor",
        }
    }
}

impl fmt::Display for EditorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a data kind name straight to its editor.
///
/// ```
/// use editgrid::model::{map_editor_kind, EditorKind};
///
/// assert_eq!(map_editor_kind("integer"), EditorKind::Numeric);
/// assert_eq!(map_editor_kind("unknown-kind"), EditorKind::Text);
/// ```
pub fn map_editor_kind(kind: &str) -> EditorKind {
    EditorKind::for_data_kind(&DataKind::from(kind))
}

fn default_true() -> bool {
    true
}

/// Static description of one grid column.
///
/// Columns are editable, visible and sortable unless configured otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDefinition {
    /// The record field this column shows.
    pub field: String,
    /// Display label. Empty means "use the field name".
    #[serde(default)]
    pub header: String,
    /// The kind of data in this column.
    #[serde(default, alias = "fieldType")]
    pub kind: DataKind,
    /// Whether cells in this column can be edited inline.
    #[serde(default = "default_true")]
    pub editable: bool,
    /// Whether the column is hidden.
    #[serde(default)]
    pub hidden: bool,
    /// Whether the column can be sorted.
    #[serde(default = "default_true")]
    pub sortable: bool,
    /// Whether the column stays in place during horizontal scrolling.
    #[serde(default)]
    pub frozen: bool,
    /// Whether a value must be present for the row to validate.
    #[serde(default)]
    pub required: bool,
}

impl ColumnDefinition {
    /// Creates an editable, visible, sortable text column.
    pub fn new(field: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            header: header.into(),
            kind: DataKind::String,
            editable: true,
            hidden: false,
            sortable: true,
            frozen: false,
            required: false,
        }
    }

    /// Sets the data kind using builder pattern.
    pub fn with_kind(mut self, kind: impl Into<DataKind>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Sets editability using builder pattern.
    pub fn with_editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    /// Sets visibility using builder pattern.
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Sets sortability using builder pattern.
    pub fn with_sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Sets the frozen flag using builder pattern.
    pub fn with_frozen(mut self, frozen: bool) -> Self {
        self.frozen = frozen;
        self
    }

    /// Marks the column as required using builder pattern.
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// The label to display for this column.
    pub fn label(&self) -> &str {
        if self.header.is_empty() {
            &self.field
        } else {
            &self.header
        }
    }

    /// The editor used for this column's cells.
    pub fn editor_kind(&self) -> EditorKind {
        EditorKind::for_data_kind(&self.kind)
    }
}
