//! Event payloads exchanged with the grid view and the host.

use crate::model::{CellValue, Record};
use crate::validation::ValidationResult;

/// Row index reported by the grid view for interactions that hit no data
/// row, such as a group header.
pub const NO_ROW: isize = -1;

/// A cell interaction reported by the grid view.
#[derive(Debug, Clone, PartialEq)]
pub struct CellActivation {
    /// Row index in the view, or [`NO_ROW`].
    pub row_index: isize,
    /// Column index in the view.
    pub column_index: usize,
    /// The record behind the row.
    pub record: Record,
    /// Whether the clicked cell is already showing its editor.
    pub already_editing: bool,
}

impl CellActivation {
    /// Creates an activation for a cell that is not already being edited.
    pub fn new(row_index: isize, column_index: usize, record: Record) -> Self {
        Self {
            row_index,
            column_index,
            record,
            already_editing: false,
        }
    }

    /// Sets the already-editing flag using builder pattern.
    pub fn with_already_editing(mut self, already_editing: bool) -> Self {
        self.already_editing = already_editing;
        self
    }
}

/// Payload of `cell_clicked`.
#[derive(Debug, Clone, PartialEq)]
pub struct CellClicked {
    /// The record behind the clicked row.
    pub record: Record,
    /// Row index as reported by the view (may be [`NO_ROW`]).
    pub row_index: isize,
    /// Column index as reported by the view.
    pub column_index: usize,
    /// The record's identifier, if it has one.
    pub id: Option<CellValue>,
}

/// Payload of `edit_completed`.
///
/// `row_data` is `None` when the save was implicit, i.e. forced because a
/// different row was activated. A deliberate save carries the row with the
/// working copy applied.
#[derive(Debug, Clone, PartialEq)]
pub struct EditCompleted {
    /// The saved row, for deliberate saves.
    pub row_data: Option<Record>,
    /// Validation outcomes of the closed session.
    pub validations: Option<ValidationResult>,
    /// Row index of the closed session, `None` for a new row.
    pub row_index: Option<usize>,
    /// Whether the closed session was a new row.
    pub is_new: bool,
}

impl EditCompleted {
    /// Returns `true` if this completion came from an implicit save.
    pub fn is_implicit(&self) -> bool {
        self.row_data.is_none()
    }

    /// Returns `true` if validation passed (or was not reported).
    pub fn is_valid(&self) -> bool {
        self.validations
            .as_ref()
            .is_none_or(ValidationResult::is_valid)
    }
}

/// Payload of `cell_edited`.
#[derive(Debug, Clone, PartialEq)]
pub struct CellEdited {
    /// Field that changed.
    pub field: String,
    /// Its new value.
    pub value: CellValue,
}
