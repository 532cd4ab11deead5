//! The edit session: which row is open and its working copy.

use crate::model::{CellValue, Record};
use crate::validation::{EditSchema, ValidationResult, validate};

/// The row an edit session targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditTarget {
    /// An existing row at this index in the grid's record collection.
    Existing(usize),
    /// A row that has not been inserted yet.
    New,
}

/// Observable state of the inline edit controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EditState {
    /// No edit session.
    #[default]
    Idle,
    /// Editing the existing row at this index.
    EditingExisting(usize),
    /// Editing a row that will be inserted on save.
    EditingNew,
}

impl EditState {
    /// Returns `true` for both editing states.
    pub fn is_editing(&self) -> bool {
        !matches!(self, EditState::Idle)
    }

    /// The row index being edited, if an existing row is open.
    pub fn row_index(&self) -> Option<usize> {
        match self {
            EditState::EditingExisting(row) => Some(*row),
            _ => None,
        }
    }
}

/// Transient state for the single row in edit mode.
#[derive(Debug, Clone)]
pub struct EditSession {
    target: EditTarget,
    /// The record as it was when editing began.
    original: Record,
    /// Draft values for the editable fields only.
    working: Record,
    validations: ValidationResult,
}

impl EditSession {
    /// Opens a session on an existing row.
    pub(crate) fn existing(row: usize, record: &Record, schema: &EditSchema) -> Self {
        Self::open(EditTarget::Existing(row), record.clone(), schema)
    }

    /// Opens a session on a blank new row.
    pub(crate) fn new_row(schema: &EditSchema) -> Self {
        Self::open(EditTarget::New, Record::new(), schema)
    }

    fn open(target: EditTarget, original: Record, schema: &EditSchema) -> Self {
        let working = original.project(schema.fields());
        let validations = validate(schema, &working);
        Self {
            target,
            original,
            working,
            validations,
        }
    }

    /// The row this session targets.
    pub fn target(&self) -> EditTarget {
        self.target
    }

    /// Returns `true` if the session edits a not-yet-inserted row.
    pub fn is_new(&self) -> bool {
        self.target == EditTarget::New
    }

    /// The row index, for sessions on existing rows.
    pub fn row_index(&self) -> Option<usize> {
        match self.target {
            EditTarget::Existing(row) => Some(row),
            EditTarget::New => None,
        }
    }

    /// The working copy of the editable fields.
    pub fn working_copy(&self) -> &Record {
        &self.working
    }

    /// The record as it was when the session opened.
    pub fn original(&self) -> &Record {
        &self.original
    }

    /// Validation outcomes for the current working copy.
    pub fn validations(&self) -> &ValidationResult {
        &self.validations
    }

    /// Updates one field and revalidates.
    pub(crate) fn set_field(&mut self, field: &str, value: CellValue, schema: &EditSchema) {
        self.working.set(field, value);
        self.validations = validate(schema, &self.working);
    }

    /// Revalidates the working copy.
    pub(crate) fn revalidate(&mut self, schema: &EditSchema) -> ValidationResult {
        self.validations = validate(schema, &self.working);
        self.validations.clone()
    }

    /// The row as it would look after saving: the original record with the
    /// working copy applied over it.
    pub fn merged(&self) -> Record {
        let mut merged = self.original.clone();
        merged.apply(&self.working);
        merged
    }

    /// The state this session represents.
    pub fn state(&self) -> EditState {
        match self.target {
            EditTarget::Existing(row) => EditState::EditingExisting(row),
            EditTarget::New => EditState::EditingNew,
        }
    }
}
