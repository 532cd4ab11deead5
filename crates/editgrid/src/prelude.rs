//! Prelude module for editgrid.
//!
//! This module re-exports the most commonly used types for convenient importing:
//!
//! ```
//! use editgrid::prelude::*;
//! ```
//!
//! This provides access to:
//! - The grid and its configuration (`EditableGrid`, `GridConfig`)
//! - The edit controller and its signal payloads
//! - Data model types (`Record`, `CellValue`, `ColumnDefinition`)
//! - Validation results

// ============================================================================
// Grid
// ============================================================================

pub use crate::{EditableGrid, GridConfig, GridError, RowStyle};

// ============================================================================
// Editing
// ============================================================================

pub use crate::edit::{
    CellActivation, CellClicked, CellEdited, EditCompleted, EditState, FocusError, FocusTarget,
    InlineEditController, Key, KeyOrigin, KeyPress, NO_ROW,
};

// ============================================================================
// Data Model
// ============================================================================

pub use crate::model::{
    CellValue, ColumnDefinition, DataKind, EditorKind, Record, SortDescriptor, SortOrder,
    map_editor_kind,
};

// ============================================================================
// Validation
// ============================================================================

pub use crate::validation::{EditSchema, FieldRule, ValidationResult, validate};

// ============================================================================
// Signals
// ============================================================================

pub use editgrid_core::Signal;
