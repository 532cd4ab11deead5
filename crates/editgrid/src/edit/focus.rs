//! Moving input focus into a cell editor.
//!
//! The controller does not know how cells are rendered. After opening a row
//! from a cell click it asks the embedding view, through [`FocusTarget`], to
//! focus the clicked cell's editor once the editor has had time to appear.
//! The request is fire-and-forget: a missing editor is normal (the row may
//! have been closed or scrolled out of view) and is never reported to the
//! caller.

use std::time::Duration;

/// Delay between opening a row and focusing the clicked cell's editor.
pub const DEFAULT_FOCUS_DELAY: Duration = Duration::from_millis(2000);

/// Why a focus request could not be honored.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FocusError {
    /// No editor is rendered for the requested cell.
    #[error("No editor at row {row}, column {column}")]
    NoEditor { row: usize, column: usize },

    /// The view refused or failed the request.
    #[error("Focus request rejected: {reason}")]
    Rejected { reason: String },
}

/// A deferred request to focus a cell editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FocusRequest {
    /// Row index of the cell.
    pub row: usize,
    /// Column index of the cell.
    pub column: usize,
}

/// Capability implemented by the view layer to move input focus.
pub trait FocusTarget: Send + Sync {
    /// Focus the editor of the cell at `(row, column)`.
    fn focus_cell(&self, row: usize, column: usize) -> Result<(), FocusError>;
}

impl<F> FocusTarget for F
where
    F: Fn(usize, usize) -> Result<(), FocusError> + Send + Sync,
{
    fn focus_cell(&self, row: usize, column: usize) -> Result<(), FocusError> {
        self(row, column)
    }
}
