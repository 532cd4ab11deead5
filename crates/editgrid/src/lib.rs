//! An inline-editing data grid.
//!
//! editgrid keeps the state behind an editable table: which row is in edit
//! mode, that row's working copy and its validation. Rendering is left to
//! the embedding view, which reports clicks and key presses and listens to
//! the grid's signals.
//!
//! # Modules
//!
//! - [`model`]: cell values, records, column definitions, sorting
//! - [`validation`]: the pure form validator
//! - [`edit`]: the inline edit state machine, focus requests, keyboard commit
//! - [`EditableGrid`]: columns, records and the controller wired together
//! - [`GridConfig`]: construction-time configuration (TOML/JSON)
//!
//! # Example
//!
//! ```
//! use editgrid::prelude::*;
//!
//! let config = GridConfig::new(vec![
//!     ColumnDefinition::new("id", "Id").with_kind("integer").with_editable(false),
//!     ColumnDefinition::new("code", "Code").with_required(true),
//! ])
//! .with_records(vec![
//!     Record::new().with("id", 1).with("code", "A1"),
//!     Record::new().with("id", 2).with("code", "B7"),
//! ]);
//!
//! let mut grid = EditableGrid::new(config)?;
//!
//! grid.controller().edit_completed.connect(|done| {
//!     for (field, outcome) in done.validations.iter().flat_map(|v| v.errors()) {
//!         println!("{field}: {:?}", outcome.message);
//!     }
//! });
//!
//! grid.cell_clicked(0, 1, false)?;
//! grid.edit_field("code", "")?;
//! // Clicking another row saves the first one implicitly.
//! grid.cell_clicked(1, 1, false)?;
//! grid.key_pressed(KeyPress::new(Key::Enter))?;
//! # Ok::<(), editgrid::GridError>(())
//! ```

pub mod config;
pub mod edit;
mod error;
mod grid;
pub mod model;
pub mod prelude;
pub mod validation;

pub use config::GridConfig;
pub use error::{GridError, Result};
pub use grid::{EditableGrid, RowStyle};
