//! Inline editing.
//!
//! The [`InlineEditController`] owns the only state in the grid: which row,
//! if any, is in edit mode, and that row's working copy.
//!
//! ```text
//!              begin_edit(row) / cell_activated
//!   ┌──────┐ ─────────────────────────────────> ┌─────────────────────┐
//!   │ Idle │                                     │ EditingExisting(row)│──┐ begin_edit(other)
//!   └──────┘ <───────────────────────────────── └─────────────────────┘<─┘ (implicit save)
//!      │  ^          save / cancel / Enter             ^
//!      │  │                                             │ begin_edit(row)
//!      │  └──────────── save / cancel ───────┐          │ (implicit save)
//!      │ begin_new_row                  ┌────────────┐  │
//!      └──────────────────────────────> │ EditingNew │──┘
//!                                       └────────────┘
//! ```

mod controller;
mod events;
mod focus;
mod keyboard;
mod session;

pub use controller::InlineEditController;
pub use events::{CellActivation, CellClicked, CellEdited, EditCompleted, NO_ROW};
pub use focus::{DEFAULT_FOCUS_DELAY, FocusError, FocusRequest, FocusTarget};
pub use keyboard::{Key, KeyOrigin, KeyPress};
pub use session::{EditSession, EditState, EditTarget};
