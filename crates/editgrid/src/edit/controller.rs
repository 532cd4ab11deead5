//! The inline edit state machine.

use std::sync::Arc;
use std::time::{Duration, Instant};

use editgrid_core::logging::targets;
use editgrid_core::{Signal, TimerId, TimerManager};

use super::events::{CellActivation, CellClicked, CellEdited, EditCompleted};
use super::focus::{DEFAULT_FOCUS_DELAY, FocusRequest, FocusTarget};
use super::keyboard::KeyPress;
use super::session::{EditSession, EditState, EditTarget};
use crate::error::{GridError, Result};
use crate::model::{CellValue, ColumnDefinition, DEFAULT_ID_FIELD, Record};
use crate::validation::{EditSchema, ValidationResult};

/// How a session is being closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SaveKind {
    /// The user asked to save (save button, Enter key).
    Deliberate,
    /// Another row was activated while this one was open.
    Implicit,
}

/// Tracks the single row in edit mode and emits edit lifecycle signals.
///
/// At most one row is editable at a time. Opening a different row saves the
/// open one first (an *implicit save*), and the new row opens even if that
/// save did not validate. Saves always close the session; validation
/// failures are reported in [`EditCompleted::validations`], never as errors.
///
/// Operations that need an open session ([`edit_field`](Self::edit_field),
/// [`save`](Self::save), [`cancel`](Self::cancel)) return
/// [`GridError::NotEditing`] when called while idle.
///
/// # Signals
///
/// - `cell_clicked(CellClicked)`: every cell activation, before any transition
/// - `edit_started(())`: a row was activated for editing
/// - `edit_completed(EditCompleted)`: a session was saved
/// - `edit_canceled(())`: a session was discarded
/// - `cell_edited(CellEdited)`: a working-copy field changed
/// - `editing_mode_changed(bool)`: the controller entered or left edit mode
///
/// # Example
///
/// ```
/// use editgrid::edit::InlineEditController;
/// use editgrid::model::{ColumnDefinition, Record};
///
/// let columns = vec![ColumnDefinition::new("code", "Code").with_required(true)];
/// let mut controller = InlineEditController::from_columns(&columns);
///
/// controller.edit_completed.connect(|done| {
///     println!("saved, valid = {}", done.is_valid());
/// });
///
/// controller.begin_edit(0, &Record::new().with("id", 1).with("code", "A1"));
/// controller.edit_field("code", "B2").unwrap();
/// let validations = controller.save().unwrap();
/// assert!(validations.is_valid());
/// assert!(!controller.is_editing());
/// ```
pub struct InlineEditController {
    schema: EditSchema,
    /// Fields that exist in the grid but cannot be edited.
    read_only_fields: Vec<String>,
    id_field: String,
    session: Option<EditSession>,

    focus_target: Option<Arc<dyn FocusTarget>>,
    focus_delay: Duration,
    focus_timers: TimerManager<FocusRequest>,
    /// The focus request for the most recent click, while it is pending.
    pending_focus: Option<TimerId>,

    /// Emitted for every cell activation.
    pub cell_clicked: Signal<CellClicked>,
    /// Emitted when a row is activated for editing.
    pub edit_started: Signal<()>,
    /// Emitted when a session is saved, deliberately or implicitly.
    pub edit_completed: Signal<EditCompleted>,
    /// Emitted when a session is discarded.
    pub edit_canceled: Signal<()>,
    /// Emitted when a working-copy field changes.
    pub cell_edited: Signal<CellEdited>,
    /// Emitted with `true` when a session opens and `false` when it closes.
    pub editing_mode_changed: Signal<bool>,
}

impl InlineEditController {
    /// Creates a controller editing the fields named by `schema`.
    pub fn new(schema: EditSchema) -> Self {
        Self {
            schema,
            read_only_fields: Vec::new(),
            id_field: DEFAULT_ID_FIELD.to_string(),
            session: None,
            focus_target: None,
            focus_delay: DEFAULT_FOCUS_DELAY,
            focus_timers: TimerManager::new(),
            pending_focus: None,
            cell_clicked: Signal::new(),
            edit_started: Signal::new(),
            edit_completed: Signal::new(),
            edit_canceled: Signal::new(),
            cell_edited: Signal::new(),
            editing_mode_changed: Signal::new(),
        }
    }

    /// Creates a controller for a column set. Editable columns form the
    /// schema; the rest are known but read-only.
    pub fn from_columns(columns: &[ColumnDefinition]) -> Self {
        let mut controller = Self::new(EditSchema::from_columns(columns));
        controller.read_only_fields = columns
            .iter()
            .filter(|column| !column.editable)
            .map(|column| column.field.clone())
            .collect();
        controller
    }

    /// Sets the identifier field using builder pattern.
    pub fn with_id_field(mut self, id_field: impl Into<String>) -> Self {
        self.id_field = id_field.into();
        self
    }

    /// Sets the focus delay using builder pattern.
    pub fn with_focus_delay(mut self, delay: Duration) -> Self {
        self.focus_delay = delay;
        self
    }

    /// Installs the view capability used for deferred focus requests.
    pub fn set_focus_target(&mut self, target: impl FocusTarget + 'static) {
        self.focus_target = Some(Arc::new(target));
    }

    /// Removes the focus capability. Pending requests are then dropped when due.
    pub fn clear_focus_target(&mut self) {
        self.focus_target = None;
    }

    /// The schema of editable fields.
    pub fn schema(&self) -> &EditSchema {
        &self.schema
    }

    /// The identifier field name.
    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    /// The delay before a focus request fires.
    pub fn focus_delay(&self) -> Duration {
        self.focus_delay
    }

    /// The current state.
    pub fn state(&self) -> EditState {
        self.session
            .as_ref()
            .map_or(EditState::Idle, EditSession::state)
    }

    /// Returns `true` while a row is in edit mode.
    pub fn is_editing(&self) -> bool {
        self.session.is_some()
    }

    /// The open session, if any.
    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    /// Activates the row at `row_index` for editing.
    ///
    /// A session open on a different row is implicitly saved first.
    /// Beginning the row that is already open keeps its working copy and
    /// emits nothing.
    ///
    /// A negative `row_index` (see [`NO_ROW`](super::NO_ROW)) only emits
    /// `edit_started`: no session is opened and an open one is left alone.
    pub fn begin_edit(&mut self, row_index: isize, record: &Record) {
        let Ok(row) = usize::try_from(row_index) else {
            tracing::debug!(target: targets::EDIT, row_index, "edit requested on a non-data row");
            self.edit_started.emit(());
            return;
        };

        if self
            .session
            .as_ref()
            .is_some_and(|session| session.target() == EditTarget::Existing(row))
        {
            tracing::trace!(target: targets::EDIT, row_index, "row already in edit mode");
            return;
        }

        self.implicit_save();
        self.open(EditSession::existing(row, record, &self.schema));
        self.edit_started.emit(());
    }

    /// Opens a blank row for insertion.
    ///
    /// Every editable field starts as [`CellValue::None`]. A session open on
    /// an existing row is implicitly saved first; calling this while a new
    /// row is already open does nothing.
    pub fn begin_new_row(&mut self) {
        if self.session.as_ref().is_some_and(EditSession::is_new) {
            return;
        }
        self.implicit_save();
        self.open(EditSession::new_row(&self.schema));
        self.edit_started.emit(());
    }

    /// Updates one field of the working copy and revalidates it.
    ///
    /// The value is stored the way the field's column stores it, so
    /// `YYYY-MM-DD` text entered into a date column becomes a date.
    pub fn edit_field(&mut self, field: &str, value: impl Into<CellValue>) -> Result<()> {
        let Some(session) = self.session.as_mut() else {
            return Err(GridError::not_editing("edit a field"));
        };
        let Some(rule) = self.schema.rule(field) else {
            return Err(if self.read_only_fields.iter().any(|f| f == field) {
                GridError::FieldNotEditable {
                    field: field.to_string(),
                }
            } else {
                GridError::UnknownField {
                    field: field.to_string(),
                }
            });
        };

        let value = value.into().coerce(&rule.kind);
        session.set_field(field, value.clone(), &self.schema);
        tracing::trace!(target: targets::EDIT, field, %value, "cell edited");

        self.cell_edited.emit(CellEdited {
            field: field.to_string(),
            value,
        });
        Ok(())
    }

    /// Saves the open row.
    ///
    /// Validates every editable field, closes the session whatever the
    /// outcome, and emits `edit_completed` with the row data. Returns the
    /// validation result.
    pub fn save(&mut self) -> Result<ValidationResult> {
        let session = self
            .session
            .take()
            .ok_or_else(|| GridError::not_editing("save"))?;
        Ok(self.finish(session, SaveKind::Deliberate))
    }

    /// Discards the open row without validating it.
    pub fn cancel(&mut self) -> Result<()> {
        let session = self
            .session
            .take()
            .ok_or_else(|| GridError::not_editing("cancel"))?;

        tracing::debug!(target: targets::EDIT, state = ?session.state(), "edit canceled");
        self.cancel_focus_request();
        self.editing_mode_changed.emit(false);
        self.edit_canceled.emit(());
        Ok(())
    }

    /// Handles a click on a cell.
    ///
    /// Always emits `cell_clicked`. Unless the cell is already showing its
    /// editor, any other open row is implicitly saved and the clicked row is
    /// opened. A click on [`NO_ROW`](super::NO_ROW) saves the open row and
    /// opens nothing.
    ///
    /// Opening a row schedules a focus request for the clicked cell after the
    /// focus delay. Only the latest request is kept: a new click replaces a
    /// request that has not fired yet.
    pub fn cell_activated(&mut self, activation: CellActivation) {
        let CellActivation {
            row_index,
            column_index,
            record,
            already_editing,
        } = activation;

        self.cell_clicked.emit(CellClicked {
            id: record.id(&self.id_field).cloned(),
            record: record.clone(),
            row_index,
            column_index,
        });

        if already_editing {
            return;
        }

        if row_index < 0 {
            self.implicit_save();
        }
        self.begin_edit(row_index, &record);

        self.cancel_focus_request();
        if let Some(row) = self.session.as_ref().and_then(EditSession::row_index) {
            let id = self.focus_timers.start_one_shot(
                self.focus_delay,
                FocusRequest {
                    row,
                    column: column_index,
                },
            );
            self.pending_focus = Some(id);
        }
    }

    /// Handles a key press while the grid has focus.
    ///
    /// While editing, Enter saves the open row and Escape cancels it, unless
    /// the press came from an input inside an unrelated grid. Returns whether
    /// the press was consumed.
    pub fn handle_key_press(&mut self, press: KeyPress) -> Result<bool> {
        if !self.is_editing() {
            return Ok(false);
        }
        if press.is_commit() {
            self.save()?;
            Ok(true)
        } else if press.is_cancel() {
            self.cancel()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Runs focus requests that are due at `now`.
    ///
    /// Failures to find the target editor are logged and swallowed. Returns
    /// the number of requests attempted.
    pub fn poll_timers(&mut self, now: Instant) -> usize {
        let due = self.focus_timers.take_expired(now);
        let count = due.len();
        if self
            .pending_focus
            .is_some_and(|id| !self.focus_timers.is_pending(id))
        {
            self.pending_focus = None;
        }

        for (_, request) in due {
            let Some(target) = &self.focus_target else {
                tracing::trace!(target: targets::FOCUS, ?request, "no focus target installed");
                continue;
            };
            match target.focus_cell(request.row, request.column) {
                Ok(()) => {
                    tracing::trace!(target: targets::FOCUS, ?request, "cell focused");
                }
                Err(err) => {
                    tracing::debug!(target: targets::FOCUS, ?request, %err, "focus request dropped");
                }
            }
        }
        count
    }

    /// When the next focus request is due, if any is pending.
    pub fn next_timer_deadline(&self) -> Option<Instant> {
        self.focus_timers.next_deadline()
    }

    /// Number of pending focus requests (at most one).
    pub fn pending_focus_requests(&self) -> usize {
        self.focus_timers.pending_count()
    }

    /// The pending focus request, if one has not fired yet.
    pub fn pending_focus(&self) -> Option<FocusRequest> {
        self.pending_focus
            .and_then(|id| self.focus_timers.payload(id))
            .copied()
    }

    fn cancel_focus_request(&mut self) {
        let Some(id) = self.pending_focus.take() else {
            return;
        };
        match self.focus_timers.stop(id) {
            Ok(request) => {
                tracing::trace!(target: targets::FOCUS, ?request, "focus request dropped");
            }
            Err(err) => {
                tracing::trace!(target: targets::FOCUS, %err, "focus request already fired");
            }
        }
    }

    fn open(&mut self, session: EditSession) {
        tracing::debug!(target: targets::EDIT, state = ?session.state(), "edit session opened");
        self.session = Some(session);
        self.editing_mode_changed.emit(true);
    }

    fn implicit_save(&mut self) {
        if let Some(session) = self.session.take() {
            self.finish(session, SaveKind::Implicit);
        }
    }

    fn finish(&mut self, mut session: EditSession, kind: SaveKind) -> ValidationResult {
        let validations = session.revalidate(&self.schema);
        let row_data = match kind {
            SaveKind::Deliberate if session.is_new() => Some(session.working_copy().clone()),
            SaveKind::Deliberate => Some(session.merged()),
            SaveKind::Implicit => None,
        };

        tracing::debug!(
            target: targets::EDIT,
            state = ?session.state(),
            ?kind,
            errors = validations.error_count(),
            "edit session saved"
        );

        self.cancel_focus_request();
        self.edit_completed.emit(EditCompleted {
            row_data,
            validations: Some(validations.clone()),
            row_index: session.row_index(),
            is_new: session.is_new(),
        });
        self.editing_mode_changed.emit(false);
        validations
    }
}

static_assertions::assert_impl_all!(InlineEditController: Send, Sync);
