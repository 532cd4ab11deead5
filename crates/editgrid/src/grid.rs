//! The editable grid: columns, records and the edit controller together.

use std::sync::Arc;

use editgrid_core::{PerfSpan, Signal, grid_debug, grid_info, grid_trace, grid_warn};
use parking_lot::Mutex;

use crate::config::GridConfig;
use crate::edit::{CellActivation, EditCompleted, InlineEditController, KeyPress, NO_ROW};
use crate::error::{GridError, Result};
use crate::model::{CellValue, ColumnDefinition, EditorKind, Record, SortDescriptor, sort_records};
use crate::validation::ValidationResult;

/// Row classes applied by the view when painting a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowStyle {
    /// Row has an even index.
    pub even: bool,
    /// Row has an odd index.
    pub odd: bool,
    /// Row uses compact height.
    pub compact: bool,
}

/// An inline-editing table.
///
/// `EditableGrid` holds the column set, the (sorted) record collection and
/// the [`InlineEditController`], and translates notifications from the view
/// that renders it. Rendering, virtualization and paging are the view's
/// business; the grid only asks for a repaint through `repaint_requested`.
///
/// A deliberate save (save button, Enter) that passes validation is written
/// back into the record collection: an existing row is replaced by the
/// saved row, a new row is appended, and the collection is re-sorted.
/// Implicit saves carry no row data and leave the collection untouched, as
/// do saves that fail validation.
///
/// # Signals
///
/// - `repaint_requested(())`: the view should re-render
///
/// The edit lifecycle signals live on [`controller()`](Self::controller).
///
/// # Example
///
/// ```
/// use editgrid::{EditableGrid, GridConfig};
/// use editgrid::model::{ColumnDefinition, Record};
///
/// let config = GridConfig::new(vec![
///     ColumnDefinition::new("id", "Id").with_kind("integer").with_editable(false),
///     ColumnDefinition::new("code", "Code").with_required(true),
/// ])
/// .with_records(vec![Record::new().with("id", 1).with("code", "A1")]);
///
/// let mut grid = EditableGrid::new(config).unwrap();
/// grid.cell_clicked(0, 1, false).unwrap();
/// grid.edit_field("code", "B2").unwrap();
/// assert!(grid.save_edit().unwrap().is_valid());
/// ```
pub struct EditableGrid {
    columns: Vec<ColumnDefinition>,
    records: Vec<Record>,
    sort: Vec<SortDescriptor>,
    controller: InlineEditController,
    /// Completions received from the controller, applied after each routed
    /// operation.
    completed: Arc<Mutex<Vec<EditCompleted>>>,

    /// Emitted when the view should re-render.
    pub repaint_requested: Signal<()>,
}

impl EditableGrid {
    /// Creates a grid from a configuration.
    ///
    /// The configuration is validated and the initial records are sorted by
    /// its sort specification.
    pub fn new(config: GridConfig) -> Result<Self> {
        config.validate()?;
        let focus_delay = config.focus_delay();
        let GridConfig {
            columns,
            mut records,
            sort,
            id_field,
            ..
        } = config;

        for record in &mut records {
            record.coerce_to(&columns);
        }
        sort_records(&mut records, &sort);

        let controller = InlineEditController::from_columns(&columns)
            .with_id_field(id_field)
            .with_focus_delay(focus_delay);
        let completed = Arc::new(Mutex::new(Vec::new()));
        let completed_clone = completed.clone();
        controller
            .edit_completed
            .connect(move |done| completed_clone.lock().push(done.clone()));

        grid_info!(columns = columns.len(), rows = records.len(), "grid created");
        Ok(Self {
            columns,
            records,
            sort,
            controller,
            completed,
            repaint_requested: Signal::new(),
        })
    }

    /// The edit controller.
    pub fn controller(&self) -> &InlineEditController {
        &self.controller
    }

    /// The edit controller, mutably (for installing a focus target or
    /// driving its timers).
    pub fn controller_mut(&mut self) -> &mut InlineEditController {
        &mut self.controller
    }

    /// All columns in display order.
    pub fn columns(&self) -> &[ColumnDefinition] {
        &self.columns
    }

    /// Columns that are not hidden, in display order.
    pub fn visible_columns(&self) -> impl Iterator<Item = &ColumnDefinition> {
        self.columns.iter().filter(|column| !column.hidden)
    }

    /// Visible columns pinned during horizontal scrolling.
    pub fn frozen_columns(&self) -> impl Iterator<Item = &ColumnDefinition> {
        self.visible_columns().filter(|column| column.frozen)
    }

    /// The editor for the column at `column_index`.
    pub fn editor_kind(&self, column_index: usize) -> Result<EditorKind> {
        self.columns
            .get(column_index)
            .map(ColumnDefinition::editor_kind)
            .ok_or(GridError::ColumnOutOfRange {
                column: column_index,
                len: self.columns.len(),
            })
    }

    /// The records in display order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// The record at `row_index`.
    pub fn record(&self, row_index: usize) -> Option<&Record> {
        self.records.get(row_index)
    }

    /// Replaces the record collection, e.g. after the host persisted a save.
    ///
    /// Row indices change, so an open edit session is canceled first.
    pub fn set_records(&mut self, mut records: Vec<Record>) {
        if self.controller.cancel().is_ok() {
            grid_debug!("open edit canceled by record replacement");
        }
        for record in &mut records {
            record.coerce_to(&self.columns);
        }
        sort_records(&mut records, &self.sort);
        self.records = records;
        grid_debug!(rows = self.records.len(), "records replaced");
        self.repaint_requested.emit(());
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    /// The current sort specification.
    pub fn sort(&self) -> &[SortDescriptor] {
        &self.sort
    }

    /// Row classes for the row at `row_index`.
    pub fn row_style(&self, row_index: usize) -> RowStyle {
        let even = row_index % 2 == 0;
        RowStyle {
            even,
            odd: !even,
            compact: true,
        }
    }

    /// Routes a cell click from the view to the edit controller.
    ///
    /// `row_index` may be [`NO_ROW`] for clicks on group headers, which are
    /// reported with an empty record and open no session.
    pub fn cell_clicked(
        &mut self,
        row_index: isize,
        column_index: usize,
        already_editing: bool,
    ) -> Result<()> {
        let record = if row_index == NO_ROW {
            Record::new()
        } else {
            usize::try_from(row_index)
                .ok()
                .and_then(|row| self.records.get(row))
                .cloned()
                .ok_or_else(|| {
                    grid_warn!(row_index, rows = self.records.len(), "click outside the record collection");
                    GridError::RowOutOfRange {
                        row: row_index,
                        len: self.records.len(),
                    }
                })?
        };

        self.controller.cell_activated(
            CellActivation::new(row_index, column_index, record).with_already_editing(already_editing),
        );
        self.apply_completed();
        Ok(())
    }

    /// Routes a key press from the view. Returns whether it was consumed.
    pub fn key_pressed(&mut self, press: KeyPress) -> Result<bool> {
        let consumed = self.controller.handle_key_press(press)?;
        self.apply_completed();
        Ok(consumed)
    }

    /// Opens a blank row. A valid deliberate save appends it to the records.
    pub fn add_row(&mut self) {
        self.controller.begin_new_row();
        self.apply_completed();
    }

    /// Updates a field of the row being edited.
    pub fn edit_field(&mut self, field: &str, value: impl Into<CellValue>) -> Result<()> {
        self.controller.edit_field(field, value)
    }

    /// Saves the row being edited, writing it back into the records when it
    /// passes validation.
    pub fn save_edit(&mut self) -> Result<ValidationResult> {
        let validations = self.controller.save()?;
        self.apply_completed();
        Ok(validations)
    }

    /// Discards the row being edited.
    pub fn cancel_edit(&mut self) -> Result<()> {
        self.controller.cancel()
    }

    /// Replaces the sort specification and re-sorts the records.
    ///
    /// Every descriptor must name a sortable column.
    pub fn set_sort(&mut self, sort: Vec<SortDescriptor>) -> Result<()> {
        if let Some(bad) = sort.iter().find(|d| !self.is_sortable(&d.field)) {
            grid_warn!(field = %bad.field, "sort rejected");
            return Err(GridError::NotSortable {
                field: bad.field.clone(),
            });
        }

        {
            let _span = PerfSpan::new("sort_records");
            sort_records(&mut self.records, &sort);
        }
        grid_debug!(descriptors = sort.len(), "records re-sorted");
        self.sort = sort;
        self.repaint_requested.emit(());
        Ok(())
    }

    /// Moves the column at `from` to position `to`.
    pub fn column_reordered(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.columns.len();
        for column in [from, to] {
            if column >= len {
                return Err(GridError::ColumnOutOfRange { column, len });
            }
        }

        let column = self.columns.remove(from);
        self.columns.insert(to, column);
        grid_trace!(from, to, "column reordered");
        self.repaint_requested.emit(());
        Ok(())
    }

    /// The view moved to another page. Only a repaint is needed.
    pub fn page_changed(&self, skip: usize, take: usize) {
        grid_trace!(skip, take, "page changed");
        self.repaint_requested.emit(());
    }

    /// The view's data state (paging, grouping) changed. Only a repaint is
    /// needed.
    pub fn data_state_changed(&self) {
        self.repaint_requested.emit(());
    }

    /// Writes saved rows from completed sessions back into the records.
    fn apply_completed(&mut self) {
        let completed = std::mem::take(&mut *self.completed.lock());
        let mut changed = false;

        for done in completed {
            if !done.is_valid() {
                continue;
            }
            let Some(mut row) = done.row_data else {
                continue;
            };
            row.coerce_to(&self.columns);

            match done.row_index {
                _ if done.is_new => self.records.push(row),
                Some(index) if index < self.records.len() => self.records[index] = row,
                Some(index) => {
                    grid_warn!(index, rows = self.records.len(), "saved row no longer exists");
                    continue;
                }
                None => continue,
            }
            changed = true;
        }

        if changed {
            sort_records(&mut self.records, &self.sort);
            grid_debug!(rows = self.records.len(), "saved rows applied");
            self.repaint_requested.emit(());
        }
    }

    fn is_sortable(&self, field: &str) -> bool {
        self.columns
            .iter()
            .any(|column| column.field == field && column.sortable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DataKind;

    fn grid() -> EditableGrid {
        let config = GridConfig::new(vec![
            ColumnDefinition::new("id", "Id").with_kind("integer").with_editable(false),
            ColumnDefinition::new("code", "Code").with_required(true).with_frozen(true),
            ColumnDefinition::new("secret", "Secret").with_hidden(true).with_sortable(false),
            ColumnDefinition::new("due", "Due").with_kind(DataKind::Date),
        ])
        .with_records(vec![
            Record::new().with("id", 2).with("code", "B"),
            Record::new().with("id", 1).with("code", "A"),
        ])
        .with_sort(vec![SortDescriptor::ascending("id")]);
        EditableGrid::new(config).unwrap()
    }

    #[test]
    fn test_initial_sort_applied() {
        let grid = grid();
        assert_eq!(grid.record(0).unwrap().get("id"), Some(&CellValue::Int(1)));
    }

    #[test]
    fn test_visible_and_frozen_columns() {
        let grid = grid();
        let visible: Vec<&str> = grid.visible_columns().map(|c| c.field.as_str()).collect();
        assert_eq!(visible, vec!["id", "code", "due"]);
        let frozen: Vec<&str> = grid.frozen_columns().map(|c| c.field.as_str()).collect();
        assert_eq!(frozen, vec!["code"]);
    }

    #[test]
    fn test_editor_kinds() {
        let grid = grid();
        assert_eq!(grid.editor_kind(0).unwrap(), EditorKind::Numeric);
        assert_eq!(grid.editor_kind(3).unwrap(), EditorKind::Date);
        assert!(matches!(grid.editor_kind(9), Err(GridError::ColumnOutOfRange { .. })));
    }

    #[test]
    fn test_row_style_alternates() {
        let grid = grid();
        assert!(grid.row_style(0).even && !grid.row_style(0).odd);
        assert!(grid.row_style(1).odd && grid.row_style(1).compact);
    }

    #[test]
    fn test_cell_click_out_of_range() {
        let mut grid = grid();
        assert!(matches!(
            grid.cell_clicked(5, 0, false),
            Err(GridError::RowOutOfRange { row: 5, len: 2 })
        ));
        assert!(matches!(
            grid.cell_clicked(-3, 0, false),
            Err(GridError::RowOutOfRange { .. })
        ));
        assert!(!grid.controller().is_editing());
    }

    #[test]
    fn test_set_sort_rejects_unsortable() {
        let mut grid = grid();
        assert!(matches!(
            grid.set_sort(vec![SortDescriptor::ascending("secret")]),
            Err(GridError::NotSortable { .. })
        ));
        grid.set_sort(vec![SortDescriptor::descending("code")]).unwrap();
        assert_eq!(grid.record(0).unwrap().get("code"), Some(&CellValue::from("B")));
    }

    #[test]
    fn test_saved_row_is_written_back() {
        let mut grid = grid();
        grid.cell_clicked(0, 1, false).unwrap();
        grid.edit_field("code", "Z").unwrap();
        grid.save_edit().unwrap();

        assert_eq!(grid.record(0).unwrap().get("code"), Some(&CellValue::from("Z")));
        assert_eq!(grid.record(0).unwrap().get("id"), Some(&CellValue::Int(1)));

        grid.cell_clicked(0, 1, false).unwrap();
        let session = grid.controller().session().unwrap();
        assert_eq!(session.working_copy().get("code"), Some(&CellValue::from("Z")));
    }

    #[test]
    fn test_invalid_and_implicit_saves_are_not_written() {
        let mut grid = grid();
        grid.cell_clicked(0, 1, false).unwrap();
        grid.edit_field("code", "").unwrap();
        grid.save_edit().unwrap();
        assert_eq!(grid.record(0).unwrap().get("code"), Some(&CellValue::from("A")));

        grid.cell_clicked(0, 1, false).unwrap();
        grid.edit_field("code", "draft").unwrap();
        grid.cell_clicked(1, 1, false).unwrap();
        assert_eq!(grid.record(0).unwrap().get("code"), Some(&CellValue::from("A")));
    }

    #[test]
    fn test_new_row_is_inserted_on_save() {
        let mut grid = grid();
        grid.add_row();
        grid.edit_field("code", "C").unwrap();
        grid.edit_field("due", "2024-03-01").unwrap();
        grid.save_edit().unwrap();

        assert_eq!(grid.row_count(), 3);
        let inserted = grid.records().iter().find(|r| r.get("code") == Some(&CellValue::from("C")));
        assert!(inserted.unwrap().get("due").and_then(CellValue::as_date).is_some());
    }

    #[test]
    fn test_set_records_cancels_open_edit() {
        let mut grid = grid();
        grid.cell_clicked(0, 1, false).unwrap();
        grid.set_records(vec![Record::new().with("id", 5).with("code", "E")]);

        assert!(!grid.controller().is_editing());
        assert_eq!(grid.row_count(), 1);
    }

    #[test]
    fn test_column_reorder() {
        let mut grid = grid();
        grid.column_reordered(3, 0).unwrap();
        assert_eq!(grid.columns()[0].field, "due");
        assert!(grid.column_reordered(0, 7).is_err());
    }
}
