//! Integration tests for the inline edit lifecycle.
//!
//! These drive the controller and the grid the way a view would and check
//! the signals a host observes.

use std::sync::Arc;
use std::time::{Duration, Instant};

use editgrid::edit::{EditTarget, FocusRequest};
use editgrid::prelude::*;
use editgrid::validation::{REQUIRED_MESSAGE, ValidationKind};
use parking_lot::Mutex;

/// Records every controller signal in emission order.
#[derive(Clone, Default)]
struct EventLog {
    events: Arc<Mutex<Vec<String>>>,
    completed: Arc<Mutex<Vec<EditCompleted>>>,
    clicked: Arc<Mutex<Vec<CellClicked>>>,
}

impl EventLog {
    fn attach(controller: &InlineEditController) -> Self {
        let log = Self::default();

        let events = log.events.clone();
        let clicked = log.clicked.clone();
        controller.cell_clicked.connect(move |click| {
            events.lock().push("clicked".into());
            clicked.lock().push(click.clone());
        });

        let events = log.events.clone();
        controller
            .edit_started
            .connect(move |_| events.lock().push("started".into()));

        let events = log.events.clone();
        let completed = log.completed.clone();
        controller.edit_completed.connect(move |done| {
            events.lock().push("completed".into());
            completed.lock().push(done.clone());
        });

        let events = log.events.clone();
        controller
            .edit_canceled
            .connect(move |_| events.lock().push("canceled".into()));

        let events = log.events.clone();
        controller
            .cell_edited
            .connect(move |edit| events.lock().push(format!("edited:{}", edit.field)));

        log
    }

    fn events(&self) -> Vec<String> {
        self.events.lock().clone()
    }

    fn count(&self, name: &str) -> usize {
        self.events.lock().iter().filter(|e| *e == name).count()
    }
}

fn columns() -> Vec<ColumnDefinition> {
    vec![
        ColumnDefinition::new("recordId", "Id")
            .with_kind("integer")
            .with_editable(false),
        ColumnDefinition::new("recordCode", "Code").with_required(true),
        ColumnDefinition::new("recordDescription", "Description").with_required(true),
        ColumnDefinition::new("quantity", "Quantity").with_kind("integer"),
    ]
}

fn record(id: i64, code: &str, description: &str) -> Record {
    Record::new()
        .with("recordId", id)
        .with("recordCode", code)
        .with("recordDescription", description)
        .with("quantity", 3)
}

fn controller() -> InlineEditController {
    InlineEditController::from_columns(&columns()).with_id_field("recordId")
}

#[test]
fn test_switching_rows_saves_implicitly() {
    let mut controller = controller();
    let log = EventLog::attach(&controller);

    controller.begin_edit(0, &record(1, "A", "first"));
    controller.edit_field("recordCode", "").unwrap();
    controller.begin_edit(1, &record(2, "B", "second"));

    assert_eq!(
        log.events(),
        vec!["started", "edited:recordCode", "completed", "started"]
    );

    let completed = log.completed.lock();
    assert_eq!(completed.len(), 1);
    assert!(completed[0].is_implicit());
    assert_eq!(completed[0].row_index, Some(0));

    // The implicit save still reports what failed on the row being left.
    let validations = completed[0].validations.as_ref().unwrap();
    assert!(!validations.is_valid());
    assert_eq!(
        validations.get("recordCode").unwrap().message.as_deref(),
        Some(REQUIRED_MESSAGE)
    );

    assert_eq!(controller.state(), EditState::EditingExisting(1));
}

#[test]
fn test_at_most_one_row_editing() {
    let mut controller = controller();

    for row in 0..5 {
        controller.begin_edit(row, &record(row as i64, "C", "d"));
        let session = controller.session().unwrap();
        assert_eq!(session.target(), EditTarget::Existing(row as usize));
    }
    controller.begin_new_row();
    assert_eq!(controller.state(), EditState::EditingNew);

    controller.begin_edit(2, &record(2, "C", "d"));
    assert_eq!(controller.state(), EditState::EditingExisting(2));
}

#[test]
fn test_rebegin_same_row_keeps_working_copy() {
    let mut controller = controller();
    let log = EventLog::attach(&controller);

    controller.begin_edit(0, &record(1, "A", "first"));
    controller.edit_field("recordCode", "changed").unwrap();
    controller.begin_edit(0, &record(1, "A", "first"));

    assert_eq!(log.count("started"), 1);
    assert_eq!(log.count("completed"), 0);
    assert_eq!(
        controller.session().unwrap().working_copy().get("recordCode"),
        Some(&CellValue::from("changed"))
    );
}

#[test]
fn test_deliberate_save_returns_to_idle() {
    let mut controller = controller();
    let log = EventLog::attach(&controller);

    controller.begin_edit(0, &record(7, "A", "first"));
    controller.edit_field("recordDescription", "updated").unwrap();
    let validations = controller.save().unwrap();

    assert!(validations.is_valid());
    assert_eq!(controller.state(), EditState::Idle);
    assert_eq!(log.count("completed"), 1);

    let completed = log.completed.lock();
    let row = completed[0].row_data.as_ref().unwrap();
    assert_eq!(row.get("recordId"), Some(&CellValue::Int(7)));
    assert_eq!(row.get("recordDescription"), Some(&CellValue::from("updated")));
    assert!(!completed[0].is_new);
}

#[test]
fn test_invalid_save_still_closes_session() {
    let mut controller = controller();

    controller.begin_edit(0, &record(1, "A", "first"));
    controller.edit_field("recordCode", "   ").unwrap();
    controller.edit_field("quantity", "many").unwrap();
    let validations = controller.save().unwrap();

    assert_eq!(validations.error_count(), 2);
    assert_eq!(
        validations.get("recordCode").unwrap().kind,
        Some(ValidationKind::Required)
    );
    assert_eq!(
        validations.get("quantity").unwrap().kind,
        Some(ValidationKind::Type)
    );
    assert!(!controller.is_editing());
}

#[test]
fn test_new_row_save_emits_working_copy() {
    let mut controller = controller();
    let log = EventLog::attach(&controller);

    controller.begin_new_row();
    controller.edit_field("recordCode", "N1").unwrap();
    let validations = controller.save().unwrap();

    assert!(!validations.is_valid());
    assert!(!validations.get("recordDescription").unwrap().valid);

    let completed = log.completed.lock();
    assert!(completed[0].is_new);
    assert_eq!(completed[0].row_index, None);
    let row = completed[0].row_data.as_ref().unwrap();
    assert_eq!(row.get("recordCode"), Some(&CellValue::from("N1")));
    assert!(!row.contains("recordId"));
}

#[test]
fn test_no_cell_edited_after_cancel() {
    let mut controller = controller();
    let log = EventLog::attach(&controller);

    controller.begin_edit(0, &record(1, "A", "first"));
    controller.cancel().unwrap();

    assert!(controller.edit_field("recordCode", "late").is_err());
    assert_eq!(log.events(), vec!["started", "canceled"]);
    assert_eq!(log.count("completed"), 0);
}

#[test]
fn test_edit_before_begin_is_an_error() {
    let mut controller = controller();
    let err = controller.edit_field("recordCode", "x").unwrap_err();
    assert!(matches!(err, GridError::NotEditing { .. }));
    assert!(err.is_invalid_transition());
}

#[test]
fn test_group_header_click_opens_nothing() {
    let mut controller = controller();
    let log = EventLog::attach(&controller);

    controller.cell_activated(CellActivation::new(NO_ROW, 2, Record::new()));

    assert_eq!(log.events(), vec!["clicked", "started"]);
    assert!(!controller.is_editing());
    assert_eq!(controller.pending_focus_requests(), 0);

    let clicked = log.clicked.lock();
    assert_eq!(clicked[0].row_index, NO_ROW);
    assert_eq!(clicked[0].id, None);
}

#[test]
fn test_begin_edit_on_no_row_keeps_open_session() {
    let mut controller = controller();
    let log = EventLog::attach(&controller);

    controller.begin_edit(0, &record(1, "A", "first"));
    controller.edit_field("recordCode", "draft").unwrap();
    controller.begin_edit(NO_ROW, &Record::new());

    assert_eq!(log.events(), vec!["started", "edited:recordCode", "started"]);
    assert_eq!(controller.state(), EditState::EditingExisting(0));
    assert_eq!(
        controller.session().unwrap().working_copy().get("recordCode"),
        Some(&CellValue::from("draft"))
    );
}

#[test]
fn test_group_header_click_saves_open_row() {
    let mut controller = controller().with_focus_delay(Duration::from_secs(60));
    let log = EventLog::attach(&controller);

    controller.cell_activated(CellActivation::new(0, 1, record(1, "A", "first")));
    controller.cell_activated(CellActivation::new(NO_ROW, 1, Record::new()));

    assert_eq!(
        log.events(),
        vec!["clicked", "started", "clicked", "completed", "started"]
    );
    assert!(log.completed.lock()[0].is_implicit());
    assert_eq!(controller.state(), EditState::Idle);
    assert_eq!(controller.pending_focus_requests(), 0);
}

#[test]
fn test_new_click_replaces_pending_focus() {
    let mut controller = controller().with_focus_delay(Duration::from_secs(60));

    controller.cell_activated(CellActivation::new(0, 1, record(1, "A", "first")));
    controller.cell_activated(CellActivation::new(0, 3, record(1, "A", "first")));
    controller.cell_activated(CellActivation::new(1, 2, record(2, "B", "second")));

    assert_eq!(controller.pending_focus_requests(), 1);
    assert_eq!(
        controller.pending_focus(),
        Some(FocusRequest { row: 1, column: 2 })
    );

    controller.cancel().unwrap();
    assert_eq!(controller.pending_focus_requests(), 0);
    assert_eq!(controller.pending_focus(), None);
    assert_eq!(controller.next_timer_deadline(), None);
}

#[test]
fn test_click_on_open_editor_only_reports_click() {
    let mut controller = controller();
    let log = EventLog::attach(&controller);

    controller.cell_activated(CellActivation::new(0, 1, record(1, "A", "first")));
    controller.cell_activated(
        CellActivation::new(0, 2, record(1, "A", "first")).with_already_editing(true),
    );

    assert_eq!(log.events(), vec!["clicked", "started", "clicked"]);
    assert_eq!(log.clicked.lock()[1].id, Some(CellValue::Int(1)));
    assert_eq!(controller.pending_focus_requests(), 1);
}

#[test]
fn test_focus_failure_is_swallowed() {
    let mut controller = controller().with_focus_delay(Duration::ZERO);
    let attempts = Arc::new(Mutex::new(Vec::new()));
    let attempts_clone = attempts.clone();
    controller.set_focus_target(move |row: usize, column: usize| -> Result<(), FocusError> {
        attempts_clone.lock().push((row, column));
        Err(FocusError::NoEditor { row, column })
    });

    controller.cell_activated(CellActivation::new(3, 2, record(4, "D", "fourth")));
    assert!(controller.next_timer_deadline().is_some());

    let fired = controller.poll_timers(Instant::now() + Duration::from_millis(1));

    assert_eq!(fired, 1);
    assert_eq!(*attempts.lock(), vec![(3, 2)]);
    assert_eq!(controller.state(), EditState::EditingExisting(3));
    assert_eq!(controller.pending_focus_requests(), 0);
}

#[test]
fn test_focus_waits_for_delay() {
    let mut controller = controller().with_focus_delay(Duration::from_secs(60));
    let focused = Arc::new(Mutex::new(0));
    let focused_clone = focused.clone();
    controller.set_focus_target(move |_row: usize, _column: usize| -> Result<(), FocusError> {
        *focused_clone.lock() += 1;
        Ok(())
    });

    controller.cell_activated(CellActivation::new(0, 0, record(1, "A", "first")));

    assert_eq!(controller.poll_timers(Instant::now()), 0);
    assert_eq!(*focused.lock(), 0);
    assert_eq!(controller.pending_focus_requests(), 1);

    let later = Instant::now() + Duration::from_secs(61);
    assert_eq!(controller.poll_timers(later), 1);
    assert_eq!(*focused.lock(), 1);
}

#[test]
fn test_enter_commits_the_open_row() {
    let mut controller = controller();
    let log = EventLog::attach(&controller);

    assert!(!controller.handle_key_press(KeyPress::new(Key::Enter)).unwrap());

    controller.begin_edit(0, &record(1, "A", "first"));
    let foreign = KeyPress::new(Key::Enter).with_origin(KeyOrigin::ForeignGrid);
    assert!(!controller.handle_key_press(foreign).unwrap());
    assert!(controller.is_editing());

    assert!(!controller.handle_key_press(KeyPress::new(Key::Other)).unwrap());
    assert!(controller.handle_key_press(KeyPress::new(Key::NumpadEnter)).unwrap());

    assert_eq!(controller.state(), EditState::Idle);
    assert_eq!(log.count("completed"), 1);
    assert!(!log.completed.lock()[0].is_implicit());
}

#[test]
fn test_editor_kind_mapping() {
    assert_eq!(map_editor_kind("boolean"), EditorKind::Boolean);
    assert_eq!(map_editor_kind("date"), EditorKind::Date);
    assert_eq!(map_editor_kind("integer"), EditorKind::Numeric);
    assert_eq!(map_editor_kind("decimal"), EditorKind::Numeric);
    assert_eq!(map_editor_kind("string"), EditorKind::Text);
    assert_eq!(map_editor_kind("geometry"), EditorKind::Text);
}

#[test]
fn test_validator_is_pure() {
    let schema = EditSchema::new(vec![
        FieldRule::required("recordCode", DataKind::String),
        FieldRule::required("recordDescription", DataKind::String),
    ]);
    let values = Record::new().with("recordCode", "A1");

    let first = validate(&schema, &values);
    let second = validate(&schema, &values);

    assert_eq!(first, second);
    assert!(first.get("recordCode").unwrap().valid);
    assert!(!first.get("recordDescription").unwrap().valid);
}

#[test]
fn test_grid_routes_clicks_and_keys() {
    let config = GridConfig::new(columns())
        .with_id_field("recordId")
        .with_records(vec![record(1, "A", "first"), record(2, "B", "second")]);
    let mut grid = EditableGrid::new(config).unwrap();
    let log = EventLog::attach(grid.controller());

    grid.cell_clicked(0, 1, false).unwrap();
    grid.edit_field("recordCode", "A2").unwrap();
    grid.cell_clicked(1, 1, false).unwrap();
    assert!(grid.key_pressed(KeyPress::new(Key::Enter)).unwrap());

    assert_eq!(
        log.events(),
        vec![
            "clicked",
            "started",
            "edited:recordCode",
            "clicked",
            "completed",
            "started",
            "completed",
        ]
    );
    let completed = log.completed.lock();
    assert!(completed[0].is_implicit());
    assert_eq!(completed[1].row_index, Some(1));
}

#[test]
fn test_grid_repaints_on_sort_and_paging() {
    let config = GridConfig::new(columns())
        .with_records(vec![record(1, "B", "x"), record(2, "A", "y")]);
    let mut grid = EditableGrid::new(config).unwrap();

    let repaints = Arc::new(Mutex::new(0));
    let repaints_clone = repaints.clone();
    grid.repaint_requested
        .connect(move |_| *repaints_clone.lock() += 1);

    grid.set_sort(vec![SortDescriptor::ascending("recordCode")])
        .unwrap();
    assert_eq!(
        grid.record(0).unwrap().get("recordCode"),
        Some(&CellValue::from("A"))
    );

    grid.page_changed(0, 20);
    grid.data_state_changed();
    grid.column_reordered(0, 1).unwrap();

    assert_eq!(*repaints.lock(), 4);
}

#[test]
fn test_committed_row_reopens_with_saved_values() {
    let config = GridConfig::new(columns())
        .with_id_field("recordId")
        .with_records(vec![record(1, "A", "first"), record(2, "B", "second")]);
    let mut grid = EditableGrid::new(config).unwrap();

    grid.cell_clicked(0, 1, false).unwrap();
    grid.edit_field("recordCode", "Z").unwrap();
    assert!(grid.key_pressed(KeyPress::new(Key::Enter)).unwrap());
    assert_eq!(
        grid.record(0).unwrap().get("recordCode"),
        Some(&CellValue::from("Z"))
    );

    grid.cell_clicked(0, 1, false).unwrap();
    assert_eq!(
        grid.controller()
            .session()
            .unwrap()
            .working_copy()
            .get("recordCode"),
        Some(&CellValue::from("Z"))
    );
}
