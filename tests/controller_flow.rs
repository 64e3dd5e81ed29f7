// File: tests/controller_flow.rs
// End-to-end behavior of the controller against a throwaway data directory.
use coursecal::calendar::MonthCursor;
use coursecal::config::{AppTheme, Config};
use coursecal::context::{AppContext, TestContext};
use coursecal::controller::{CalendarController, EditorInput, SaveError};
use coursecal::model::Event;
use coursecal::storage::LocalStorage;
use std::sync::Arc;

const DAY: &str = "2025-3-7";

fn setup() -> (Arc<dyn AppContext>, CalendarController) {
    let ctx: Arc<dyn AppContext> = Arc::new(TestContext::new());
    let mut ctrl = CalendarController::load(ctx.clone(), Config::default()).unwrap();
    ctrl.go_to(MonthCursor::new(2025, 3).unwrap());
    (ctx, ctrl)
}

fn submit(ctrl: &mut CalendarController, course: &str, title: &str, start: &str, end: &str) -> Result<Event, SaveError> {
    ctrl.open_editor(DAY);
    ctrl.submit_editor(&EditorInput::new(course, title, start, end))
}

#[test]
fn test_add_render_delete_round_trip() {
    let (ctx, mut ctrl) = setup();

    let saved = submit(&mut ctrl, "CS101", "Lecture", "9am", "10am").unwrap();
    assert_eq!(saved.start_time.as_deref(), Some("09:00"));
    assert_eq!(saved.end_time.as_deref(), Some("10:00"));
    assert_eq!(ctrl.editor_target(), None, "editor closes on success");

    let view = ctrl.render();
    let cell = view.find(DAY).unwrap();
    assert_eq!(cell.events.len(), 1);
    let block = &cell.events[0];
    assert_eq!(block.label, "CS101: Lecture");
    assert_eq!(block.time_label, "09:00-10:00");
    assert_eq!(block.top, 15.0);
    assert_eq!(block.height, 24.0);

    // Persisted immediately.
    let on_disk = LocalStorage::load_events(ctx.as_ref()).unwrap();
    assert_eq!(on_disk.get(DAY).map(Vec::len), Some(1));

    let removed = ctrl.remove_event(DAY, &block.event).unwrap();
    assert_eq!(removed, 1);
    assert!(!ctrl.store().days().contains_key(DAY));

    let on_disk = LocalStorage::load_events(ctx.as_ref()).unwrap();
    assert!(!on_disk.contains_key(DAY), "empty day key is removed from the blob");
}

#[test]
fn test_equal_start_and_end_collapse_to_point_event() {
    let (_ctx, mut ctrl) = setup();
    let saved = submit(&mut ctrl, "CS101", "Office hours", "2pm", "14:00").unwrap();
    assert_eq!(saved.start_time.as_deref(), Some("14:00"));
    assert_eq!(saved.end_time, None);
}

#[test]
fn test_validation_messages_and_order() {
    let (_ctx, mut ctrl) = setup();

    let err = submit(&mut ctrl, "CS101", "", "25:00", "").unwrap_err();
    assert!(matches!(err, SaveError::InvalidTimeFormat), "time format is checked before title");
    assert_eq!(
        err.to_string(),
        "Invalid time format. Use formats like 1pm, 12:30am, or 14:00."
    );

    let err = submit(&mut ctrl, "CS101", "   ", "9am", "").unwrap_err();
    assert!(matches!(err, SaveError::MissingTitle));
    assert_eq!(err.to_string(), "Title required!");

    let err = submit(&mut ctrl, "CS101", "Lecture", "3pm", "1pm").unwrap_err();
    assert!(matches!(err, SaveError::StartAfterEnd));
    assert_eq!(err.to_string(), "Start time cannot be after the end time!");

    assert_eq!(ctrl.editor_target(), Some(DAY), "editor stays open after a failed save");
    assert!(ctrl.store().is_empty());
}

#[test]
fn test_conflicting_event_is_blocked() {
    let (_ctx, mut ctrl) = setup();
    submit(&mut ctrl, "CS101", "Lecture", "9:00", "10:30").unwrap();

    let err = submit(&mut ctrl, "MATH200", "Quiz", "10am", "11am").unwrap_err();
    assert!(matches!(err, SaveError::Conflict));
    assert_eq!(err.to_string(), "This event conflicts with an existing one");

    // Touching boundary is fine.
    submit(&mut ctrl, "MATH200", "Quiz", "10:30", "11:00").unwrap();

    // Start-only candidates use a one-hour default.
    let err = submit(&mut ctrl, "PHYS150", "Lab", "10:45", "").unwrap_err();
    assert!(matches!(err, SaveError::Conflict));

    // Untimed never conflicts.
    submit(&mut ctrl, "ENG110", "Essay due", "", "").unwrap();
    assert_eq!(ctrl.store().day(DAY).len(), 3);
}

#[test]
fn test_submit_without_editor_is_rejected() {
    let (_ctx, mut ctrl) = setup();
    let err = ctrl
        .submit_editor(&EditorInput::new("CS101", "Lecture", "", ""))
        .unwrap_err();
    assert!(matches!(err, SaveError::NoEditorOpen));
}

#[test]
fn test_cancel_discards_without_mutation() {
    let (_ctx, mut ctrl) = setup();
    ctrl.open_editor(DAY);
    ctrl.cancel_editor();
    assert_eq!(ctrl.editor_target(), None);
    assert!(ctrl.store().is_empty());
}

#[test]
fn test_remove_matches_stored_meridiem_times() {
    let ctx: Arc<dyn AppContext> = Arc::new(TestContext::new());
    // Blob written by an older version that kept raw strings.
    let mut blob = coursecal::storage::EventMap::new();
    blob.insert(DAY.to_string(), vec![Event::new("CS101", "Lecture", Some("1pm"), None)]);
    LocalStorage::save_events(ctx.as_ref(), &blob).unwrap();

    let mut ctrl = CalendarController::load(ctx.clone(), Config::default()).unwrap();
    let n = ctrl
        .remove_event(DAY, &Event::new("CS101", "Lecture", Some("13:00"), None))
        .unwrap();
    assert_eq!(n, 1);
    assert!(LocalStorage::load_events(ctx.as_ref()).unwrap().is_empty());
}

#[test]
fn test_state_survives_reload() {
    let (ctx, mut ctrl) = setup();
    submit(&mut ctrl, "BIO300", "Dissection", "1pm", "3pm").unwrap();
    let first = ctrl.render();
    let color = first.find(DAY).unwrap().events[0].color.clone();
    assert!(color.starts_with("hsl("), "new course gets a generated color");

    let mut reloaded = CalendarController::load(ctx.clone(), Config::default()).unwrap();
    reloaded.go_to(MonthCursor::new(2025, 3).unwrap());
    assert_eq!(reloaded.store().day(DAY).len(), 1);
    let view = reloaded.render();
    assert_eq!(view.find(DAY).unwrap().events[0].color, color, "color assignment is stable");
}

#[test]
fn test_known_course_keeps_preset_color() {
    let (ctx, mut ctrl) = setup();
    submit(&mut ctrl, "MATH200", "Lecture", "9am", "").unwrap();
    let view = ctrl.render();
    assert_eq!(view.find(DAY).unwrap().events[0].color, "#2196f3");
    // Nothing new was assigned, so there is nothing to persist.
    assert!(LocalStorage::load_course_colors(ctx.as_ref()).unwrap().is_empty());
}

#[test]
fn test_filter_navigation_and_theme() {
    let (_ctx, mut ctrl) = setup();
    submit(&mut ctrl, "CS101", "Lecture", "9am", "").unwrap();
    submit(&mut ctrl, "MATH200", "Quiz", "11am", "").unwrap();

    ctrl.set_course_filter(Some("MATH200"));
    assert_eq!(ctrl.render().find(DAY).unwrap().events.len(), 1);

    ctrl.set_course_filter(Some(""));
    assert_eq!(ctrl.view.course_filter, None, "empty selection means all courses");

    ctrl.cycle_course_filter();
    assert_eq!(ctrl.view.course_filter.as_deref(), Some("CS101"));
    ctrl.cycle_course_filter();
    assert_eq!(ctrl.view.course_filter.as_deref(), Some("MATH200"));
    ctrl.cycle_course_filter();
    assert_eq!(ctrl.view.course_filter, None);

    ctrl.set_course_filter(Some("CS101"));
    ctrl.next_month();
    assert_eq!(ctrl.render().title, "April 2025");
    assert_eq!(ctrl.view.course_filter.as_deref(), Some("CS101"), "filter survives navigation");
    ctrl.prev_month();
    ctrl.prev_month();
    assert_eq!(ctrl.render().title, "February 2025");

    assert_eq!(ctrl.view.theme, AppTheme::Light);
    ctrl.toggle_theme();
    assert_eq!(ctrl.view.theme, AppTheme::Dark);
}

#[test]
fn test_trims_title_and_course() {
    let (_ctx, mut ctrl) = setup();
    let saved = submit(&mut ctrl, " CS101 ", "  Lecture ", " 9am ", "").unwrap();
    assert_eq!(saved.course, "CS101");
    assert_eq!(saved.title, "Lecture");
}

#[test]
fn test_failed_save_leaves_store_untouched() {
    let (ctx, mut ctrl) = setup();
    submit(&mut ctrl, "CS101", "Lecture", "9am", "10am").unwrap();
    let before = ctrl.store().clone();

    // A directory where the events file should be makes the rename fail.
    let path = ctx.get_events_path().unwrap();
    std::fs::remove_file(&path).unwrap();
    std::fs::create_dir_all(path.join("blocker")).unwrap();

    let err = submit(&mut ctrl, "MATH200", "Quiz", "1pm", "2pm").unwrap_err();
    assert!(matches!(err, SaveError::Storage(_)));
    assert!(err.to_string().starts_with("Could not save events"));
    assert_eq!(ctrl.store(), &before, "in-memory store is unchanged");
    assert_eq!(ctrl.editor_target(), Some(DAY), "editor stays open for a retry");

    let view = ctrl.render();
    let cell = view.find(DAY).unwrap();
    let err = ctrl.remove_event(DAY, &cell.events[0].event).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to save"));
    assert_eq!(ctrl.store(), &before);
}
