// File: ./src/tui/state.rs
// Manages the application state for the TUI.
use crate::calendar::{DayCell, MonthCursor, MonthView};
use crate::config::AppTheme;
use crate::controller::{CalendarController, EditorInput};
use crate::model::Event;
use chrono::Duration;
use ratatui::layout::Rect;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum InputMode {
    Normal,
    Editing,
    ConfirmDelete,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum EditorField {
    Course,
    Title,
    Start,
    End,
}

impl EditorField {
    pub const ALL: [EditorField; 4] = [
        EditorField::Course,
        EditorField::Title,
        EditorField::Start,
        EditorField::End,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EditorField::Course => "Course",
            EditorField::Title => "Title",
            EditorField::Start => "Start",
            EditorField::End => "End",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// In-progress editor input. Discarded on cancel.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EditorForm {
    pub input: EditorInput,
    pub focus: usize,
}

impl EditorForm {
    pub fn focused(&self) -> EditorField {
        EditorField::ALL[self.focus % EditorField::ALL.len()]
    }

    pub fn value(&self, field: EditorField) -> &str {
        match field {
            EditorField::Course => &self.input.course,
            EditorField::Title => &self.input.title,
            EditorField::Start => &self.input.start,
            EditorField::End => &self.input.end,
        }
    }

    fn value_mut(&mut self, field: EditorField) -> &mut String {
        match field {
            EditorField::Course => &mut self.input.course,
            EditorField::Title => &mut self.input.title,
            EditorField::Start => &mut self.input.start,
            EditorField::End => &mut self.input.end,
        }
    }

    pub fn push_char(&mut self, c: char) {
        let field = self.focused();
        self.value_mut(field).push(c);
    }

    pub fn backspace(&mut self) {
        let field = self.focused();
        self.value_mut(field).pop();
    }

    pub fn next_field(&mut self) {
        self.focus = (self.focused().index() + 1) % EditorField::ALL.len();
    }

    pub fn prev_field(&mut self) {
        let n = EditorField::ALL.len();
        self.focus = (self.focused().index() + n - 1) % n;
    }
}

pub struct AppState {
    pub controller: CalendarController,
    pub month: MonthView,

    // Selection
    pub selected_day: u32,
    pub selected_event: Option<usize>,

    // UI State
    pub mode: InputMode,
    pub form: EditorForm,
    pub pending_delete: Option<(String, Event)>,
    pub message: String,
    pub show_full_help: bool,

    // Hit-test geometry from the last draw
    pub day_areas: Vec<(Rect, u32)>,
    pub event_areas: Vec<(Rect, u32, usize)>,
    pub editor_area: Option<Rect>,
}

impl AppState {
    pub fn new(mut controller: CalendarController) -> Self {
        let today = chrono::Local::now().date_naive();
        let selected_day = if controller.view.cursor == MonthCursor::containing(today) {
            chrono::Datelike::day(&today)
        } else {
            1
        };
        let month = controller.render();

        Self {
            controller,
            month,
            selected_day,
            selected_event: None,
            mode: InputMode::Normal,
            form: EditorForm::default(),
            pending_delete: None,
            message: "Press ? for help.".to_string(),
            show_full_help: false,
            day_areas: vec![],
            event_areas: vec![],
            editor_area: None,
        }
    }

    /// Re-renders the month and clamps the selection to what is visible.
    pub fn refresh(&mut self) {
        self.month = self.controller.render();
        let days = self.month.days.len() as u32;
        self.selected_day = self.selected_day.clamp(1, days.max(1));

        let count = self.selected_cell().map_or(0, |c| c.events.len());
        self.selected_event = match self.selected_event {
            Some(_) if count == 0 => None,
            Some(i) => Some(i.min(count - 1)),
            None => None,
        };
    }

    pub fn theme(&self) -> AppTheme {
        self.controller.view.theme
    }

    pub fn selected_cell(&self) -> Option<&DayCell> {
        self.month.cell(self.selected_day)
    }

    // --- Navigation ---

    /// Moves the day selection, crossing into neighbouring months as needed.
    pub fn move_day(&mut self, delta: i64) {
        let cursor = self.controller.view.cursor;
        let Some(current) = cursor.date(self.selected_day) else {
            return;
        };
        let Some(target) = current.checked_add_signed(Duration::days(delta)) else {
            return;
        };
        let target_cursor = MonthCursor::containing(target);
        if target_cursor != cursor {
            self.controller.go_to(target_cursor);
        }
        self.selected_day = chrono::Datelike::day(&target);
        self.selected_event = None;
        self.refresh();
    }

    pub fn next_month(&mut self) {
        self.controller.next_month();
        self.selected_event = None;
        self.refresh();
    }

    pub fn prev_month(&mut self) {
        self.controller.prev_month();
        self.selected_event = None;
        self.refresh();
    }

    pub fn select_day(&mut self, day: u32) {
        if day != self.selected_day {
            self.selected_event = None;
        }
        self.selected_day = day;
        self.refresh();
    }

    /// Tab through the selected day's events; wraps back to "none selected".
    pub fn cycle_event(&mut self) {
        let count = self.selected_cell().map_or(0, |c| c.events.len());
        self.selected_event = match self.selected_event {
            _ if count == 0 => None,
            None => Some(0),
            Some(i) if i + 1 < count => Some(i + 1),
            Some(_) => None,
        };
    }

    pub fn cycle_filter(&mut self) {
        self.controller.cycle_course_filter();
        self.selected_event = None;
        self.refresh();
        self.message = match &self.controller.view.course_filter {
            Some(c) => format!("Showing {}", c),
            None => "Showing All Courses".to_string(),
        };
    }

    pub fn toggle_theme(&mut self) {
        self.controller.toggle_theme();
        self.refresh();
    }

    // --- Editor ---

    pub fn open_editor(&mut self) {
        let Some(key) = self.selected_cell().map(|c| c.date_key.clone()) else {
            return;
        };
        self.controller.open_editor(&key);
        self.form = EditorForm::default();
        self.mode = InputMode::Editing;
        self.message = format!("New event on {}", key);
    }

    pub fn cancel_editor(&mut self) {
        self.controller.cancel_editor();
        self.form = EditorForm::default();
        self.mode = InputMode::Normal;
        self.editor_area = None;
        self.message = "Cancelled.".to_string();
    }

    pub fn submit_editor(&mut self) {
        match self.controller.submit_editor(&self.form.input) {
            Ok(event) => {
                self.message = format!("Added {}", event.label());
                self.form = EditorForm::default();
                self.mode = InputMode::Normal;
                self.editor_area = None;
                self.refresh();
            }
            Err(e) => {
                // Editor stays open with the user's input intact.
                self.message = e.to_string();
            }
        }
    }

    // --- Deletion ---

    pub fn request_delete(&mut self) {
        let target = self.selected_cell().and_then(|cell| {
            let block = cell.events.get(self.selected_event?)?;
            Some((cell.date_key.clone(), block.event.clone()))
        });
        let Some((key, event)) = target else {
            self.message = "Select an event with Tab first.".to_string();
            return;
        };
        self.message = format!("Remove \"{}\" from {}? (y/n)", event.title, event.course);
        self.pending_delete = Some((key, event));
        self.mode = InputMode::ConfirmDelete;
    }

    pub fn resolve_delete(&mut self, confirmed: bool) {
        let pending = self.pending_delete.take();
        self.mode = InputMode::Normal;

        let Some((key, event)) = pending.filter(|_| confirmed) else {
            self.message = "Kept.".to_string();
            return;
        };

        match self.controller.remove_event(&key, &event) {
            Ok(n) => {
                self.message = format!("Removed {} event(s).", n);
                self.selected_event = None;
                self.refresh();
            }
            Err(e) => self.message = format!("Error: {:#}", e),
        }
    }
}
