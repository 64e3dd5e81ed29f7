// File: src/controller.rs
//! Central controller for calendar operations.
//! Owns the event store, the course color map and the view state, and is the
//! only place that crosses the persistence boundary. Front-ends (TUI, CLI)
//! call into it and paint whatever `render` returns.
use crate::calendar::{MonthCursor, MonthView, RenderOptions, render_month};
use crate::color_utils::CourseColors;
use crate::config::{AppTheme, Config};
use crate::conflict::has_conflict;
use crate::context::AppContext;
use crate::layout::LayoutConfig;
use crate::model::{Event, TimeInput, parse_time_input, time_to_minutes};
use crate::storage::LocalStorage;
use crate::store::EventStore;
use anyhow::Result;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Transient, in-memory only.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub cursor: MonthCursor,
    /// `None` shows all courses.
    pub course_filter: Option<String>,
    /// Date key the editor is open for.
    pub editor_target: Option<String>,
    pub theme: AppTheme,
}

/// Raw editor fields as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorInput {
    pub course: String,
    pub title: String,
    pub start: String,
    pub end: String,
}

impl EditorInput {
    pub fn new(course: &str, title: &str, start: &str, end: &str) -> Self {
        Self {
            course: course.to_string(),
            title: title.to_string(),
            start: start.to_string(),
            end: end.to_string(),
        }
    }
}

#[derive(Debug)]
pub enum SaveError {
    NoEditorOpen,
    InvalidTimeFormat,
    MissingTitle,
    StartAfterEnd,
    Conflict,
    Storage(anyhow::Error),
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::NoEditorOpen => write!(f, "No day selected."),
            SaveError::InvalidTimeFormat => write!(
                f,
                "Invalid time format. Use formats like 1pm, 12:30am, or 14:00."
            ),
            SaveError::MissingTitle => write!(f, "Title required!"),
            SaveError::StartAfterEnd => write!(f, "Start time cannot be after the end time!"),
            SaveError::Conflict => write!(f, "This event conflicts with an existing one"),
            SaveError::Storage(e) => write!(f, "Could not save events: {:#}", e),
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaveError::Storage(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

pub struct CalendarController {
    ctx: Arc<dyn AppContext>,
    config: Config,
    layout: LayoutConfig,
    store: EventStore,
    colors: CourseColors,
    pub view: ViewState,
}

impl CalendarController {
    /// Reads both persisted namespaces once. Missing files mean empty maps.
    pub fn load(ctx: Arc<dyn AppContext>, config: Config) -> Result<Self> {
        let store = EventStore::from_map(LocalStorage::load_events(ctx.as_ref())?);
        let saved_colors = LocalStorage::load_course_colors(ctx.as_ref())?;
        let colors = CourseColors::layered(&config.course_colors, saved_colors);

        Ok(Self {
            layout: config.layout(),
            view: ViewState {
                cursor: MonthCursor::today(),
                course_filter: None,
                editor_target: None,
                theme: config.theme,
            },
            ctx,
            config,
            store,
            colors,
        })
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn colors(&self) -> &CourseColors {
        &self.colors
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    // --- Navigation & view ---

    pub fn go_to(&mut self, cursor: MonthCursor) {
        self.view.cursor = cursor;
    }

    pub fn next_month(&mut self) {
        self.view.cursor = self.view.cursor.next();
    }

    pub fn prev_month(&mut self) {
        self.view.cursor = self.view.cursor.prev();
    }

    /// Empty string and `None` both mean "All Courses".
    pub fn set_course_filter(&mut self, course: Option<&str>) {
        self.view.course_filter = course.filter(|c| !c.is_empty()).map(str::to_string);
    }

    /// All Courses -> first course -> ... -> last course -> All Courses.
    pub fn cycle_course_filter(&mut self) {
        let courses = self.store.courses();
        let next = match &self.view.course_filter {
            None => courses.first().cloned(),
            Some(current) => courses
                .iter()
                .position(|c| c == current)
                .and_then(|i| courses.get(i + 1))
                .cloned(),
        };
        self.set_course_filter(next.as_deref());
    }

    pub fn toggle_theme(&mut self) {
        self.view.theme = self.view.theme.toggled();
    }

    // --- Editor ---

    pub fn open_editor(&mut self, date_key: &str) {
        self.view.editor_target = Some(date_key.to_string());
    }

    pub fn cancel_editor(&mut self) {
        self.view.editor_target = None;
    }

    pub fn editor_target(&self) -> Option<&str> {
        self.view.editor_target.as_deref()
    }

    /// Validates the editor fields against the open day and appends the event.
    /// On success the editor is closed; on failure it stays open and nothing changes.
    pub fn submit_editor(&mut self, input: &EditorInput) -> Result<Event, SaveError> {
        let date_key = self
            .view
            .editor_target
            .clone()
            .ok_or(SaveError::NoEditorOpen)?;

        let event = self.validate(&date_key, input)?;
        self.commit(|store| store.add(&date_key, event.clone()))
            .map_err(SaveError::Storage)?;

        log::info!("Added '{}' on {}", event.label(), date_key);
        self.view.editor_target = None;
        Ok(event)
    }

    fn validate(&self, date_key: &str, input: &EditorInput) -> Result<Event, SaveError> {
        let start = parse_time_input(&input.start);
        let end = parse_time_input(&input.end);
        if start == TimeInput::Invalid || end == TimeInput::Invalid {
            return Err(SaveError::InvalidTimeFormat);
        }

        let title = input.title.trim();
        if title.is_empty() {
            return Err(SaveError::MissingTitle);
        }

        let start = start.into_option();
        let mut end = end.into_option();

        if let (Some(s), Some(e)) = (&start, &end) {
            let s_min = time_to_minutes(s);
            let e_min = time_to_minutes(e);
            if s_min > e_min {
                return Err(SaveError::StartAfterEnd);
            }
            if s_min == e_min {
                end = None;
            }
        }

        if has_conflict(self.store.day(date_key), start.as_deref(), end.as_deref()) {
            return Err(SaveError::Conflict);
        }

        Ok(Event {
            course: input.course.trim().to_string(),
            title: title.to_string(),
            start_time: start,
            end_time: end,
        })
    }

    // --- Removal ---

    /// Removes every event on `date_key` equal to `matcher` after time normalization.
    pub fn remove_event(&mut self, date_key: &str, matcher: &Event) -> Result<usize> {
        let mut removed = 0;
        self.commit(|store| removed = store.remove(date_key, matcher))?;
        log::info!("Removed {} event(s) '{}' on {}", removed, matcher.label(), date_key);
        Ok(removed)
    }

    /// Applies `mutate` to a copy, persists the copy, then swaps it in.
    /// A failed save leaves the in-memory store untouched.
    fn commit<F: FnOnce(&mut EventStore)>(&mut self, mutate: F) -> Result<()> {
        let mut next = self.store.clone();
        mutate(&mut next);
        LocalStorage::save_events(self.ctx.as_ref(), next.days())?;
        self.store = next;
        Ok(())
    }

    // --- Rendering ---

    /// Grid for the current month. Courses seen for the first time get a color,
    /// and the color map is saved if it grew.
    pub fn render(&mut self) -> MonthView {
        let cursor = self.view.cursor;
        let visible: BTreeSet<String> = (1..=cursor.days_in_month())
            .filter_map(|d| cursor.date(d))
            .flat_map(|date| self.store.day(&crate::model::date_key(date)).to_vec())
            .map(|e| e.course)
            .collect();

        let mut grew = false;
        for course in &visible {
            let (_, is_new) = self.colors.color_for(course);
            grew |= is_new;
        }
        if grew && let Err(e) = LocalStorage::save_course_colors(self.ctx.as_ref(), &self.colors) {
            log::warn!("Failed to save course colors: {:#}", e);
        }

        render_month(
            cursor,
            &self.store,
            &self.colors,
            RenderOptions {
                course_filter: self.view.course_filter.as_deref(),
                theme: self.view.theme,
                layout: &self.layout,
                week_starts_monday: self.config.week_starts_monday,
            },
        )
    }
}
