// File: src/calendar.rs
//! Month grid description, independent of any UI toolkit.
//!
//! `render_month` is a pure function of the visible month, the store, the
//! color map and the view options. Front-ends paint the result.
use crate::color_utils::CourseColors;
use crate::config::AppTheme;
use crate::layout::{LayoutConfig, layout_day};
use crate::model::{Event, date_key};
use crate::store::EventStore;
use chrono::{Datelike, Local, Months, NaiveDate};

/// Used only when a course has no entry in the color map.
pub const FALLBACK_COLOR: &str = "#9e9e9e";

/// The displayed year and month (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCursor {
    first: NaiveDate,
}

impl MonthCursor {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn today() -> Self {
        Self::containing(Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn next(self) -> Self {
        Self {
            first: self.first.checked_add_months(Months::new(1)).unwrap_or(self.first),
        }
    }

    pub fn prev(self) -> Self {
        Self {
            first: self.first.checked_sub_months(Months::new(1)).unwrap_or(self.first),
        }
    }

    pub fn days_in_month(&self) -> u32 {
        let next = self.next().first;
        if next == self.first {
            // Last representable month.
            return 31;
        }
        (next - self.first).num_days() as u32
    }

    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        self.first.with_day(day)
    }

    /// "October 2026"
    pub fn title(&self) -> String {
        self.first.format("%B %Y").to_string()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions<'a> {
    pub course_filter: Option<&'a str>,
    pub theme: AppTheme,
    pub layout: &'a LayoutConfig,
    pub week_starts_monday: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventBlock {
    pub id: String,
    /// "COURSE: Title"
    pub label: String,
    /// "HH:MM-HH:MM", "HH:MM", or empty for untimed events.
    pub time_label: String,
    pub top: f32,
    pub height: f32,
    pub color: String,
    pub text_color: &'static str,
    /// Normalized copy of the stored record, usable as a removal matcher.
    pub event: Event,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub day: u32,
    pub date_key: String,
    pub events: Vec<EventBlock>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthView {
    pub title: String,
    /// Empty cells before day 1 in the first week row.
    pub leading_blanks: u32,
    pub week_starts_monday: bool,
    pub days: Vec<DayCell>,
}

impl MonthView {
    pub fn cell(&self, day: u32) -> Option<&DayCell> {
        self.days.get(day.checked_sub(1)? as usize)
    }

    pub fn find(&self, date_key: &str) -> Option<&DayCell> {
        self.days.iter().find(|d| d.date_key == date_key)
    }

    pub fn weekday_headers(&self) -> [&'static str; 7] {
        if self.week_starts_monday {
            ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
        } else {
            ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]
        }
    }
}

pub fn render_month(
    cursor: MonthCursor,
    store: &EventStore,
    colors: &CourseColors,
    opts: RenderOptions<'_>,
) -> MonthView {
    let first = cursor.first_day();
    let leading_blanks = if opts.week_starts_monday {
        first.weekday().num_days_from_monday()
    } else {
        first.weekday().num_days_from_sunday()
    };

    let days = (1..=cursor.days_in_month())
        .filter_map(|day| cursor.date(day).map(|d| (day, d)))
        .map(|(day, date)| {
            let key = date_key(date);
            let visible = store.display_events(&key, opts.course_filter);
            let placements = layout_day(&visible, opts.layout);

            let events = visible
                .into_iter()
                .zip(placements)
                .map(|(de, p)| EventBlock {
                    label: de.event.label(),
                    time_label: de.event.time_label(),
                    top: p.top,
                    height: p.height,
                    color: colors
                        .get(&de.event.course)
                        .unwrap_or(FALLBACK_COLOR)
                        .to_string(),
                    text_color: opts.theme.event_text_color(),
                    id: de.id,
                    event: de.event,
                })
                .collect();

            DayCell {
                day,
                date_key: key,
                events,
            }
        })
        .collect();

    MonthView {
        title: cursor.title(),
        leading_blanks,
        week_starts_monday: opts.week_starts_monday,
        days,
    }
}
