// File: src/model/event.rs
use crate::model::time::normalize_time;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A single calendar entry. `None` times mean "untimed".
///
/// Field names on disk follow the `events` blob format (`startTime`, `endTime`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default)]
    pub course: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}

impl Event {
    pub fn new(course: &str, title: &str, start: Option<&str>, end: Option<&str>) -> Self {
        Self {
            course: course.to_string(),
            title: title.to_string(),
            start_time: start.map(str::to_string),
            end_time: end.map(str::to_string),
        }
    }

    pub fn normalized_start(&self) -> Option<String> {
        normalize_time(self.start_time.as_deref())
    }

    pub fn normalized_end(&self) -> Option<String> {
        normalize_time(self.end_time.as_deref())
    }

    /// Copy with both times re-normalized. Unparseable stored times become untimed.
    pub fn normalized(&self) -> Self {
        Self {
            course: self.course.clone(),
            title: self.title.clone(),
            start_time: self.normalized_start(),
            end_time: self.normalized_end(),
        }
    }

    /// Removal identity: course, title, and times compared after normalization,
    /// so "1pm" on disk matches "13:00" in a request.
    pub fn same_entry(&self, other: &Event) -> bool {
        self.course == other.course
            && self.title == other.title
            && self.normalized_start() == other.normalized_start()
            && self.normalized_end() == other.normalized_end()
    }

    pub fn label(&self) -> String {
        format!("{}: {}", self.course, self.title)
    }

    pub fn time_label(&self) -> String {
        match (self.normalized_start(), self.normalized_end()) {
            (Some(s), Some(e)) => format!("{}-{}", s, e),
            (Some(s), None) => s,
            _ => String::new(),
        }
    }
}

/// `"{year}-{month}-{day}"`, month 1-based, no zero padding.
pub fn date_key(date: NaiveDate) -> String {
    format!("{}-{}-{}", date.year(), date.month(), date.day())
}

pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    let mut parts = key.trim().splitn(3, '-');
    let year = parts.next()?.parse::<i32>().ok()?;
    let month = parts.next()?.parse::<u32>().ok()?;
    let day = parts.next()?.parse::<u32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
