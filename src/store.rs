// File: src/store.rs
use crate::layout::{DisplayEvent, sort_for_display};
use crate::model::Event;
use crate::storage::EventMap;
use std::collections::BTreeSet;

/// In-memory event store, keyed by date key.
///
/// The store itself does no IO; the controller persists `days()` after every
/// mutation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventStore {
    days: EventMap,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(days: EventMap) -> Self {
        Self { days }
    }

    pub fn days(&self) -> &EventMap {
        &self.days
    }

    /// Appends to the day's list, creating it if absent.
    pub fn add(&mut self, date_key: &str, event: Event) {
        self.days.entry(date_key.to_string()).or_default().push(event);
    }

    /// Drops every event on `date_key` matching `matcher` (see `Event::same_entry`).
    /// An emptied day is removed entirely. Returns the number removed.
    pub fn remove(&mut self, date_key: &str, matcher: &Event) -> usize {
        let Some(list) = self.days.get_mut(date_key) else {
            return 0;
        };
        let before = list.len();
        list.retain(|e| !e.same_entry(matcher));
        let removed = before - list.len();

        if list.is_empty() {
            self.days.remove(date_key);
        }
        removed
    }

    pub fn day(&self, date_key: &str) -> &[Event] {
        self.days.get(date_key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Distinct course tags across all days, sorted.
    pub fn courses(&self) -> Vec<String> {
        self.days
            .values()
            .flatten()
            .map(|e| e.course.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// The day's events in display order, with `filter` applied after sorting
    /// so ids keep their insertion index.
    pub fn display_events(&self, date_key: &str, filter: Option<&str>) -> Vec<DisplayEvent> {
        sort_for_display(self.day(date_key))
            .into_iter()
            .filter(|de| filter.is_none_or(|c| de.event.course == c))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
