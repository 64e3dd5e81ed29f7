// File: src/conflict.rs
//! Overlap detection between a candidate time slot and a day's existing events.
use crate::model::{Event, time_to_minutes};

/// Length assumed for events that only carry a start time.
pub const DEFAULT_DURATION_MINS: u32 = 60;

/// Half-open `[start, end)` interval in minutes since midnight.
/// A missing or unusable end becomes `start + 60`.
pub fn interval(start: &str, end: Option<&str>) -> Option<(u32, u32)> {
    let s = time_to_minutes(start)?;
    let e = end
        .and_then(time_to_minutes)
        .unwrap_or(s + DEFAULT_DURATION_MINS);
    Some((s, e))
}

pub fn overlaps(a: (u32, u32), b: (u32, u32)) -> bool {
    a.0 < b.1 && b.0 < a.1
}

/// True when the candidate slot overlaps any existing timed event.
/// Untimed candidates and untimed existing events never conflict.
pub fn has_conflict(existing: &[Event], new_start: Option<&str>, new_end: Option<&str>) -> bool {
    let Some(candidate) = new_start.and_then(|s| interval(s, new_end)) else {
        return false;
    };

    existing.iter().any(|e| {
        e.start_time
            .as_deref()
            .and_then(|s| interval(s, e.end_time.as_deref()))
            .is_some_and(|slot| overlaps(candidate, slot))
    })
}
