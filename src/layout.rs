// File: src/layout.rs
//! Vertical placement of a day's events inside a fixed-height day cell.
//!
//! The cell maps the window `[day_start, day_end)` onto `cell_height` pixels.
//! Placement is one greedy pass in display order: each block starts at its
//! scaled start time unless that would collide with the previous block, in
//! which case it is pushed below it with a gutter. Blocks always span the full
//! cell width; there is no side-by-side column layout.
use crate::model::{Event, time_to_minutes};

pub const DAY_START_MINS: u32 = 8 * 60;
pub const DAY_END_MINS: u32 = 20 * 60;
pub const DAY_HEIGHT_PX: f32 = 180.0;

pub const GUTTER_PX: f32 = 8.0;
pub const BASE_HEIGHT_PX: f32 = 20.0;
// Applied to timed events only. Untimed blocks stay at BASE_HEIGHT_PX.
pub const MIN_TIMED_HEIGHT_PX: f32 = 24.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub day_start: u32,
    pub day_end: u32,
    pub cell_height: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            day_start: DAY_START_MINS,
            day_end: DAY_END_MINS,
            cell_height: DAY_HEIGHT_PX,
        }
    }
}

impl LayoutConfig {
    fn window(&self) -> f32 {
        // A degenerate window would divide by zero; treat it as one minute.
        self.day_end.saturating_sub(self.day_start).max(1) as f32
    }

    /// Unadjusted top edge for a start time, before stacking.
    pub fn scaled_top(&self, start_mins: u32) -> f32 {
        (start_mins as f32 - self.day_start as f32) * self.cell_height / self.window()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub top: f32,
    pub height: f32,
}

impl Placement {
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// An event prepared for rendering: times normalized and a stable identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayEvent {
    /// `"{insertion index}_{course}_{title}"`
    pub id: String,
    pub event: Event,
}

/// Normalizes and orders a day's events: timed by start, untimed last.
/// The sort is stable, so equal starts keep insertion order.
pub fn sort_for_display(events: &[Event]) -> Vec<DisplayEvent> {
    let mut out: Vec<DisplayEvent> = events
        .iter()
        .enumerate()
        .map(|(index, e)| DisplayEvent {
            id: format!("{}_{}_{}", index, e.course, e.title),
            event: e.normalized(),
        })
        .collect();

    out.sort_by(|a, b| {
        match (&a.event.start_time, &b.event.start_time) {
            (Some(x), Some(y)) => x.cmp(y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        }
    });
    out
}

/// Computes one placement per event, in the order given.
pub fn layout_day(events: &[DisplayEvent], cfg: &LayoutConfig) -> Vec<Placement> {
    let mut last_bottom: f32 = 0.0;
    let mut placements = Vec::with_capacity(events.len());

    for de in events {
        let start = de.event.start_time.as_deref().and_then(time_to_minutes);

        let placement = match start {
            Some(start_mins) => {
                let mut top = cfg.scaled_top(start_mins);
                let mut height = BASE_HEIGHT_PX.max(MIN_TIMED_HEIGHT_PX);

                if top < last_bottom + GUTTER_PX {
                    top = last_bottom + GUTTER_PX;
                }
                if top + height > cfg.cell_height {
                    height = (cfg.cell_height - top).max(0.0);
                }
                Placement { top, height }
            }
            None => Placement {
                top: last_bottom + GUTTER_PX,
                height: BASE_HEIGHT_PX,
            },
        };

        last_bottom = placement.bottom();
        placements.push(placement);
    }

    placements
}
