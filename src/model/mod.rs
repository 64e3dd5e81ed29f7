// File: src/model/mod.rs
// Core data types: events, date keys, and time strings.
pub mod event;
pub mod time;

pub use event::{Event, date_key, parse_date_key};
pub use time::{TimeInput, minutes_to_time, normalize_time, parse_time_input, time_to_minutes};
