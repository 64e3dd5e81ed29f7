// Crate root library declaration and module exports.
pub mod calendar;
pub mod cli;
pub mod color_utils;
pub mod config;
pub mod conflict;
pub mod context;
pub mod controller;
pub mod layout;
pub mod model;
pub mod storage;
pub mod store;

#[cfg(feature = "tui")]
pub mod tui;
