// File: ./src/cli.rs
//! Command-line argument handling, help text, and the non-interactive commands.
use crate::calendar::{MonthCursor, MonthView};
use anyhow::{Result, bail};
use std::fmt::Write as _;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Interactive month view.
    Tui,
    /// Print the `events` blob as JSON.
    Export,
    /// Plain-text agenda for one month (current month when `None`).
    List(Option<MonthCursor>),
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub root: Option<PathBuf>,
    pub command: Command,
}

/// Parses `args` without the binary name.
pub fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut root = None;
    let mut command = None;
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" | "help" => {
                return Ok(CliArgs {
                    root,
                    command: Command::Help,
                });
            }
            "-r" | "--root" => {
                let Some(path) = args.get(i + 1) else {
                    bail!("--root requires a path");
                };
                root = Some(PathBuf::from(path));
                i += 2;
                continue;
            }
            "export" if command.is_none() => command = Some(Command::Export),
            "list" if command.is_none() => {
                let month = match args.get(i + 1) {
                    Some(m) if !m.starts_with('-') => {
                        i += 1;
                        Some(parse_month(m)?)
                    }
                    _ => None,
                };
                command = Some(Command::List(month));
            }
            other => bail!("Unknown argument: {}", other),
        }
        i += 1;
    }

    Ok(CliArgs {
        root,
        command: command.unwrap_or(Command::Tui),
    })
}

/// `YYYY-MM` (month may omit its leading zero).
pub fn parse_month(s: &str) -> Result<MonthCursor> {
    let parsed = s.split_once('-').and_then(|(y, m)| {
        let year = y.parse::<i32>().ok()?;
        let month = m.parse::<u32>().ok()?;
        MonthCursor::new(year, month)
    });
    match parsed {
        Some(cursor) => Ok(cursor),
        None => bail!("Invalid month '{}', expected YYYY-MM", s),
    }
}

/// One line per event, grouped under each day that has any.
pub fn format_month_listing(view: &MonthView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.title);

    let mut any = false;
    for cell in view.days.iter().filter(|c| !c.events.is_empty()) {
        any = true;
        let _ = writeln!(out, "\n{}", cell.date_key);
        for block in &cell.events {
            if block.time_label.is_empty() {
                let _ = writeln!(out, "  {:<11}  {}", "(untimed)", block.label);
            } else {
                let _ = writeln!(out, "  {:<11}  {}", block.time_label, block.label);
            }
        }
    }
    if !any {
        let _ = writeln!(out, "\nNo events.");
    }
    out
}

pub fn print_help(binary_name: &str) {
    println!(
        "Coursecal v{} - Monthly course calendar (TUI)",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [--root <path>]", binary_name);
    println!("    {} export", binary_name);
    println!("    {} list [YYYY-MM]", binary_name);
    println!("    {} --help", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config and data.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("COMMANDS:");
    println!("    export                Print all stored events as JSON to stdout");
    println!("    list [YYYY-MM]        Print a month's events (default: current month)");
    println!();
    println!("KEYBINDINGS:");
    println!("    Arrows / hjkl         Move between days");
    println!("    n / p  (] / [)        Next / previous month");
    println!("    Enter / a             Add an event on the selected day");
    println!("    Tab                   Select the next event of the day");
    println!("    d                     Delete the selected event (asks first)");
    println!("    f                     Cycle the course filter");
    println!("    t                     Toggle light/dark");
    println!("    ?                     Toggle help");
    println!("    q                     Quit");
    println!();
    println!("TIME FORMATS:");
    println!("    1pm, 12:30am, 9:5, 14:00   (blank = untimed)");
}
