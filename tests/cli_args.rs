// File: tests/cli_args.rs
use coursecal::calendar::{MonthCursor, RenderOptions, render_month};
use coursecal::cli::{CliArgs, Command, format_month_listing, parse_args, parse_month};
use coursecal::color_utils::CourseColors;
use coursecal::config::AppTheme;
use coursecal::layout::LayoutConfig;
use coursecal::model::Event;
use coursecal::store::EventStore;
use std::path::PathBuf;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_no_args_starts_tui() {
    assert_eq!(
        parse_args(&[]).unwrap(),
        CliArgs {
            root: None,
            command: Command::Tui
        }
    );
}

#[test]
fn test_root_and_subcommands() {
    let parsed = parse_args(&args(&["--root", "/tmp/cc", "export"])).unwrap();
    assert_eq!(parsed.root, Some(PathBuf::from("/tmp/cc")));
    assert_eq!(parsed.command, Command::Export);

    let parsed = parse_args(&args(&["list", "2025-3", "-r", "x"])).unwrap();
    assert_eq!(parsed.command, Command::List(MonthCursor::new(2025, 3)));
    assert_eq!(parsed.root, Some(PathBuf::from("x")));

    let parsed = parse_args(&args(&["list"])).unwrap();
    assert_eq!(parsed.command, Command::List(None));

    assert_eq!(parse_args(&args(&["-h"])).unwrap().command, Command::Help);
}

#[test]
fn test_bad_arguments_are_errors() {
    assert!(parse_args(&args(&["--root"])).is_err());
    assert!(parse_args(&args(&["frobnicate"])).is_err());
    assert!(parse_args(&args(&["list", "2025-13"])).is_err());
    assert!(parse_month("March").is_err());
}

#[test]
fn test_month_listing() {
    let mut store = EventStore::new();
    store.add("2025-3-7", Event::new("CS101", "Lecture", Some("09:00"), Some("10:00")));
    store.add("2025-3-7", Event::new("ENG110", "Reading", None, None));

    let layout = LayoutConfig::default();
    let view = render_month(
        MonthCursor::new(2025, 3).unwrap(),
        &store,
        &CourseColors::with_presets(),
        RenderOptions {
            course_filter: None,
            theme: AppTheme::Light,
            layout: &layout,
            week_starts_monday: false,
        },
    );
    let text = format_month_listing(&view);
    assert!(text.starts_with("March 2025\n"));
    assert!(text.contains("2025-3-7"));
    assert!(text.contains("09:00-10:00  CS101: Lecture"));
    assert!(text.contains("(untimed)    ENG110: Reading"));
}

#[test]
fn test_empty_month_listing() {
    let layout = LayoutConfig::default();
    let view = render_month(
        MonthCursor::new(2025, 4).unwrap(),
        &EventStore::new(),
        &CourseColors::with_presets(),
        RenderOptions {
            course_filter: None,
            theme: AppTheme::Light,
            layout: &layout,
            week_starts_monday: false,
        },
    );
    assert!(format_month_listing(&view).contains("No events."));
}
