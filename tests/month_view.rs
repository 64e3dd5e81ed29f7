// File: tests/month_view.rs
use coursecal::calendar::{FALLBACK_COLOR, MonthCursor, RenderOptions, render_month};
use coursecal::color_utils::CourseColors;
use coursecal::config::AppTheme;
use coursecal::layout::LayoutConfig;
use coursecal::model::{Event, date_key, parse_date_key};
use coursecal::store::EventStore;
use chrono::NaiveDate;

fn opts<'a>(layout: &'a LayoutConfig, filter: Option<&'a str>, theme: AppTheme) -> RenderOptions<'a> {
    RenderOptions {
        course_filter: filter,
        theme,
        layout,
        week_starts_monday: false,
    }
}

#[test]
fn test_date_key_is_not_zero_padded() {
    let d = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
    assert_eq!(date_key(d), "2025-3-7");
    assert_eq!(parse_date_key("2025-3-7"), Some(d));
    assert_eq!(parse_date_key("2025-03-07"), Some(d));
    assert_eq!(parse_date_key("2025-2-30"), None);
}

#[test]
fn test_cursor_navigation_rolls_over_years() {
    let dec = MonthCursor::new(2025, 12).unwrap();
    assert_eq!(dec.next(), MonthCursor::new(2026, 1).unwrap());
    assert_eq!(MonthCursor::new(2026, 1).unwrap().prev(), dec);
    assert_eq!(dec.title(), "December 2025");
}

#[test]
fn test_days_in_month() {
    assert_eq!(MonthCursor::new(2024, 2).unwrap().days_in_month(), 29);
    assert_eq!(MonthCursor::new(2025, 2).unwrap().days_in_month(), 28);
    assert_eq!(MonthCursor::new(2025, 4).unwrap().days_in_month(), 30);
}

#[test]
fn test_grid_shape_and_leading_blanks() {
    let layout = LayoutConfig::default();
    // 1 March 2025 is a Saturday.
    let cursor = MonthCursor::new(2025, 3).unwrap();
    let view = render_month(
        cursor,
        &EventStore::new(),
        &CourseColors::with_presets(),
        opts(&layout, None, AppTheme::Light),
    );
    assert_eq!(view.title, "March 2025");
    assert_eq!(view.leading_blanks, 6);
    assert_eq!(view.days.len(), 31);
    assert_eq!(view.days[0].date_key, "2025-3-1");
    assert_eq!(view.weekday_headers()[0], "Sun");

    let monday_first = render_month(
        cursor,
        &EventStore::new(),
        &CourseColors::with_presets(),
        RenderOptions {
            week_starts_monday: true,
            ..opts(&layout, None, AppTheme::Light)
        },
    );
    assert_eq!(monday_first.leading_blanks, 5);
    assert_eq!(monday_first.weekday_headers()[0], "Mon");
}

#[test]
fn test_event_block_contents() {
    let layout = LayoutConfig::default();
    let mut store = EventStore::new();
    store.add("2025-3-7", Event::new("CS101", "Lecture", Some("09:00"), Some("10:00")));
    store.add("2025-3-7", Event::new("ZOO1", "Field trip", Some("14:00"), None));
    store.add("2025-3-7", Event::new("CS101", "Reading", None, None));

    let view = render_month(
        MonthCursor::new(2025, 3).unwrap(),
        &store,
        &CourseColors::with_presets(),
        opts(&layout, None, AppTheme::Dark),
    );
    let cell = view.find("2025-3-7").unwrap();
    assert_eq!(cell.day, 7);
    assert_eq!(cell.events.len(), 3);

    let lecture = &cell.events[0];
    assert_eq!(lecture.label, "CS101: Lecture");
    assert_eq!(lecture.time_label, "09:00-10:00");
    assert_eq!(lecture.color, "#4caf50");
    assert_eq!(lecture.text_color, "#fff");

    assert_eq!(cell.events[1].time_label, "14:00");
    assert_eq!(cell.events[1].color, FALLBACK_COLOR, "unassigned course uses fallback");
    assert_eq!(cell.events[2].time_label, "");
}

#[test]
fn test_filtered_events_do_not_reserve_space() {
    let layout = LayoutConfig::default();
    let mut store = EventStore::new();
    store.add("2025-3-7", Event::new("CS101", "Lecture", Some("09:00"), None));
    store.add("2025-3-7", Event::new("MATH200", "Quiz", Some("09:10"), None));

    let view = render_month(
        MonthCursor::new(2025, 3).unwrap(),
        &store,
        &CourseColors::with_presets(),
        opts(&layout, Some("MATH200"), AppTheme::Light),
    );
    let cell = view.find("2025-3-7").unwrap();
    assert_eq!(cell.events.len(), 1);
    // 09:10 -> 17.5px; not pushed below the hidden CS101 block.
    assert_eq!(cell.events[0].top, 17.5);
    assert_eq!(cell.events[0].text_color, "#000");
}
