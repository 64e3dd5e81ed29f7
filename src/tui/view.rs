// File: src/tui/view.rs
use crate::calendar::EventBlock;
use crate::color_utils;
use crate::tui::state::{AppState, EditorField, InputMode};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthChar;

struct Palette {
    base: Style,
    muted: Color,
    accent: Color,
}

fn palette(dark: bool) -> Palette {
    if dark {
        Palette {
            base: Style::default().bg(Color::Rgb(24, 24, 27)).fg(Color::White),
            muted: Color::DarkGray,
            accent: Color::Yellow,
        }
    } else {
        Palette {
            base: Style::default().bg(Color::White).fg(Color::Black),
            muted: Color::Gray,
            accent: Color::Blue,
        }
    }
}

pub fn draw(f: &mut Frame, state: &mut AppState) {
    let pal = palette(state.theme().is_dark());
    f.render_widget(Block::default().style(pal.base), f.area());

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    draw_header(f, state, &pal, v_chunks[0]);
    draw_grid(f, state, &pal, v_chunks[1]);
    draw_footer(f, state, &pal, v_chunks[2]);

    if state.show_full_help {
        draw_help(f, &pal);
    }

    if state.mode == InputMode::Editing {
        draw_editor(f, state, &pal);
    } else {
        state.editor_area = None;
    }
}

fn draw_header(f: &mut Frame, state: &AppState, pal: &Palette, area: Rect) {
    let filter = state
        .controller
        .view
        .course_filter
        .clone()
        .unwrap_or_else(|| "All Courses".to_string());

    let line = Line::from(vec![
        Span::styled(" < p ", Style::default().fg(pal.muted)),
        Span::styled(
            state.month.title.clone(),
            Style::default().fg(pal.accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" n > ", Style::default().fg(pal.muted)),
        Span::raw("   Course: "),
        Span::styled(filter, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!("   Theme: {}", state.theme())),
    ]);

    let p = Paragraph::new(line)
        .style(pal.base)
        .block(Block::default().borders(Borders::ALL).title(" Calendar "));
    f.render_widget(p, area);
}

fn draw_grid(f: &mut Frame, state: &mut AppState, pal: &Palette, area: Rect) {
    state.day_areas.clear();
    state.event_areas.clear();

    let total = state.month.leading_blanks as usize + state.month.days.len();
    let weeks = total.div_ceil(7).max(1) as u32;

    let mut rows_constraints = vec![Constraint::Length(1)];
    rows_constraints.extend((0..weeks).map(|_| Constraint::Ratio(1, weeks)));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(rows_constraints)
        .split(area);

    let col_constraints: Vec<Constraint> = (0..7).map(|_| Constraint::Ratio(1, 7)).collect();

    // Weekday headers
    let header_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(col_constraints.clone())
        .split(rows[0]);
    for (i, name) in state.month.weekday_headers().iter().enumerate() {
        let p = Paragraph::new(*name)
            .alignment(Alignment::Center)
            .style(pal.base.add_modifier(Modifier::BOLD));
        f.render_widget(p, header_cols[i]);
    }

    let cell_height = state.controller.layout().cell_height;
    let leading = state.month.leading_blanks as usize;

    for week in 0..weeks as usize {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(col_constraints.clone())
            .split(rows[week + 1]);

        for (wd, col_area) in cols.iter().enumerate() {
            let slot = week * 7 + wd;
            if slot < leading || slot - leading >= state.month.days.len() {
                continue;
            }
            let cell = &state.month.days[slot - leading];
            let is_selected = cell.day == state.selected_day;

            let border_style = if is_selected {
                Style::default().fg(pal.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(pal.muted)
            };
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(format!(" {} ", cell.day));
            let inner = block.inner(*col_area);
            f.render_widget(block, *col_area);
            state.day_areas.push((*col_area, cell.day));

            let mut last_row: Option<u16> = None;
            for (idx, ev) in cell.events.iter().enumerate() {
                let row = pixel_to_row(ev.top, cell_height, inner.height);
                let row = match last_row {
                    Some(prev) if row <= prev => prev + 1,
                    _ => row,
                };
                if row >= inner.height {
                    break;
                }
                last_row = Some(row);

                let line_area = Rect {
                    x: inner.x,
                    y: inner.y + row,
                    width: inner.width,
                    height: 1,
                };
                let highlighted = is_selected && state.selected_event == Some(idx);
                f.render_widget(event_line(ev, inner.width, highlighted), line_area);
                state.event_areas.push((line_area, cell.day, idx));
            }

            let hidden = cell.events.len().saturating_sub(
                state
                    .event_areas
                    .iter()
                    .filter(|(_, d, _)| *d == cell.day)
                    .count(),
            );
            if hidden > 0 && inner.height > 0 {
                let more = Rect {
                    x: inner.x,
                    y: inner.y + inner.height - 1,
                    width: inner.width,
                    height: 1,
                };
                let p = Paragraph::new(format!("+{} more", hidden))
                    .alignment(Alignment::Right)
                    .style(Style::default().fg(pal.muted));
                f.render_widget(p, more);
            }
        }
    }
}

/// Maps a layout pixel offset onto a terminal row inside a cell of `rows` lines.
pub fn pixel_to_row(top: f32, cell_height: f32, rows: u16) -> u16 {
    if rows == 0 || cell_height <= 0.0 {
        return 0;
    }
    let scaled = (top / cell_height * rows as f32).floor();
    scaled.clamp(0.0, u16::MAX as f32) as u16
}

fn event_line(ev: &EventBlock, width: u16, highlighted: bool) -> Paragraph<'static> {
    let text = if ev.time_label.is_empty() {
        ev.label.clone()
    } else {
        format!("{} {}", ev.time_label, ev.label)
    };

    let fg = match color_utils::parse_hex_to_u8(ev.text_color) {
        Some((r, g, b)) => Color::Rgb(r, g, b),
        None if ev.text_color == "#fff" => Color::White,
        None => Color::Black,
    };
    let mut style = Style::default().fg(fg);
    if let Some((r, g, b)) = color_utils::parse_color(&ev.color) {
        style = style.bg(Color::Rgb(r, g, b));
    }
    if highlighted {
        style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
    }

    Paragraph::new(fit_width(&text, width as usize)).style(style)
}

/// Truncates to `width` terminal columns, marking the cut with '…'.
pub fn fit_width(text: &str, width: usize) -> String {
    let full: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if full <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

fn draw_footer(f: &mut Frame, state: &AppState, pal: &Palette, area: Rect) {
    let status = Paragraph::new(state.message.clone())
        .style(pal.base.fg(pal.accent))
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::TOP | Borders::BOTTOM)
                .title(" Status "),
        );

    let help_str = match state.mode {
        InputMode::Normal => "?:Help q:Quit ←→↑↓:Day n/p:Month ↵:Add Tab:Event d:Del f:Filter t:Theme",
        InputMode::Editing => "Tab:Next field  ↵:Save  Esc:Cancel",
        InputMode::ConfirmDelete => "y:Remove  any other key:Keep",
    };
    let help = Paragraph::new(help_str)
        .alignment(Alignment::Right)
        .style(pal.base)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::TOP | Borders::BOTTOM)
                .title(" Actions "),
        );

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);
    f.render_widget(status, chunks[0]);
    f.render_widget(help, chunks[1]);
}

fn draw_editor(f: &mut Frame, state: &mut AppState, pal: &Palette) {
    let area = centered_rect(60, 40, f.area());
    state.editor_area = Some(area);

    let target = state.controller.editor_target().unwrap_or("?").to_string();
    let focused = state.form.focused();

    let mut lines = vec![Line::from("")];
    for field in EditorField::ALL {
        let label_style = if field == focused {
            Style::default().fg(pal.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let hint = match field {
            EditorField::Start | EditorField::End => "  (e.g. 1pm, 12:30am, 14:00; blank = untimed)",
            _ => "",
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {:>6}: ", field.label()), label_style),
            Span::raw(state.form.value(field).to_string()),
            Span::styled(hint, Style::default().fg(pal.muted)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Enter: Save   Esc: Cancel",
        Style::default().fg(pal.muted),
    )));

    let block = Block::default()
        .title(format!(" New event: {} ", target))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(pal.accent))
        .style(pal.base);

    let p = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(Clear, area);
    f.render_widget(p, area);

    let value_len = state.form.value(focused).chars().count();
    f.set_cursor_position(editor_cursor(area, focused, value_len));
}

/// Cursor at the end of the focused field, kept inside the popup border.
pub fn editor_cursor(area: Rect, focused: EditorField, value_len: usize) -> (u16, u16) {
    let row = 2 + focused as u16;
    // Border plus " {:>6}: " label.
    let col = u16::try_from(value_len).unwrap_or(u16::MAX).saturating_add(10);
    let max_x = area.x.saturating_add(area.width.saturating_sub(2));
    let max_y = area.y.saturating_add(area.height.saturating_sub(2));
    (
        area.x.saturating_add(col).min(max_x),
        area.y.saturating_add(row).min(max_y),
    )
}

fn draw_help(f: &mut Frame, pal: &Palette) {
    let area = centered_rect(70, 60, f.area());
    let section = |name: &'static str, color: Color| {
        Span::styled(
            name,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )
    };
    let lines = vec![
        Line::from(vec![
            section(" NAVIGATION ", Color::Yellow),
            Span::raw(" ←→↑↓/hjkl:Day  n/]/PgDn:Next month  p/[/PgUp:Previous month"),
        ]),
        Line::from(vec![
            section(" EVENTS ", Color::Green),
            Span::raw(" Enter/a:Add on selected day  Tab:Select event  d:Delete"),
        ]),
        Line::from(vec![
            section(" VIEW ", Color::Blue),
            Span::raw(" f:Cycle course filter  t:Toggle light/dark"),
        ]),
        Line::from(vec![
            section(" MOUSE ", Color::Magenta),
            Span::raw(" Click day:Add  Click event:Delete  Click outside editor:Cancel"),
        ]),
        Line::from(vec![
            section(" GLOBAL ", Color::Cyan),
            Span::raw(" ?:Toggle help  q:Quit"),
        ]),
    ];
    let p = Paragraph::new(lines)
        .style(pal.base)
        .block(Block::default().borders(Borders::ALL).title(" Help "))
        .wrap(Wrap { trim: false });
    f.render_widget(Clear, area);
    f.render_widget(p, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_width_truncates_with_ellipsis() {
        assert_eq!(fit_width("CS101: Lecture", 20), "CS101: Lecture");
        assert_eq!(fit_width("CS101: Lecture", 6), "CS101…");
        assert_eq!(fit_width("abc", 0), "");
    }

    #[test]
    fn test_editor_cursor_stays_inside_popup() {
        let area = Rect::new(10, 5, 40, 12);
        assert_eq!(editor_cursor(area, EditorField::Course, 0), (20, 7));
        assert_eq!(editor_cursor(area, EditorField::End, 3), (23, 10));
        assert_eq!(editor_cursor(area, EditorField::Title, 500), (48, 8));

        let edge = Rect::new(u16::MAX - 5, u16::MAX - 5, 5, 5);
        assert_eq!(
            editor_cursor(edge, EditorField::Start, usize::MAX),
            (u16::MAX - 2, u16::MAX - 2)
        );
    }

    #[test]
    fn test_pixel_to_row_scales_into_cell() {
        assert_eq!(pixel_to_row(0.0, 180.0, 6), 0);
        assert_eq!(pixel_to_row(90.0, 180.0, 6), 3);
        assert_eq!(pixel_to_row(200.0, 180.0, 6), 6);
        assert_eq!(pixel_to_row(10.0, 180.0, 0), 0);
    }
}
