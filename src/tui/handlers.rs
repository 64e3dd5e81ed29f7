// File: src/tui/handlers.rs
// Handles keyboard and mouse input for the TUI.
use crate::tui::state::{AppState, InputMode};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

/// Outcome of one input event.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Flow {
    Continue,
    Quit,
}

pub fn handle_key_event(key: KeyEvent, state: &mut AppState) -> Flow {
    match state.mode {
        InputMode::Editing => handle_editor_key(key, state),
        InputMode::ConfirmDelete => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => state.resolve_delete(true),
                _ => state.resolve_delete(false),
            }
            Flow::Continue
        }
        InputMode::Normal => handle_normal_key(key, state),
    }
}

fn handle_normal_key(key: KeyEvent, state: &mut AppState) -> Flow {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Flow::Quit;
    }

    match key.code {
        KeyCode::Char('q') => return Flow::Quit,
        KeyCode::Left | KeyCode::Char('h') => state.move_day(-1),
        KeyCode::Right | KeyCode::Char('l') => state.move_day(1),
        KeyCode::Up | KeyCode::Char('k') => state.move_day(-7),
        KeyCode::Down | KeyCode::Char('j') => state.move_day(7),
        KeyCode::Char('n') | KeyCode::Char(']') | KeyCode::PageDown => state.next_month(),
        KeyCode::Char('p') | KeyCode::Char('[') | KeyCode::PageUp => state.prev_month(),
        KeyCode::Enter | KeyCode::Char('a') => state.open_editor(),
        KeyCode::Tab => state.cycle_event(),
        KeyCode::Char('d') | KeyCode::Delete => state.request_delete(),
        KeyCode::Char('f') => state.cycle_filter(),
        KeyCode::Char('t') => state.toggle_theme(),
        KeyCode::Char('?') => state.show_full_help = !state.show_full_help,
        KeyCode::Esc => {
            state.show_full_help = false;
            state.selected_event = None;
        }
        _ => {}
    }
    Flow::Continue
}

fn handle_editor_key(key: KeyEvent, state: &mut AppState) -> Flow {
    match key.code {
        KeyCode::Esc => state.cancel_editor(),
        KeyCode::Enter => state.submit_editor(),
        KeyCode::Tab | KeyCode::Down => state.form.next_field(),
        KeyCode::BackTab | KeyCode::Up => state.form.prev_field(),
        KeyCode::Backspace => state.form.backspace(),
        // Control chords are not text.
        KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => {}
        KeyCode::Char(c) => state.form.push_char(c),
        _ => {}
    }
    Flow::Continue
}

fn hit(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

/// Left clicks only. Event blocks take precedence over their day cell.
pub fn handle_mouse_event(mouse: MouseEvent, state: &mut AppState) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    let (col, row) = (mouse.column, mouse.row);

    match state.mode {
        InputMode::Editing => {
            // Clicking outside the editor discards it.
            if !state.editor_area.is_some_and(|a| hit(a, col, row)) {
                state.cancel_editor();
            }
        }
        InputMode::ConfirmDelete => {}
        InputMode::Normal => {
            if let Some(&(_, day, idx)) = state.event_areas.iter().find(|(a, _, _)| hit(*a, col, row)) {
                state.select_day(day);
                state.selected_event = Some(idx);
                state.request_delete();
            } else if let Some(&(_, day)) = state.day_areas.iter().find(|(a, _)| hit(*a, col, row)) {
                state.select_day(day);
                state.open_editor();
            }
        }
    }
}
