// File: ./src/tui/mod.rs
// Entry point and main loop for the TUI application.
pub mod handlers;
pub mod state;
pub mod view;

use crate::config::Config;
use crate::context::AppContext;
use crate::controller::CalendarController;
use crate::tui::handlers::Flow;
use crate::tui::state::AppState;
use crate::tui::view::draw;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use simplelog::{LevelFilter, WriteLogger};
use std::{fs, io, sync::Arc, time::Duration};

fn init_file_logger(ctx: &dyn AppContext) {
    let Ok(path) = ctx.get_log_path() else {
        return;
    };
    if let Ok(file) = fs::OpenOptions::new().create(true).append(true).open(&path) {
        let _ = WriteLogger::init(LevelFilter::Info, simplelog::Config::default(), file);
    }
}

pub fn run(ctx: Arc<dyn AppContext>) -> Result<()> {
    // --- 1. PREAMBLE & CONFIG ---
    init_file_logger(ctx.as_ref());

    let cfg = Config::load_or_default(ctx.as_ref())?;
    let controller =
        CalendarController::load(ctx.clone(), cfg).context("Failed to load calendar data")?;
    log::info!(
        "Starting with {} stored event(s)",
        controller.store().len()
    );

    // Panic Hook: leave the alternate screen so the message is readable.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        log::error!("PANIC: {}", info);
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        default_hook(info);
    }));

    // --- 2. TERMINAL SETUP ---
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // --- 3. STATE INIT ---
    let mut app_state = AppState::new(controller);

    // --- 4. UI LOOP ---
    let result = (|| -> Result<()> {
        loop {
            terminal.draw(|f| draw(f, &mut app_state))?;

            if !event::poll(Duration::from_millis(250))? {
                continue;
            }
            match event::read()? {
                Event::Key(key) => {
                    // Filter out KeyRelease events to prevent double input on Windows
                    if key.kind == event::KeyEventKind::Release {
                        continue;
                    }
                    if handlers::handle_key_event(key, &mut app_state) == Flow::Quit {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => handlers::handle_mouse_event(mouse, &mut app_state),
                _ => {}
            }
        }
    })();

    // --- 5. CLEANUP ---
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    log::info!("Exiting");
    result
}
