use anyhow::Result;
use coursecal::cli::{self, Command};
use coursecal::config::Config;
use coursecal::context::{AppContext, StandardContext};
use coursecal::controller::CalendarController;
use coursecal::storage::LocalStorage;
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::env;
use std::sync::Arc;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let parsed = cli::parse_args(&args)?;

    if parsed.command == Command::Help {
        cli::print_help("coursecal");
        return Ok(());
    }

    let ctx: Arc<dyn AppContext> = Arc::new(StandardContext::new(parsed.root));

    match parsed.command {
        Command::Tui => coursecal::tui::run(ctx),
        Command::Export => {
            init_cli_logger();
            let events = LocalStorage::load_events(ctx.as_ref())?;
            println!("{}", serde_json::to_string_pretty(&events)?);
            Ok(())
        }
        Command::List(month) => {
            init_cli_logger();
            let config = Config::load_or_default(ctx.as_ref())?;
            let mut controller = CalendarController::load(ctx, config)?;
            if let Some(cursor) = month {
                controller.go_to(cursor);
            }
            print!("{}", cli::format_month_listing(&controller.render()));
            Ok(())
        }
        Command::Help => Ok(()),
    }
}

// Non-interactive commands own the terminal, so warnings can go to stderr.
fn init_cli_logger() {
    let log_config = ConfigBuilder::new().set_time_level(LevelFilter::Off).build();
    let _ = TermLogger::init(
        LevelFilter::Warn,
        log_config,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}
