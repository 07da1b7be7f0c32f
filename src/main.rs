//! revtree - browse the tree of a git revision

use std::io::stdout;
use std::process::ExitCode;

use crossterm::{
    cursor, execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use revtree::app::{print_help, run_app, Config, RunMode};
use revtree::integrate::{exit_code, output_listing, OutputFormat};
use revtree::logging;

fn main() -> ExitCode {
    // Parse config first to return INVALID exit code for argument errors
    let config = match Config::from_args() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(exit_code::INVALID as u8);
        }
    };

    match config.mode {
        RunMode::Help => {
            print_help();
            return ExitCode::from(exit_code::SUCCESS as u8);
        }
        RunMode::Version => {
            println!("revtree {}", env!("CARGO_PKG_VERSION"));
            return ExitCode::from(exit_code::SUCCESS as u8);
        }
        _ => {}
    }

    // Logging goes to a file; the TUI owns the terminal
    if let Err(e) = logging::init() {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let result = match config.mode {
        RunMode::List(format) => run_list_mode(&config, format),
        _ => run_with_config(config),
    };

    match result {
        Ok(()) => ExitCode::from(exit_code::SUCCESS as u8),
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Error: {}", e);
            ExitCode::from(exit_code::ERROR as u8)
        }
    }
}

/// Print the listing (non-interactive)
fn run_list_mode(config: &Config, format: OutputFormat) -> anyhow::Result<()> {
    let mut navigator = config.navigator()?;
    output_listing(&mut navigator, format, &config.columns)
}

fn run_with_config(config: Config) -> anyhow::Result<()> {
    // Initialize terminal
    terminal::enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, cursor::Hide)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let result = run_app(&mut terminal, config);

    // Restore terminal
    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, cursor::Show)?;

    result
}
