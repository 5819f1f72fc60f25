//! TCALC - Terminal Calculator
//!
//! Prompts for two numbers and an operator, records every attempt in a
//! history table, and shows minimum, maximum, average and total of the
//! successful results when the session ends.

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tcalc::application::{run_session, App, AppMode};
use tcalc::infrastructure::ReportWriter;
use tcalc::presentation::{render_session_tables, render_ui, ConsolePrompter, InputHandler};

#[derive(Parser)]
#[command(name = "tcalc", about = "Interactive terminal calculator with history and summary", version)]
struct Cli {
    /// Use a plain line prompt instead of the full-screen interface
    #[arg(long)]
    plain: bool,

    /// Write the history and summary tables here when the session ends (.json or .csv)
    #[arg(short, long)]
    report: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Entry point for the TCALC terminal calculator.
///
/// # Errors
///
/// Returns an error if logging or terminal setup fails, or if the terminal
/// interface fails during runtime.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    if cli.plain {
        run_plain(cli.report.as_deref())
    } else {
        run_tui(cli.report)
    }
}

/// Installs the tracing subscriber. The full-screen interface owns the
/// terminal, so without a log file nothing is logged there.
fn init_tracing(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let filter = if cli.verbose {
        EnvFilter::new("tcalc=debug")
    } else {
        EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(|_| "tcalc=info".into()))
    };

    match &cli.log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if cli.plain => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(io::stderr)
                .init();
        }
        None => {}
    }

    Ok(())
}

fn run_plain(report: Option<&std::path::Path>) -> Result<(), Box<dyn std::error::Error>> {
    let mut prompter = ConsolePrompter::new()?;
    let session = run_session(&mut prompter);

    println!();
    print!("{}", render_session_tables(&session));

    if let Some(path) = report {
        let written = ReportWriter::write(&session, path)?;
        println!("Report written to {written}");
    }

    Ok(())
}

fn run_tui(report: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::with_report_path(report);
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    // Leave the tables on the normal screen after the alternate screen closes
    print!("{}", render_session_tables(&app.session));
    if let Some(status) = &app.status_message {
        println!("{status}");
    }

    Ok(())
}

/// Main application event loop.
///
/// Continues running until the user quits from the summary screen.
///
/// # Errors
///
/// Returns an IO error if terminal operations fail.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                let in_summary = app.mode == AppMode::Summary;
                match key.code {
                    KeyCode::Char('q') | KeyCode::Enter | KeyCode::Esc if in_summary => {
                        info!("quit from summary screen");
                        return Ok(());
                    }
                    KeyCode::Char('c') if in_summary && key.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(());
                    }
                    _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                }
            }
        }
    }
}
