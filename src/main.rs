//! gridsel - Terminal Table
//!
//! Shows a table whose columns and rows are sized from their content and
//! lets the user move a single cell selection with the arrow keys or the
//! mouse.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use gridsel::application::App;
use gridsel::domain::TableStyle;
use gridsel::infrastructure::{ConfigRepository, GridRepository};
use gridsel::presentation::{
    render_ui, styled_grid, InputHandler, KeySource, ScriptedKeySource, TerminalKeySource,
};

#[derive(Parser)]
#[command(name = "gridsel")]
#[command(about = "Terminal table with keyboard cell selection", long_about = None)]
struct Cli {
    /// Grid definition (.csv, or .json array of rows); a demo table if omitted
    grid: Option<PathBuf>,

    /// Table style configuration file (JSON)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log file path
    #[arg(long, value_name = "FILE", default_value = "gridsel.log")]
    log_file: PathBuf,

    /// Replay comma separated keys (up,down,left,right,none) without a
    /// terminal and print the resulting selection
    #[arg(long, value_name = "LIST")]
    keys: Option<String>,
}

/// Sends `tracing` output to a log file so it does not corrupt the terminal UI.
///
/// The filter comes from `RUST_LOG` and defaults to `info`.
///
/// # Arguments
///
/// * `path` - Log file, created if missing and appended to otherwise
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
fn init_logging(path: &Path) -> Result<()> {
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Builds the initial `App` from the command line.
///
/// Without a config file the default style is used; without a grid file the
/// built-in weather table is shown.
///
/// # Arguments
///
/// * `cli` - Parsed command line arguments
///
/// # Errors
///
/// Returns an error if the config file is unreadable or invalid, or if the
/// grid file cannot be parsed into a rectangular grid.
fn load_app(cli: &Cli) -> Result<App> {
    let style = match &cli.config {
        Some(path) => ConfigRepository::load_style(path)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("Failed to load config {:?}", path))?,
        None => TableStyle::default(),
    };

    let grid = match &cli.grid {
        Some(path) => GridRepository::load_grid(path)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("Failed to load grid {:?}", path))?,
        None => GridRepository::default_grid(),
    };

    let grid = styled_grid(grid, &style);
    Ok(App::new(grid, style))
}

/// Entry point: runs the interactive table, or replays `--keys` headless.
///
/// # Errors
///
/// Returns an error if logging, loading, terminal setup or teardown fails,
/// or if the event loop stops on an I/O error. The terminal is restored
/// before an event loop error is returned.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_file)?;

    let mut app = load_app(&cli)?;
    tracing::info!(
        "Starting with {}x{} grid",
        app.grid.row_count(),
        app.grid.column_count()
    );

    if let Some(keys) = &cli.keys {
        return run_headless(&mut app, keys);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut source = TerminalKeySource::new();
    let res = run_app(&mut terminal, &mut app, &mut source);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!("Event loop failed: {}", err);
        return Err(err).context("Event loop failed");
    }

    Ok(())
}

/// Measure, draw, then wait for the next event, until the source quits.
///
/// # Arguments
///
/// * `terminal` - Terminal to draw frames on
/// * `app` - Table state, updated by every event
/// * `source` - Where input events come from
///
/// # Errors
///
/// Returns an error if drawing or reading the next event fails.
fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    source: &mut dyn KeySource,
) -> io::Result<()> {
    loop {
        app.run_measure_pass();
        terminal.draw(|f| render_ui(f, app))?;

        match source.next_event()? {
            Some(event) => {
                if !InputHandler::handle_event(app, event) {
                    return Ok(());
                }
            }
            None => return Ok(()),
        }
    }
}

/// Replays `keys` against `app` without a terminal and prints the final
/// selection and the published column widths and row heights.
///
/// # Arguments
///
/// * `app` - Table state to drive
/// * `keys` - Comma separated key names, e.g. `down,right,right`
///
/// # Errors
///
/// Returns an error if a key name is unknown or the key source fails.
fn run_headless(app: &mut App, keys: &str) -> Result<()> {
    let mut source = ScriptedKeySource::from_keys(keys).map_err(anyhow::Error::msg)?;
    app.run_measure_pass();
    InputHandler::drain(app, &mut source)?;

    println!("selection: {}", app.selected());

    let sizes = &app.layout.sizes;
    let widths: Vec<String> = (0..app.grid.column_count())
        .map(|column| match sizes.width_for(column) {
            Some(width) => width.to_string(),
            None => "-".to_string(),
        })
        .collect();
    let heights: Vec<String> = (0..app.grid.row_count())
        .map(|row| match sizes.height_for(row) {
            Some(height) => height.to_string(),
            None => "-".to_string(),
        })
        .collect();
    println!("column widths: {}", widths.join(" "));
    println!("row heights: {}", heights.join(" "));
    Ok(())
}
