use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use connect_four::config::AppConfig;
use connect_four::game::{Dimensions, MoveResult, Session, TerminationOrder};
use connect_four::ui::App;

/// Play Connect Four in the terminal.
#[derive(Parser)]
#[command(name = "connect-four", about = "Two-player Connect Four")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// Colour token for the first player
    #[arg(long)]
    p1: Option<String>,

    /// Colour token for the second player
    #[arg(long)]
    p2: Option<String>,

    /// Override board height
    #[arg(long)]
    height: Option<usize>,

    /// Override board width
    #[arg(long)]
    width: Option<usize>,

    /// Report a tie when the final piece fills the board, even if it also
    /// completes four in a row
    #[arg(long)]
    tie_first: bool,

    /// Play these columns (0-based, comma separated) without the TUI and
    /// print each result
    #[arg(long, value_delimiter = ',')]
    moves: Option<Vec<usize>>,

    /// Append logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    init_tracing(cli.log_file.as_deref(), cli.moves.is_some())?;

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(p1) = cli.p1 {
        config.players.first = p1;
    }
    if let Some(p2) = cli.p2 {
        config.players.second = p2;
    }
    if let Some(height) = cli.height {
        config.game.height = height;
    }
    if let Some(width) = cli.width {
        config.game.width = width;
    }
    if cli.tie_first {
        config.game.termination_order = TerminationOrder::TieFirst;
    }
    config.validate().context("invalid settings")?;
    let dims = config.game.dimensions()?;

    match cli.moves {
        Some(moves) => {
            run_headless(&config, dims, &moves);
            Ok(())
        }
        None => run_tui(config, dims).context("terminal UI failed"),
    }
}

/// Logs go to a file or, in headless mode, to stderr. The TUI owns the
/// terminal, so without a file nothing is written.
fn init_tracing(log_file: Option<&Path>, headless: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening log file {}", path.display()))?;
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();
    } else if headless {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr))
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry().with(env_filter).init();
    }
    Ok(())
}

fn run_headless(config: &AppConfig, dims: Dimensions, moves: &[usize]) {
    let mut session = Session::new(config.game.termination_order);
    let (first, second) = config.players.players();
    session.start_game(first, second, dims);

    for (turn, &column) in moves.iter().enumerate() {
        let Some(result) = session.apply_move(column) else {
            break;
        };
        println!("{:>3}. column {column}: {}", turn + 1, describe(&result));
    }

    if let Some(engine) = session.engine() {
        println!();
        print!("{}", engine.board());
    }
}

fn describe(result: &MoveResult) -> String {
    match result {
        MoveResult::Continue { row, player, .. } => format!("{player} lands on row {row}"),
        MoveResult::Win { player, run, .. } => format!("{player} wins with {run:?}"),
        MoveResult::Tie { .. } => "tie, the board is full".to_string(),
        MoveResult::Rejected(reason) => format!("rejected: {reason}"),
    }
}

fn run_tui(config: AppConfig, dims: Dimensions) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let mut app = App::new(config, dims);
    let res = app.run(&mut terminal);

    // Restore terminal even if the app failed
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}
