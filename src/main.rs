use std::fs::File;
use std::io;
use std::panic;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use clap::Parser;
use torus_snake::config::{ConfigOverrides, MIN_TICK_INTERVAL_MS, SessionConfig, load_config};
use torus_snake::error::ConfigError;
use torus_snake::heading::Heading;
use torus_snake::input::{self, ShellInput};
use torus_snake::renderer::{self, THEME_CLASSIC};
use torus_snake::replay::replay;
use torus_snake::session::GameSession;
use torus_snake::terminal_runtime::{TerminalSession, restore_terminal};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON session config; the flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cells per side of the square board.
    #[arg(long)]
    grid_size: Option<u16>,

    /// Initial snake length.
    #[arg(long = "length")]
    initial_length: Option<u16>,

    /// RNG seed for a reproducible game.
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds between ticks in interactive mode.
    #[arg(long = "tick-ms")]
    tick_interval_ms: Option<u64>,

    /// Replay `--moves` without a terminal UI and print each tick as JSON.
    #[arg(long)]
    headless: bool,

    /// One heading per tick: U, D, L or R. Any other character keeps the
    /// current heading.
    #[arg(long, requires = "headless")]
    moves: Option<String>,

    /// Write logs here. Interactive mode logs nothing without it.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = session_config(&cli)?;
    tracing::info!(?config, headless = cli.headless, "starting");

    if cli.headless {
        let mut session = GameSession::new(&config)?;
        let moves = cli.moves.as_deref().unwrap_or_default();
        return replay(&mut session, moves, io::stdout().lock());
    }

    install_panic_hook();
    run_interactive(&config)
}

fn init_logging(cli: &Cli) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(path) = &cli.log_file {
        let file = File::create(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if cli.headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }

    Ok(())
}

fn session_config(cli: &Cli) -> Result<SessionConfig, ConfigError> {
    let loaded = match &cli.config {
        Some(path) => load_config(path)?,
        None => SessionConfig::default(),
    };

    ConfigOverrides {
        grid_size: cli.grid_size,
        initial_length: cli.initial_length,
        seed: cli.seed,
        tick_interval_ms: cli.tick_interval_ms,
    }
    .apply(loaded)
}

fn run_interactive(config: &SessionConfig) -> io::Result<()> {
    let tick_interval = Duration::from_millis(config.tick_interval_ms.max(MIN_TICK_INTERVAL_MS));
    let mut session = GameSession::new(config)?;
    let mut snapshot = session.snapshot();
    let mut pending: Option<Heading> = None;
    let mut last_tick = Instant::now();

    let mut terminal = TerminalSession::enter()?;

    loop {
        terminal
            .terminal_mut()
            .draw(|frame| renderer::render(frame, &snapshot, session.grid(), &THEME_CLASSIC))?;

        let timeout = input::poll_timeout(
            tick_interval,
            last_tick.elapsed(),
            snapshot.state.is_terminal(),
        );
        match input::poll_input(timeout)? {
            Some(ShellInput::Quit) => break,
            Some(ShellInput::Restart) if snapshot.state.is_terminal() => {
                tracing::info!(score = snapshot.score, "restarting");
                session = GameSession::new(config)?;
                snapshot = session.snapshot();
                pending = None;
                last_tick = Instant::now();
                continue;
            }
            // Last key before the tick wins; the session rejects reversals.
            Some(ShellInput::Heading(heading)) => pending = Some(heading),
            _ => {}
        }

        if last_tick.elapsed() >= tick_interval && !snapshot.state.is_terminal() {
            snapshot = session.tick(pending.take());
            last_tick = Instant::now();
        }
    }

    Ok(())
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        default_hook(panic_info);
    }));
}
