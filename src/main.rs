use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use snake_arcade::config::{DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, FRAMES_PER_SECOND, GameConfig};
use snake_arcade::events::GameEvent;
use snake_arcade::game::GameState;
use snake_arcade::grid::GridSize;
use snake_arcade::input::{GameInput, poll_inputs};
use snake_arcade::renderer::HudInfo;
use snake_arcade::score::{HighScores, load_high_scores, save_high_scores, unix_now};
use snake_arcade::terminal::{TerminalSession, install_panic_hook};
use tracing::{info, trace, warn};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Grid width in cells.
    #[arg(long, default_value_t = DEFAULT_GRID_WIDTH)]
    width: u16,

    /// Grid height in cells.
    #[arg(long, default_value_t = DEFAULT_GRID_HEIGHT)]
    height: u16,

    /// Fixed RNG seed for a reproducible board.
    #[arg(long)]
    seed: Option<u64>,

    /// Do not read or write the high-score table.
    #[arg(long = "no-highscores")]
    no_highscores: bool,

    /// Write debug logs to this file.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let config = GameConfig {
        grid: GridSize {
            width: cli.width,
            height: cli.height,
        },
        seed: cli.seed,
    }
    .validate()
    .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?;

    // Surface score-file problems before the alternate screen hides stderr.
    let high_scores = if cli.no_highscores {
        None
    } else {
        Some(load_high_scores().unwrap_or_else(|error| {
            eprintln!("Ignoring unreadable high scores: {error}");
            HighScores::default()
        }))
    };

    install_panic_hook();

    let warnings = run(config, high_scores)?;
    for warning in warnings {
        eprintln!("{warning}");
    }
    Ok(())
}

/// Runs the frame loop until the player quits. Returns non-fatal warnings to
/// print once the terminal is restored.
fn run(config: GameConfig, mut high_scores: Option<HighScores>) -> io::Result<Vec<String>> {
    let mut session = TerminalSession::enter()?;
    let mut state = GameState::new(config);
    let mut boost = false;
    let mut warnings = Vec::new();
    let frame_duration = Duration::from_micros(1_000_000 / FRAMES_PER_SECOND);

    info!(
        width = config.grid.width,
        height = config.grid.height,
        "session started"
    );

    'frames: loop {
        let frame_start = Instant::now();

        for input in poll_inputs()? {
            match input {
                GameInput::Quit => break 'frames,
                GameInput::Boost => boost = !boost,
                other => state.apply_input(other),
            }
        }

        state.run_frame(if boost { 1.0 } else { 0.0 });

        for event in state.take_events() {
            match event {
                GameEvent::GameOver { score, level } => {
                    if let Some(table) = high_scores.as_mut() {
                        record_high_score(table, score, level, &mut warnings);
                    }
                }
                GameEvent::Pulse(pulse) => trace!(?pulse, "haptic pulse"),
                GameEvent::Pickup { .. } | GameEvent::LevelUp { .. } => {}
            }
        }

        session.draw(
            &state.snapshot(),
            &HudInfo {
                high_scores: high_scores.as_ref(),
                boost,
            },
        )?;

        if let Some(remaining) = frame_duration.checked_sub(frame_start.elapsed()) {
            thread::sleep(remaining);
        }
    }

    Ok(warnings)
}

fn record_high_score(table: &mut HighScores, score: u32, level: u32, warnings: &mut Vec<String>) {
    if let Some(rank) = table.record(score, level, unix_now()) {
        info!(rank, score, "new high-score entry");
    }

    if let Err(error) = save_high_scores(table) {
        warn!(%error, "failed to save high scores");
        warnings.push(format!("Failed to save high scores: {error}"));
    }
}

fn init_logging(path: Option<&Path>) -> io::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .init();
    Ok(())
}
