use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use log::info;
use wrap_snake::config::{default_config_path, default_log_path, GameConfig, GameSettings, PALETTE};
use wrap_snake::error::AppError;
use wrap_snake::game::GameState;
use wrap_snake::input::{GameInput, InputHandler};
use wrap_snake::logging;
use wrap_snake::renderer::{self, BoardCanvas};
use wrap_snake::terminal_runtime::{install_panic_hook, TerminalSession};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON config file; defaults to the per-user config location.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Screen width in pixels.
    #[arg(long = "width-px")]
    width_px: Option<u32>,

    /// Screen height in pixels.
    #[arg(long = "height-px")]
    height_px: Option<u32>,

    /// Cell edge length in pixels.
    #[arg(long = "cell-size")]
    cell_size: Option<u32>,

    /// Snake steps per second.
    #[arg(long)]
    tps: Option<u32>,

    /// Seed for reproducible food placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Log file location.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Log debug records as well.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn load_config(&self) -> Result<GameConfig, AppError> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path, true)?,
            None => GameConfig::load(&default_config_path(), false)?,
        };

        if let Some(width_px) = self.width_px {
            config.screen_width_px = width_px;
        }
        if let Some(height_px) = self.height_px {
            config.screen_height_px = height_px;
        }
        if let Some(cell_size) = self.cell_size {
            config.cell_size_px = cell_size;
        }
        if let Some(tps) = self.tps {
            config.ticks_per_second = tps;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        Ok(config)
    }
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    let log_path = cli.log_file.clone().unwrap_or_else(default_log_path);
    logging::init(&log_path, logging::level_for(cli.verbose))?;

    let settings = cli.load_config()?.validate()?;
    info!(
        "starting on a {}x{} board, tick every {:?}",
        settings.bounds.width, settings.bounds.height, settings.tick_interval
    );

    install_panic_hook();
    let result = run(settings);
    info!("shutting down");
    result
}

fn run(settings: GameSettings) -> Result<(), AppError> {
    let mut state = match settings.seed {
        Some(seed) => GameState::new_with_seed(settings.bounds, seed)?,
        None => GameState::new(settings.bounds)?,
    };
    let mut canvas = BoardCanvas::from_state(&state);
    let mut input = InputHandler::new();

    let mut session = TerminalSession::enter()?;
    let terminal = session.terminal_mut();
    let mut next_tick = Instant::now() + settings.tick_interval;

    'game: loop {
        terminal.draw(|frame| renderer::render(frame, &state, &canvas, &PALETTE))?;

        loop {
            let timeout = next_tick.saturating_duration_since(Instant::now());
            match input.poll_input(timeout)? {
                Some(GameInput::Quit) => break 'game,
                Some(GameInput::Direction(direction)) => state.set_pending_direction(direction),
                None => {}
            }

            if Instant::now() >= next_tick {
                break;
            }
        }

        let report = state.tick();
        canvas.apply(&report, &state);

        next_tick += settings.tick_interval;
        let now = Instant::now();
        if next_tick < now {
            next_tick = now + settings.tick_interval;
        }
    }

    info!(
        "quit after {} ticks and {} restarts",
        state.tick_count, state.restarts
    );
    Ok(())
}
