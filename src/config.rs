use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const APP_DIR_NAME: &str = "wrap-snake";
const CONFIG_FILE_NAME: &str = "config.json";

/// Reference screen width in pixels.
pub const DEFAULT_SCREEN_WIDTH_PX: u32 = 640;

/// Reference screen height in pixels.
pub const DEFAULT_SCREEN_HEIGHT_PX: u32 = 480;

/// Edge length of one board cell in pixels.
pub const DEFAULT_CELL_SIZE_PX: u32 = 20;

/// Snake steps per second.
pub const DEFAULT_TICKS_PER_SECOND: u32 = 20;

/// Logical grid dimensions in cells.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Derives cell dimensions from a pixel screen, truncating partial cells.
    #[must_use]
    pub fn from_screen(width_px: u32, height_px: u32, cell_size_px: u32) -> Option<Self> {
        if cell_size_px == 0 {
            return None;
        }

        let width = u16::try_from(width_px / cell_size_px).ok()?;
        let height = u16::try_from(height_px / cell_size_px).ok()?;
        if width == 0 || height == 0 {
            return None;
        }

        Some(Self { width, height })
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            width: (DEFAULT_SCREEN_WIDTH_PX / DEFAULT_CELL_SIZE_PX) as u16,
            height: (DEFAULT_SCREEN_HEIGHT_PX / DEFAULT_CELL_SIZE_PX) as u16,
        }
    }
}

/// Colors used by the board renderer.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub border: Color,
    pub food: Color,
    pub snake: Color,
    pub status: Color,
}

pub const PALETTE: Palette = Palette {
    background: Color::Black,
    border: Color::Rgb(93, 216, 228),
    food: Color::Rgb(255, 0, 0),
    snake: Color::Rgb(0, 255, 0),
    status: Color::DarkGray,
};

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("cell size must be greater than zero")]
    ZeroCellSize,
    #[error("screen {width_px}x{height_px} px does not fit a board of at least one {cell_size_px} px cell per axis")]
    ScreenTooSmall {
        width_px: u32,
        height_px: u32,
        cell_size_px: u32,
    },
    #[error("board of {width}x{height} cells is too small to hold both snake and food")]
    BoardTooSmall { width: u16, height: u16 },
    #[error("tick rate must be greater than zero")]
    ZeroTickRate,
}

/// User-facing configuration as read from the JSON file and CLI flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen_width_px: u32,
    pub screen_height_px: u32,
    pub cell_size_px: u32,
    pub ticks_per_second: u32,
    /// Fixed RNG seed; a random seed is drawn when absent.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width_px: DEFAULT_SCREEN_WIDTH_PX,
            screen_height_px: DEFAULT_SCREEN_HEIGHT_PX,
            cell_size_px: DEFAULT_CELL_SIZE_PX,
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
            seed: None,
        }
    }
}

/// Validated settings consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameSettings {
    pub bounds: GridSize,
    pub tick_interval: Duration,
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Loads configuration from `path`.
    ///
    /// With `required == false` a missing file yields the defaults, which is
    /// how the per-user default location is treated.
    pub fn load(path: &Path, required: bool) -> Result<Self, ConfigError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound && !required => {
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Checks geometry and cadence and converts them into runtime settings.
    pub fn validate(&self) -> Result<GameSettings, ConfigError> {
        if self.cell_size_px == 0 {
            return Err(ConfigError::ZeroCellSize);
        }

        let bounds = GridSize::from_screen(
            self.screen_width_px,
            self.screen_height_px,
            self.cell_size_px,
        )
        .ok_or(ConfigError::ScreenTooSmall {
            width_px: self.screen_width_px,
            height_px: self.screen_height_px,
            cell_size_px: self.cell_size_px,
        })?;

        if bounds.total_cells() < 2 {
            return Err(ConfigError::BoardTooSmall {
                width: bounds.width,
                height: bounds.height,
            });
        }

        if self.ticks_per_second == 0 {
            return Err(ConfigError::ZeroTickRate);
        }

        Ok(GameSettings {
            bounds,
            tick_interval: Duration::from_secs(1) / self.ticks_per_second,
            seed: self.seed,
        })
    }
}

/// Returns the per-user config file location.
#[must_use]
pub fn default_config_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(CONFIG_FILE_NAME);
    base
}

/// Returns the per-user log file location.
#[must_use]
pub fn default_log_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push("wrap-snake.log");
    base
}
