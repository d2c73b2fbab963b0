use std::fs::{self, File};
use std::path::Path;

use simplelog::{Config, LevelFilter, WriteLogger};

use crate::error::AppError;

/// Picks the file log level from the `--verbose` flag.
#[must_use]
pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Sends `log` records to `path`, truncating any previous run's log.
///
/// The terminal belongs to the board while the game runs, so nothing is
/// logged to stdout or stderr.
pub fn init(path: &Path, level: LevelFilter) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| AppError::LogFile {
            path: path.to_path_buf(),
            source,
        })?;
    }

    let file = File::create(path).map_err(|source| AppError::LogFile {
        path: path.to_path_buf(),
        source,
    })?;

    WriteLogger::init(level, Config::default(), file)?;
    Ok(())
}
