//! File-backed tracing setup.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use color_eyre::{
    Result,
    eyre::{WrapErr, eyre},
};
use orbita_config::LogConfig;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber, writing to the configured log file.
///
/// `RUST_LOG` takes precedence over the configured level. Returns the log
/// path, or `None` when the platform has no data directory and no file was
/// configured, in which case logging stays off.
pub fn init(config: &LogConfig) -> Result<Option<PathBuf>> {
    let Some(path) = config.file_path() else {
        return Ok(None);
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .wrap_err_with(|| format!("invalid log level {:?}", config.level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| eyre!("failed to install log subscriber: {err}"))?;

    Ok(Some(path))
}
