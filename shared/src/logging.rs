//! Logging setup for hosts of the generator

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{Error, Result};

/// `<dir>/<prefix>_<YYYYmmdd_HHMMSS>.log`
pub fn log_file_path(log_dir: &Path, prefix: &str, at: DateTime<Local>) -> PathBuf {
    log_dir.join(format!("{}_{}.log", prefix, at.format("%Y%m%d_%H%M%S")))
}

fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Initialize logging with file and console output
///
/// # Arguments
/// * `log_dir` - Directory to store log files, created if missing
/// * `prefix` - Prefix for log file names (e.g. "colorbars", "sweep")
/// * `level` - Log level used when `RUST_LOG` is unset
pub fn init_logging(log_dir: impl AsRef<Path>, prefix: &str, level: &str) -> Result<PathBuf> {
    let log_dir = log_dir.as_ref();
    fs::create_dir_all(log_dir)?;

    let log_file = log_file_path(log_dir, prefix, Local::now());
    let file = fs::File::create(&log_file)?;

    let subscriber = tracing_subscriber::registry()
        .with(filter(level))
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(
            fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        );

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::other(format!("Failed to set subscriber: {}", e)))?;

    tracing::info!("Logging initialized - file: {:?}", log_file);

    Ok(log_file)
}

/// Initialize console-only logging on stderr
pub fn init_console_logging(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(filter(level))
        .with_writer(std::io::stderr)
        .init();
}
