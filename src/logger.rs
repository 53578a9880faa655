//! File logging through the `log` facade.
//!
//! Logging is off unless enabled in the config. When on, every record goes
//! to a single append-only file so command output on stdout stays clean.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use log::LevelFilter;

use crate::config::LoggingConfig;

/// Build a dispatcher that writes timestamped records at `level` to `path`.
pub fn dispatch(level: LevelFilter, path: &Path) -> Result<fern::Dispatch> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
        }
    }

    let file = fern::log_file(path).with_context(|| format!("Failed to open log file: {}", path.display()))?;

    Ok(fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}] {:<5} {}: {}",
                Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        // sqlx and sea-orm are noisy at debug
        .level_for("sqlx", LevelFilter::Warn)
        .level_for("sea_orm", LevelFilter::Warn)
        .chain(file))
}

/// Install the global logger according to `config`.
///
/// Returns the log file path when logging was enabled.
pub fn init(config: &LoggingConfig) -> Result<Option<PathBuf>> {
    if !config.enabled {
        return Ok(None);
    }

    let level = config.level_filter()?;
    let path = config.file_path()?;
    dispatch(level, &path)?
        .apply()
        .context("A global logger is already installed")?;

    log::info!("Logging to {} at {}", path.display(), level);
    Ok(Some(path))
}
