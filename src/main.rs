use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use pocketgtd::cli::Cli;
use pocketgtd::commands::{self, Command};
use pocketgtd::config::{Config, StorageConfig};
use pocketgtd::logger;
use pocketgtd::storage::LocalStorage;
use pocketgtd::tracker::Tracker;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.init_config {
        let path = match &cli.config {
            Some(path) => PathBuf::from(path),
            None => Config::get_default_config_path()?,
        };
        return Config::generate_default_config(path);
    }

    let config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load()?,
    };
    logger::init(&config.logging)?;

    let location = cli.db.clone().unwrap_or_else(|| config.storage.database_path.clone());
    if cli.db.is_none() && location == StorageConfig::default().database_path {
        // Only the default data directory is created on demand.
        if let Some(parent) = Path::new(&location).parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data directory: {}", parent.display()))?;
        }
    }

    let storage = LocalStorage::open(&location).await?;
    if config.storage.auto_setup && !storage.has_schema().await? {
        storage.setup_schema().await?;
    }

    let tracker = Tracker::new(storage);
    let command = Command::parse(cli.command.as_slice());

    let mut stdout = std::io::stdout().lock();
    let result = commands::execute(&tracker, command, &mut stdout).await;
    stdout.flush()?;
    drop(stdout);

    tracker.close().await?;
    result
}
