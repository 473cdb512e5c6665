//! flagdeck - main entry point.
//!
//! - `cli` - Argument parsing
//! - `config` - `flagdeck.toml` loading
//! - `commands` - Command implementations

mod cli;
mod commands;
mod config;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

/// Environment variable selecting the log level when `--log-level` is absent.
const LOG_LEVEL_ENV: &str = "FLAGDECK_LOG_LEVEL";

fn init_logging(cli: &Cli) {
    let filter = if let Some(level) = cli.log_level {
        EnvFilter::new(level.as_filter_str())
    } else if let Ok(level) = std::env::var(LOG_LEVEL_ENV) {
        EnvFilter::new(level)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(&cli);

    let config = config::FlagdeckConfig::load(cli.config.as_deref())?;
    commands::dispatch(cli.command, &config)
}
