//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Toggle runtime feature flag overrides.
#[derive(Debug, Parser)]
#[command(name = "flagdeck", version, about)]
pub struct Cli {
    /// Path to flagdeck.toml (defaults to the flagdeck config directory).
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level; falls back to FLAGDECK_LOG_LEVEL, then RUST_LOG.
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List displayable flags with their override state.
    List {
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Advance a flag to its next state (default -> on -> off -> default).
    Toggle {
        /// Flag id.
        id: String,
    },
    /// Print the value an activation key resolves to after overrides.
    Resolve {
        /// Activation key (filter name).
        key: String,
        /// Value the host would produce without overrides.
        #[arg(long, default_value_t = false, action = clap::ArgAction::Set)]
        natural: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}
