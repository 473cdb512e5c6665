//! Command implementations.

use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use flagdeck_engine::{
    DefinitionSource, FlagEngine, FlagView, LocalOperator, StateStore, ToggleRequest,
};
use flagdeck_hooks::FilterRegistry;
use flagdeck_storage::{FileOptionStore, FlagdeckPaths};

use crate::cli::Command;
use crate::config::FlagdeckConfig;

/// Build the engine for this invocation.
pub fn build_engine(config: &FlagdeckConfig) -> Result<FlagEngine> {
    let registry = DefinitionSource::new(config.definitions.iter().cloned())
        .load()
        .context("Failed to load feature flag definitions")?;

    let options = FileOptionStore::with_paths(FlagdeckPaths::from_root(config.data_dir.clone()));
    let states = StateStore::with_option_name(Arc::new(options), config.option_name.clone());

    Ok(FlagEngine::new(registry, states))
}

pub fn dispatch(command: Command, config: &FlagdeckConfig) -> Result<ExitCode> {
    let engine = build_engine(config)?;
    let mut out = std::io::stdout().lock();

    match command {
        Command::List { json } => run_list(&engine, json, &mut out),
        Command::Toggle { id } => run_toggle(&engine, &id, &mut out),
        Command::Resolve { key, natural } => run_resolve(&engine, &key, natural, &mut out),
    }
}

fn run_list(engine: &FlagEngine, json: bool, out: &mut impl Write) -> Result<ExitCode> {
    let flags = engine.snapshot()?;

    if json {
        serde_json::to_writer_pretty(&mut *out, &flags)?;
        writeln!(out)?;
    } else if flags.is_empty() {
        writeln!(out, "No feature flags defined.")?;
    } else {
        for flag in &flags {
            writeln!(out, "{}", format_row(flag))?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn run_toggle(engine: &FlagEngine, id: &str, out: &mut impl Write) -> Result<ExitCode> {
    let response = engine.handle(&ToggleRequest::new(id), &LocalOperator);
    serde_json::to_writer(&mut *out, &response)?;
    writeln!(out)?;

    Ok(if response.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn run_resolve(
    engine: &FlagEngine,
    key: &str,
    natural: bool,
    out: &mut impl Write,
) -> Result<ExitCode> {
    let filters = FilterRegistry::new();
    engine.apply_overrides(&filters)?;
    writeln!(out, "{}", filters.apply(key, natural))?;
    Ok(ExitCode::SUCCESS)
}

fn describe(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "on",
        Some(false) => "off",
        None => "?",
    }
}

/// One table row: state, effective value, default, id and label.
fn format_row(flag: &FlagView) -> String {
    format!(
        "{:<8} {:<4} (default: {:<3}) {}  {}",
        flag.state.as_str(),
        describe(flag.effective),
        describe(flag.default),
        flag.id,
        flag.label,
    )
}
