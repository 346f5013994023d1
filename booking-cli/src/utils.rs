//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including configuration loading, database management, request body
//! input and output formatting.

use crate::error::CliError;
use booking::config::OutputFormat;
use booking::{Config, ConfigBuilder, Database, ExecutionResult, ReservationPayload};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the busy timeout (in seconds).
    pub busy_timeout: Option<u64>,

    /// Principal recorded in audit events.
    pub principal: Option<String>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Global options (highest priority)
/// 2. Environment variables
/// 3. Configuration files
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let overrides = Config {
        maximum_lock_wait_seconds: global.busy_timeout,
        principal: global.principal.clone(),
        disable_autoinit: global.disable_autoinit.then_some(true),
        ..Config::default()
    };

    ConfigBuilder::new()
        .with_data_dir(global.data_dir.clone())
        .with_config(overrides)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Resolve the data directory: `--data-dir`, then `BOOKING_DATA_DIR`, then
/// `~/.booking`.
pub fn resolve_data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    match global.data_dir {
        Some(ref dir) => Ok(dir.clone()),
        None => booking::database::resolve_data_dir().map_err(|e| CliError::Config(e.to_string())),
    }
}

/// Open database with configuration.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let data_dir = resolve_data_dir(global)?;
    let db_config = config.database_config(&data_dir);
    log::debug!("opening database at {}", db_config.path.display());
    Database::open(db_config).map_err(CliError::from)
}

/// Pick the output format: explicit flag, then configuration.
pub fn output_format(flag: Option<OutputFormat>, config: &Config) -> OutputFormat {
    flag.unwrap_or_else(|| config.format())
}

/// Read a reservation body from a file, or from stdin when `path` is `-`.
pub fn read_body(path: &Path) -> Result<ReservationPayload, CliError> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(|e| {
            CliError::InvalidArguments(format!("cannot read body {}: {e}", path.display()))
        })?
    };

    ReservationPayload::from_json(&text).map_err(CliError::from)
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, value)?;
    writeln!(handle)?;
    Ok(())
}

/// Report a dry run, warnings and recorded audit events on stderr.
pub fn report_execution(result: &ExecutionResult, global: &GlobalOptions) {
    if global.quiet {
        return;
    }

    if result.dry_run {
        eprintln!("Dry run - would perform the following actions:");
        for (i, action) in result.actions_taken.iter().enumerate() {
            eprintln!("  {}. {}", i + 1, action);
        }
    }

    for warning in &result.warnings {
        eprintln!("Warning: {warning}");
    }

    if global.verbose {
        for event in &result.audit_events {
            eprintln!("Recorded: {event}");
        }
    }
}

/// Render an optional value for table output.
pub fn or_dash(value: Option<impl ToString>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Render an optional value for CSV output.
pub fn or_empty(value: Option<impl ToString>) -> String {
    value.map_or_else(String::new, |v| v.to_string())
}
