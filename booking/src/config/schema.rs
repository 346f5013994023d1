//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for booking:
//! where the database lives, how long to wait for its lock, who acts, and
//! how listings are printed.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::database::{DatabaseConfig, DATABASE_FILE_NAME};

/// Default lock wait when nothing is configured.
pub const DEFAULT_LOCK_WAIT_SECONDS: u64 = 5;

/// Complete configuration structure.
///
/// This represents the full configuration schema, supporting hierarchical
/// configuration from multiple sources.
///
/// # Examples
///
/// ```
/// use booking::config::{Config, OutputFormat};
///
/// let config = Config {
///     principal: Some("front-desk".to_string()),
///     output_format: Some(OutputFormat::Json),
///     ..Default::default()
/// };
/// assert_eq!(config.format(), OutputFormat::Json);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Explicit database file; defaults to `booking.db` in the data directory.
    pub database_path: Option<PathBuf>,

    /// Maximum time to wait for database lock acquisition (seconds).
    pub maximum_lock_wait_seconds: Option<u64>,

    /// Principal recorded in audit events.
    pub principal: Option<String>,

    /// Output format for list commands.
    pub output_format: Option<OutputFormat>,

    /// Disable automatic database creation.
    pub disable_autoinit: Option<bool>,
}

impl Config {
    /// Returns the configured lock wait, or the default.
    #[must_use]
    pub fn lock_wait(&self) -> Duration {
        Duration::from_secs(
            self.maximum_lock_wait_seconds
                .unwrap_or(DEFAULT_LOCK_WAIT_SECONDS),
        )
    }

    /// Returns the configured output format, or the table format.
    #[must_use]
    pub fn format(&self) -> OutputFormat {
        self.output_format.unwrap_or(OutputFormat::Table)
    }

    /// Returns the database file, resolving the default against `data_dir`.
    #[must_use]
    pub fn database_file(&self, data_dir: &Path) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(|| data_dir.join(DATABASE_FILE_NAME))
    }

    /// Builds the database connection settings for this configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use booking::config::Config;
    /// use std::path::Path;
    ///
    /// let config = Config {
    ///     maximum_lock_wait_seconds: Some(2),
    ///     disable_autoinit: Some(true),
    ///     ..Default::default()
    /// };
    /// let db = config.database_config(Path::new("/data"));
    ///
    /// assert_eq!(db.path, Path::new("/data/booking.db"));
    /// assert_eq!(db.busy_timeout.as_secs(), 2);
    /// assert!(!db.auto_create);
    /// ```
    #[must_use]
    pub fn database_config(&self, data_dir: &Path) -> DatabaseConfig {
        let config =
            DatabaseConfig::new(self.database_file(data_dir)).with_busy_timeout(self.lock_wait());
        if self.disable_autoinit.unwrap_or(false) {
            config.without_auto_create()
        } else {
            config
        }
    }
}

/// Output format for list commands.
///
/// # Examples
///
/// ```
/// use booking::config::OutputFormat;
///
/// let format = OutputFormat::Json;
/// assert_eq!(format.to_string(), "json");
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON output format.
    Json,
    /// CSV output format.
    Csv,
    /// TSV output format.
    Tsv,
    /// Human-readable table format.
    Table,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Tsv => write!(f, "tsv"),
            Self::Table => write!(f, "table"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            "table" => Ok(Self::Table),
            _ => Err(format!("invalid output format: {s}")),
        }
    }
}
