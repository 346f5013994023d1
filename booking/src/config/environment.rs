//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `BOOKING_*` environment variables that
//! override configuration file values.

use crate::config::schema::{Config, OutputFormat};
use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use booking::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// Reads the `BOOKING_*` variables and applies them with higher
    /// precedence than file-based configs. Empty values are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable value is invalid
    /// (e.g., non-numeric timeout, invalid boolean).
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Some(path) = Self::var("BOOKING_DATABASE_PATH") {
            config.database_path = Some(PathBuf::from(path));
        }

        if let Some(seconds) = Self::var("BOOKING_MAXIMUM_LOCK_WAIT_SECONDS") {
            config.maximum_lock_wait_seconds =
                Some(seconds.parse().map_err(|_| Error::Validation {
                    field: "BOOKING_MAXIMUM_LOCK_WAIT_SECONDS".into(),
                    message: "Must be a positive integer".into(),
                })?);
        }

        if let Some(principal) = Self::var("BOOKING_PRINCIPAL") {
            config.principal = Some(principal);
        }

        if let Some(format) = Self::var("BOOKING_OUTPUT_FORMAT") {
            config.output_format = Some(format.parse::<OutputFormat>().map_err(|message| {
                Error::Validation {
                    field: "BOOKING_OUTPUT_FORMAT".into(),
                    message,
                }
            })?);
        }

        if let Some(val) = Self::var("BOOKING_DISABLE_AUTOINIT") {
            config.disable_autoinit = Some(Self::parse_bool("BOOKING_DISABLE_AUTOINIT", &val)?);
        }

        Ok(())
    }

    fn var(name: &str) -> Option<String> {
        env::var(name).ok().filter(|v| !v.trim().is_empty())
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }
}
