//! Configuration assembly.

use std::path::{Path, PathBuf};

use log::debug;

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::merger::ConfigMerger;
use crate::config::schema::Config;
use crate::config::validator::ConfigValidator;
use crate::error::Result;

/// Builds the effective configuration from every source.
///
/// # Examples
///
/// ```
/// use booking::config::{Config, ConfigBuilder};
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_config(Config {
///         principal: Some("ops".to_string()),
///         ..Default::default()
///     })
///     .build()
///     .unwrap();
///
/// assert_eq!(config.principal.as_deref(), Some("ops"));
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    working_dir: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    overrides: Option<Config>,
    skip_files: bool,
    skip_env: bool,
}

impl ConfigBuilder {
    /// Creates a builder that reads files from the current directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the directory project files are searched from.
    #[must_use]
    pub fn with_working_dir(mut self, dir: &Path) -> Self {
        self.working_dir = Some(dir.to_path_buf());
        self
    }

    /// Sets the data directory the user config is read from.
    #[must_use]
    pub fn with_data_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.data_dir = dir;
        self
    }

    /// Applies `config` on top of every other source.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Ignores configuration files.
    #[must_use]
    pub const fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Ignores `BOOKING_*` environment variables.
    #[must_use]
    pub const fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Loads, merges and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or parsed, an environment
    /// variable is malformed, or the merged result is invalid.
    pub fn build(self) -> Result<Config> {
        let mut config = if self.skip_files {
            Config::default()
        } else {
            let working_dir = match self.working_dir {
                Some(dir) => dir,
                None => std::env::current_dir()?,
            };
            let sources = ConfigLoader::load_all(&working_dir, self.data_dir.as_deref())?;
            for source in &sources {
                debug!("loaded configuration from {}", source.path.display());
            }
            ConfigMerger::merge(sources)
        };

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        if let Some(ref overrides) = self.overrides {
            ConfigMerger::merge_into(&mut config, overrides);
        }

        ConfigValidator::validate(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::{LOCAL_CONFIG_FILE, PROJECT_CONFIG_FILE, USER_CONFIG_FILE};
    use crate::config::schema::OutputFormat;
    use crate::error::Error;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_precedence_across_files() {
        let data_dir = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        fs::write(
            data_dir.path().join(USER_CONFIG_FILE),
            "principal: user\noutput_format: csv\nmaximum_lock_wait_seconds: 7\n",
        )
        .unwrap();
        fs::write(project.path().join(PROJECT_CONFIG_FILE), "principal: project\n").unwrap();
        fs::write(project.path().join(LOCAL_CONFIG_FILE), "output_format: json\n").unwrap();

        let config = ConfigBuilder::new()
            .with_working_dir(project.path())
            .with_data_dir(Some(data_dir.path().to_path_buf()))
            .skip_env()
            .build()
            .unwrap();

        assert_eq!(config.principal.as_deref(), Some("project"));
        assert_eq!(config.output_format, Some(OutputFormat::Json));
        assert_eq!(config.maximum_lock_wait_seconds, Some(7));
    }

    #[test]
    fn test_overrides_win() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join(PROJECT_CONFIG_FILE), "principal: project\n").unwrap();

        let config = ConfigBuilder::new()
            .with_working_dir(project.path())
            .with_data_dir(Some(project.path().join("no-such-dir")))
            .skip_env()
            .with_config(Config {
                principal: Some("cli".into()),
                ..Default::default()
            })
            .build()
            .unwrap();

        assert_eq!(config.principal.as_deref(), Some("cli"));
    }

    #[test]
    fn test_invalid_result_rejected() {
        let result = ConfigBuilder::new()
            .skip_files()
            .skip_env()
            .with_config(Config {
                maximum_lock_wait_seconds: Some(0),
                ..Default::default()
            })
            .build();

        assert!(matches!(result, Err(Error::Validation { .. })));
    }

    #[test]
    fn test_unknown_key_in_file_rejected() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join(PROJECT_CONFIG_FILE), "project: old\n").unwrap();

        let result = ConfigBuilder::new()
            .with_working_dir(project.path())
            .with_data_dir(Some(project.path().join("none")))
            .skip_env()
            .build();
        assert!(result.is_err());
    }
}
