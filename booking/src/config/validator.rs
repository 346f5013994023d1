//! Configuration validation.

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Validates a merged configuration.
///
/// # Examples
///
/// ```
/// use booking::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
///
/// let bad = Config { maximum_lock_wait_seconds: Some(0), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first invalid field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref principal) = config.principal {
            Self::validate_identifier("principal", principal)?;
        }

        if let Some(timeout) = config.maximum_lock_wait_seconds {
            if timeout == 0 {
                return Err(Error::Validation {
                    field: "maximum_lock_wait_seconds".into(),
                    message: "Timeout must be greater than 0".into(),
                });
            }
        }

        if let Some(ref path) = config.database_path {
            if path.as_os_str().is_empty() {
                return Err(Error::Validation {
                    field: "database_path".into(),
                    message: "Cannot be empty".into(),
                });
            }
        }

        Ok(())
    }

    /// Checks that the identifier is non-empty after trimming, contains no
    /// null bytes, and is not longer than 255 characters.
    fn validate_identifier(field: &str, value: &str) -> Result<()> {
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(Error::Validation {
                field: field.into(),
                message: "Cannot be empty or only whitespace".into(),
            });
        }

        if trimmed.contains('\0') {
            return Err(Error::Validation {
                field: field.into(),
                message: "Cannot contain null bytes".into(),
            });
        }

        if trimmed.len() > 255 {
            return Err(Error::Validation {
                field: field.into(),
                message: "Cannot exceed 255 characters".into(),
            });
        }

        Ok(())
    }
}
