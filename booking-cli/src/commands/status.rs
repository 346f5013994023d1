//! Status command implementation.

use crate::error::CliError;
use crate::utils::{print_json, GlobalOptions};
use booking::operations::ServiceStatus;
use clap::Args;

/// Show service authors and API version as JSON.
#[derive(Args)]
pub struct StatusCommand {}

impl StatusCommand {
    /// Execute the status command.
    ///
    /// Static information only; the database is not opened.
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        print_json(&ServiceStatus::current())
    }
}
