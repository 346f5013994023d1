//! Health command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, print_json, GlobalOptions};
use booking::operations::HealthReport;
use booking::BookingService;
use clap::Args;

/// Check liveness and readiness.
///
/// Exits with the unavailable code when the database cannot be reached.
#[derive(Args)]
pub struct HealthCommand {}

impl HealthCommand {
    /// Execute the health command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;

        let mut db = match open_database(global, &config) {
            Ok(db) => db,
            Err(e) => {
                print_json(&HealthReport {
                    live: true,
                    ready: false,
                    detail: Some(e.to_string()),
                })?;
                return Err(booking::Error::Unavailable {
                    operation: "health".into(),
                }
                .into());
            }
        };

        let service = BookingService::new(&mut db);
        print_json(&service.health())?;
        service.ensure_ready()?;
        Ok(())
    }
}
