//! Delete command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, report_execution, GlobalOptions};
use booking::{BookingService, ReservationId};
use clap::Args;

/// Soft or hard delete a reservation.
#[derive(Args)]
pub struct DeleteCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: ReservationId,

    /// Remove the row permanently instead of marking it deleted
    #[arg(long)]
    pub hard: bool,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl DeleteCommand {
    /// Execute the delete command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let result = BookingService::new(&mut db)
            .with_principal(config.principal.clone())
            .with_dry_run(self.dry_run)
            .delete(self.id, self.hard)?;

        report_execution(&result, global);

        if !global.quiet && !result.dry_run {
            if self.hard {
                eprintln!("Removed reservation {}", self.id);
            } else {
                eprintln!("Deleted reservation {}", self.id);
            }
        }

        Ok(())
    }
}
