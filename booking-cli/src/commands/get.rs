//! Get command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, print_json, GlobalOptions};
use booking::{BookingService, ReservationId};
use clap::Args;

/// Show one reservation as JSON.
#[derive(Args)]
pub struct GetCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: ReservationId,
}

impl GetCommand {
    /// Execute the get command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let reservation = BookingService::new(&mut db).get(self.id)?;
        print_json(&reservation)
    }
}
