//! Update command implementation.
//!
//! This module implements the `update` command: replace the reservation at
//! an id (creating it if absent), or restore a soft-deleted one. A body with
//! `"deleted_at": null` also restores.

use crate::error::CliError;
use crate::utils::{
    load_configuration, open_database, print_json, read_body, report_execution, GlobalOptions,
};
use booking::{ActionHint, BookingService, ReservationId, UpdateRequest};
use clap::Args;
use std::path::PathBuf;

/// Replace or restore a reservation.
#[derive(Args)]
pub struct UpdateCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: ReservationId,

    /// Requested action: replace or restore (case-insensitive)
    #[arg(long, value_name = "ACTION", default_value = "replace")]
    pub action: ActionHint,

    /// Read the reservation as JSON from a file (`-` for stdin)
    #[arg(long, value_name = "FILE")]
    pub body: Option<PathBuf>,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl UpdateCommand {
    /// Execute the update command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Read the body, if any
        let body = self.body.as_deref().map(read_body).transpose()?;

        // 2. Load configuration and open database
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        // 3. Plan and execute
        let result = BookingService::new(&mut db)
            .with_principal(config.principal.clone())
            .with_dry_run(self.dry_run)
            .update(self.id, UpdateRequest::new(self.action, body))?;

        report_execution(&result, global);

        // 4. Output the stored reservation
        if !result.dry_run {
            if let Some(ref reservation) = result.reservation {
                print_json(reservation)?;
            }
        }

        Ok(())
    }
}
