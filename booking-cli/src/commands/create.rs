//! Create command implementation.
//!
//! This module implements the `create` command. The reservation comes either
//! from a JSON body (`--body FILE`, `-` for stdin) or from individual flags.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, read_body, report_execution, GlobalOptions};
use booking::{BookingService, ReservationPayload};
use chrono::NaiveDate;
use clap::Args;
use std::path::PathBuf;

/// Create a reservation.
#[derive(Args)]
pub struct CreateCommand {
    /// Read the reservation as JSON from a file (`-` for stdin)
    #[arg(long, value_name = "FILE", conflicts_with_all = ["id", "room", "from", "to"])]
    pub body: Option<PathBuf>,

    /// Reservation id (generated when omitted)
    #[arg(long, value_name = "UUID")]
    pub id: Option<String>,

    /// Room to reserve
    #[arg(long, value_name = "ROOM_ID")]
    pub room: Option<String>,

    /// First reserved day
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub from: Option<NaiveDate>,

    /// Last reserved day
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub to: Option<NaiveDate>,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl CreateCommand {
    /// Execute the create command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Build the request body
        let payload = match self.body {
            Some(ref path) => read_body(path)?,
            None => ReservationPayload {
                id: self.id,
                from: self.from,
                to: self.to,
                room_id: self.room,
                ..ReservationPayload::default()
            },
        };

        // 2. Load configuration
        let config = load_configuration(global)?;

        // 3. Open database
        let mut db = open_database(global, &config)?;

        // 4. Plan and execute
        let result = BookingService::new(&mut db)
            .with_principal(config.principal.clone())
            .with_dry_run(self.dry_run)
            .create(payload)?;

        report_execution(&result, global);

        // 5. Output the new id on stdout
        if !result.dry_run {
            if let Some(reservation) = result.reservation {
                println!("{}", reservation.id());
            }
        }

        Ok(())
    }
}
