//! List command implementation.
//!
//! This module implements the `list` command, which displays reservations
//! in various formats (table, JSON, CSV, TSV).

use crate::error::CliError;
use crate::utils::{
    load_configuration, open_database, or_dash, or_empty, output_format, GlobalOptions,
};
use booking::config::OutputFormat;
use booking::{BookingService, Reservation, ReservationFilter, RoomId};
use chrono::{NaiveDate, SecondsFormat};
use clap::Args;
use std::io::Write;

/// Column headers for CSV/TSV output.
const COLUMN_HEADERS: [&str; 6] = ["id", "room_id", "from", "to", "status", "deleted_at"];

/// List reservations.
#[derive(Args)]
pub struct ListCommand {
    /// Output format (table, json, csv, tsv)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Include soft-deleted reservations
    #[arg(long)]
    pub include_deleted: bool,

    /// Filter by room
    #[arg(long, value_name = "ROOM_ID")]
    pub room: Option<RoomId>,

    /// Only reservations starting before this day
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub before: Option<NaiveDate>,

    /// Only reservations ending after this day
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub after: Option<NaiveDate>,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Load configuration
        let config = load_configuration(global)?;

        // 2. Open database
        let mut db = open_database(global, &config)?;

        // 3. Query reservations
        let filter = ReservationFilter::new()
            .with_include_deleted(self.include_deleted)
            .with_room(self.room)
            .with_before(self.before)
            .with_after(self.after);
        let reservations = BookingService::new(&mut db).list(&filter)?;

        // 4. Format and output to stdout
        match output_format(self.format, &config) {
            OutputFormat::Table => format_as_table(&reservations)?,
            OutputFormat::Json => format_as_json(&reservations)?,
            OutputFormat::Csv => format_as_delimited(&reservations, b',')?,
            OutputFormat::Tsv => format_as_delimited(&reservations, b'\t')?,
        }

        Ok(())
    }
}

fn format_deleted_at(reservation: &Reservation) -> Option<String> {
    reservation
        .deleted_at()
        .map(|at| at.to_rfc3339_opts(SecondsFormat::Secs, true))
}

/// Format reservations as a human-readable table.
fn format_as_table(reservations: &[Reservation]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    // Print header (uppercase for table display)
    let header_line = COLUMN_HEADERS
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(handle, "{header_line}")?;

    for res in reservations {
        writeln!(
            handle,
            "{}\t{}\t{}\t{}\t{}\t{}",
            res.id(),
            res.room_id(),
            or_dash(res.from_date()),
            or_dash(res.to_date()),
            res.status(),
            or_dash(format_deleted_at(res)),
        )?;
    }

    Ok(())
}

/// Format reservations as JSON.
fn format_as_json(reservations: &[Reservation]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let json_data: Vec<serde_json::Value> = reservations
        .iter()
        .map(|r| {
            serde_json::json!({
                "id": r.id(),
                "room_id": r.room_id(),
                "from": r.from_date(),
                "to": r.to_date(),
                "status": r.status(),
                "deleted_at": format_deleted_at(r),
            })
        })
        .collect();

    serde_json::to_writer_pretty(&mut handle, &json_data)?;
    writeln!(handle)?;

    Ok(())
}

/// Format reservations as delimited output (CSV or TSV).
fn format_as_delimited(reservations: &[Reservation], delimiter: u8) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let handle = stdout.lock();
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(handle);

    writer.write_record(COLUMN_HEADERS)?;

    for res in reservations {
        writer.write_record(&[
            res.id().to_string(),
            res.room_id().to_string(),
            or_empty(res.from_date()),
            or_empty(res.to_date()),
            res.status().to_string(),
            or_empty(format_deleted_at(res)),
        ])?;
    }

    writer.flush()?;

    Ok(())
}
