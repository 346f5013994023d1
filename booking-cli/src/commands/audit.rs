//! Audit command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, output_format, print_json, GlobalOptions};
use booking::config::OutputFormat;
use booking::{AuditEvent, Database, ReservationId};
use chrono::SecondsFormat;
use clap::Args;
use std::io::Write;

/// Show recorded audit events, oldest first.
#[derive(Args)]
pub struct AuditCommand {
    /// Only events for this reservation
    #[arg(long, value_name = "ID")]
    pub reservation: Option<ReservationId>,

    /// Output format (table, json, csv, tsv)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

impl AuditCommand {
    /// Execute the audit command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let object_id = self.reservation.map(|id| id.to_string());
        let events = Database::list_audit_events(db.connection(), object_id.as_deref())?;

        match output_format(self.format, &config) {
            OutputFormat::Json => print_json(&events),
            OutputFormat::Table => format_as_table(&events),
            OutputFormat::Csv => format_as_delimited(&events, b','),
            OutputFormat::Tsv => format_as_delimited(&events, b'\t'),
        }
    }
}

fn row(event: &AuditEvent) -> [String; 5] {
    [
        event.recorded_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        event.operation.to_string(),
        event.object_type.clone(),
        event.object_id.clone(),
        event.principal.clone(),
    ]
}

fn format_as_table(events: &[AuditEvent]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    writeln!(handle, "RECORDED_AT\tOPERATION\tOBJECT_TYPE\tOBJECT_ID\tPRINCIPAL")?;
    for event in events {
        writeln!(handle, "{}", row(event).join("\t"))?;
    }

    Ok(())
}

fn format_as_delimited(events: &[AuditEvent], delimiter: u8) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(stdout.lock());

    writer.write_record(["recorded_at", "operation", "object_type", "object_id", "principal"])?;
    for event in events {
        writer.write_record(row(event))?;
    }

    writer.flush()?;
    Ok(())
}
