//! Room inventory commands.
//!
//! Reservations can only target rooms registered here. A removed room keeps
//! its row but no longer accepts bookings.

use crate::error::CliError;
use crate::utils::{
    load_configuration, open_database, or_dash, or_empty, output_format, print_json,
    GlobalOptions,
};
use booking::config::OutputFormat;
use booking::{Database, Room, RoomId};
use chrono::SecondsFormat;
use clap::{Args, Subcommand};
use std::io::Write;

/// Manage the room inventory.
#[derive(Subcommand)]
pub enum RoomCommand {
    /// Register a room
    Add(RoomAddCommand),

    /// Remove a room from the inventory
    Remove(RoomRemoveCommand),

    /// List rooms, removed ones included
    List(RoomListCommand),
}

impl RoomCommand {
    /// Execute the selected room command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        match self {
            RoomCommand::Add(cmd) => cmd.execute(global),
            RoomCommand::Remove(cmd) => cmd.execute(global),
            RoomCommand::List(cmd) => cmd.execute(global),
        }
    }
}

/// Register a room.
#[derive(Args)]
pub struct RoomAddCommand {
    /// Display name
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Use this id instead of a generated one
    #[arg(long, value_name = "UUID")]
    pub id: Option<RoomId>,
}

impl RoomAddCommand {
    /// Execute the room add command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut room =
            Room::new(self.name).map_err(|e| CliError::InvalidArguments(e.to_string()))?;
        if let Some(id) = self.id {
            room = room.with_id(id);
        }

        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;
        db.upsert_room(&room)?;

        println!("{}", room.id);
        Ok(())
    }
}

/// Remove a room.
#[derive(Args)]
pub struct RoomRemoveCommand {
    /// Room id
    #[arg(value_name = "ROOM_ID")]
    pub id: RoomId,
}

impl RoomRemoveCommand {
    /// Execute the room remove command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        if !db.remove_room(self.id)? {
            return Err(booking::Error::NotFound {
                resource: format!("room {}", self.id),
            }
            .into());
        }

        if !global.quiet {
            eprintln!("Removed room {}", self.id);
        }
        Ok(())
    }
}

/// List rooms.
#[derive(Args)]
pub struct RoomListCommand {
    /// Output format (table, json, csv, tsv)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

impl RoomListCommand {
    /// Execute the room list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;
        let rooms = Database::list_rooms(db.connection())?;

        match output_format(self.format, &config) {
            OutputFormat::Json => print_json(&rooms),
            OutputFormat::Table => format_as_table(&rooms),
            OutputFormat::Csv => format_as_delimited(&rooms, b','),
            OutputFormat::Tsv => format_as_delimited(&rooms, b'\t'),
        }
    }
}

fn removed_at(room: &Room) -> Option<String> {
    room.deleted_at
        .map(|at| at.to_rfc3339_opts(SecondsFormat::Secs, true))
}

fn format_as_table(rooms: &[Room]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    writeln!(handle, "ID\tNAME\tREMOVED_AT")?;
    for room in rooms {
        writeln!(handle, "{}\t{}\t{}", room.id, room.name, or_dash(removed_at(room)))?;
    }

    Ok(())
}

fn format_as_delimited(rooms: &[Room], delimiter: u8) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(stdout.lock());

    writer.write_record(["id", "name", "removed_at"])?;
    for room in rooms {
        writer.write_record(&[room.id.to_string(), room.name.clone(), or_empty(removed_at(room))])?;
    }

    writer.flush()?;
    Ok(())
}
