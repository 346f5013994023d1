//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    AuditCommand, CreateCommand, DeleteCommand, GetCommand, HealthCommand, ListCommand,
    RoomCommand, StatusCommand, UpdateCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for managing room reservations.
#[derive(Parser)]
#[command(name = "booking")]
#[command(version, about = "Manage room reservations", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "BOOKING_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true)]
    pub busy_timeout: Option<u64>,

    /// Principal recorded in the audit log
    #[arg(long, value_name = "NAME", global = true)]
    pub principal: Option<String>,

    /// Disable automatic database initialization
    #[arg(long, global = true)]
    pub disable_autoinit: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// List reservations
    List(ListCommand),

    /// Create a reservation
    Create(CreateCommand),

    /// Show one reservation
    Get(GetCommand),

    /// Replace or restore a reservation
    Update(UpdateCommand),

    /// Soft or hard delete a reservation
    Delete(DeleteCommand),

    /// Manage the room inventory
    #[command(subcommand)]
    Room(RoomCommand),

    /// Show the audit log
    Audit(AuditCommand),

    /// Show service information
    Status(StatusCommand),

    /// Check that the database answers
    Health(HealthCommand),
}
