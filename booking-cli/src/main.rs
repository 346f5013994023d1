//! Main entry point for the booking CLI.
//!
//! This is the command-line interface for the room reservation library.
//! It provides commands for managing reservations:
//! - `list`: List reservations
//! - `create`: Create a reservation
//! - `get`: Show one reservation
//! - `update`: Replace or restore a reservation
//! - `delete`: Soft or hard delete a reservation
//! - `room`: Register, remove and list rooms
//! - `audit`, `status`, `health`: Inspection commands

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments; usage errors share the invalid-arguments exit code
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(4);
        }
    };

    // Initialize logging based on verbosity
    if let Err(e) = booking::init_logger(cli.verbose, cli.quiet).install() {
        eprintln!("Warning: could not install logger: {e}");
    }

    // Convert CLI args to GlobalOptions
    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        busy_timeout: cli.busy_timeout,
        principal: cli.principal,
        disable_autoinit: cli.disable_autoinit,
    };

    // Execute the command
    let result = match cli.command {
        cli::Command::List(cmd) => cmd.execute(&global),
        cli::Command::Create(cmd) => cmd.execute(&global),
        cli::Command::Get(cmd) => cmd.execute(&global),
        cli::Command::Update(cmd) => cmd.execute(&global),
        cli::Command::Delete(cmd) => cmd.execute(&global),
        cli::Command::Room(cmd) => cmd.execute(&global),
        cli::Command::Audit(cmd) => cmd.execute(&global),
        cli::Command::Status(cmd) => cmd.execute(&global),
        cli::Command::Health(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
