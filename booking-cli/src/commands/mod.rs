//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `list`: List reservations
//! - `create`: Create a reservation
//! - `get`: Show one reservation
//! - `update`: Replace or restore a reservation
//! - `delete`: Soft or hard delete a reservation
//! - `room`: Register, remove and list rooms
//! - `audit`: Show recorded audit events
//! - `status`: Show authors and API version
//! - `health`: Check liveness and readiness

pub mod audit;
pub mod create;
pub mod delete;
pub mod get;
pub mod health;
pub mod list;
pub mod room;
pub mod status;
pub mod update;

pub use audit::AuditCommand;
pub use create::CreateCommand;
pub use delete::DeleteCommand;
pub use get::GetCommand;
pub use health::HealthCommand;
pub use list::ListCommand;
pub use room::RoomCommand;
pub use status::StatusCommand;
pub use update::UpdateCommand;
