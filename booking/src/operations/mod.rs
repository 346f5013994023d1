//! Reservation operations using the plan-execute pattern.
//!
//! This module provides a plan-execute pattern for reservation operations,
//! separating planning from execution to enable dry-run mode, better testing,
//! and clear error messages.
//!
//! # Architecture
//!
//! Operations are split into two phases:
//! 1. **Planning**: Loads fresh state, runs the state machine and the
//!    validator, and builds a plan. Planning never writes.
//! 2. **Execution**: Applies the plan to the store and records audit events.
//!
//! [`BookingService`] wraps both phases for callers that want one call per
//! operation.
//!
//! # Examples
//!
//! ```no_run
//! use booking::operations::{CreateOptions, CreatePlan, PlanExecutor};
//! use booking::{Database, DatabaseConfig, ReservationPayload};
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/booking.db")).unwrap();
//! let payload = ReservationPayload::from_json(
//!     r#"{"from": "2023-01-03", "to": "2023-01-05", "room_id": "6f1c2a7e-4d1b-4a51-9d51-2f0c0b6c1a11"}"#,
//! )
//! .unwrap();
//!
//! // Generate plan
//! let plan = CreatePlan::new(CreateOptions::new(payload)).build_plan(&db).unwrap();
//!
//! // Execute plan
//! let result = PlanExecutor::new(&mut db).execute(&plan).unwrap();
//! ```

pub mod create;
pub mod delete;
pub mod executor;
pub mod plan;
pub mod query;
pub mod service;
pub mod transition;
pub mod update;

#[cfg(test)]
mod proptests;

pub use create::{CreateOptions, CreatePlan};
pub use delete::{DeleteOptions, DeletePlan};
pub use executor::{translate_storage_error, ExecutionResult, PlanExecutor};
pub use plan::{OperationPlan, PlanAction};
pub use query::{get_reservation, list_reservations};
pub use service::{BookingService, HealthReport, ServiceStatus, API_VERSION};
pub use transition::{decide, Decision};
pub use update::{UpdateOptions, UpdatePlan};
