#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # booking
//!
//! A library for room reservations with conflict detection and a
//! soft-delete lifecycle.
//!
//! Reservations hold a room for an inclusive date range. Two active
//! reservations for the same room never overlap. Deleting a reservation
//! marks it deleted; it can be restored later or removed for good.
//!
//! ## Core Types
//!
//! - [`Reservation`], [`ReservationId`] and [`Room`]: the booking model
//! - [`DateRange`]: inclusive date ranges and overlap math
//! - [`ReservationStore`] and [`RoomDirectory`]: storage seams, implemented
//!   by [`Database`] and [`MemoryStore`]
//! - [`operations`]: plan-execute operations and the update state machine
//! - [`Error`], [`ErrorKind`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use booking::DateRange;
//! use chrono::NaiveDate;
//!
//! let held = DateRange::between(
//!     NaiveDate::from_ymd_opt(2023, 1, 3).unwrap(),
//!     NaiveDate::from_ymd_opt(2023, 1, 5).unwrap(),
//! );
//! let asked = DateRange::between(
//!     NaiveDate::from_ymd_opt(2023, 1, 5).unwrap(),
//!     NaiveDate::from_ymd_opt(2023, 1, 7).unwrap(),
//! );
//!
//! // Boundaries are inclusive
//! assert!(held.overlaps(&asked));
//! ```

pub mod audit;
pub mod config;
pub mod database;
pub mod date_range;
pub mod error;
pub mod logging;
pub mod operations;
pub mod request;
pub mod reservation;
pub mod room;
pub mod store;
pub mod validation;

// Re-export key types at crate root for convenience
pub use audit::{AuditEvent, AuditOperation};
pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig};
pub use date_range::DateRange;
pub use error::{Error, ErrorKind, Issue, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{BookingService, ExecutionResult, OperationPlan, PlanAction, PlanExecutor};
pub use request::{ActionHint, DeletedAtField, ReservationPayload, UpdateRequest};
pub use reservation::{Reservation, ReservationId, ReservationStatus};
pub use room::{Room, RoomId};
pub use store::{
    BookingStore, Change, MemoryStore, ReservationFilter, ReservationStore, RoomDirectory,
};
pub use validation::ReservationValidator;
