//! Database layer for persistent storage of reservations.
//!
//! This module provides a SQLite-based backend implementing the
//! [`ReservationStore`](crate::ReservationStore) and
//! [`RoomDirectory`](crate::RoomDirectory) traits, including connection
//! management, the audit log and schema versioning.
//!
//! # Examples
//!
//! ```no_run
//! use booking::database::{Database, DatabaseConfig};
//! use booking::{Reservation, ReservationFilter, ReservationStore, Room};
//! use chrono::NaiveDate;
//!
//! let config = DatabaseConfig::new("/tmp/booking.db");
//! let mut db = Database::open(config).unwrap();
//!
//! let room = Room::new("Meeting Room").unwrap();
//! db.upsert_room(&room).unwrap();
//!
//! let reservation = Reservation::builder(room.id)
//!     .from_date(NaiveDate::from_ymd_opt(2023, 1, 3))
//!     .to_date(NaiveDate::from_ymd_opt(2023, 1, 5))
//!     .build()
//!     .unwrap();
//! db.add(&reservation).unwrap();
//!
//! for reservation in db.list_filtered(&ReservationFilter::new()).unwrap() {
//!     println!("{:?}", reservation);
//! }
//! ```

mod audit;
mod config;
mod connection;
pub mod migrations;
mod reservations;
mod rooms;
mod schema;

#[cfg(test)]
pub(crate) mod test_util;

pub use config::{
    default_data_dir, resolve_data_dir, DatabaseConfig, DATABASE_FILE_NAME,
};
pub use connection::Database;

pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
