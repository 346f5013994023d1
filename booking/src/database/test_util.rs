//! Shared test utilities for database unit tests.

use chrono::NaiveDate;
use tempfile::tempdir;

use crate::database::{Database, DatabaseConfig};
use crate::{Reservation, RoomId};

/// Creates a temporary test database that will be cleaned up automatically.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
/// This is acceptable in test code where we want to fail fast.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let config = DatabaseConfig::new(path);
    let db = Database::open(config).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}

/// Creates an active test reservation in `room` spanning `from..=to`.
///
/// # Panics
///
/// Panics if `from` is after `to`.
#[must_use]
pub fn create_test_reservation(room: RoomId, from: NaiveDate, to: NaiveDate) -> Reservation {
    Reservation::builder(room)
        .from_date(Some(from))
        .to_date(Some(to))
        .build()
        .unwrap()
}
