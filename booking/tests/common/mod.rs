//! Common test utilities for integration tests.
//!
//! This module provides helper functions and fixture builders for testing
//! the booking library.

pub mod database;

use chrono::NaiveDate;

use booking::{DeletedAtField, ReservationPayload, RoomId};

/// Returns a date in January 2023.
///
/// # Panics
///
/// Panics if `day` is not a valid January day.
#[allow(dead_code)]
pub fn jan(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, day).expect("valid January date")
}

/// Builder for request bodies with sensible defaults.
///
/// # Examples
///
/// ```no_run
/// # use common::PayloadFixture;
/// let body = PayloadFixture::new(room).dates(3, 5).build();
/// ```
#[allow(dead_code)]
pub struct PayloadFixture {
    room_id: Option<String>,
    id: Option<String>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    deleted_at: DeletedAtField,
}

#[allow(dead_code)]
impl PayloadFixture {
    /// Creates a fixture for `room` spanning January 3rd to 5th.
    pub fn new(room: RoomId) -> Self {
        Self {
            room_id: Some(room.to_string()),
            id: None,
            from: Some(jan(3)),
            to: Some(jan(5)),
            deleted_at: DeletedAtField::Absent,
        }
    }

    /// Sets both dates as January days.
    pub fn dates(mut self, from: u32, to: u32) -> Self {
        self.from = Some(jan(from));
        self.to = Some(jan(to));
        self
    }

    /// Sets the body id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the raw room id.
    pub fn with_room(mut self, room_id: Option<String>) -> Self {
        self.room_id = room_id;
        self
    }

    /// Sets the delete marker.
    pub fn with_deleted_at(mut self, marker: DeletedAtField) -> Self {
        self.deleted_at = marker;
        self
    }

    /// Builds the payload.
    pub fn build(self) -> ReservationPayload {
        ReservationPayload {
            id: self.id,
            from: self.from,
            to: self.to,
            room_id: self.room_id,
            deleted_at: self.deleted_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_default() {
        let room = RoomId::new_v4();
        let body = PayloadFixture::new(room).build();
        assert_eq!(body.from, Some(jan(3)));
        assert_eq!(body.to, Some(jan(5)));
        assert_eq!(body.room_id, Some(room.to_string()));
        assert_eq!(body.deleted_at, DeletedAtField::Absent);
    }
}
