//! Reservation types for tracking room bookings.
//!
//! This module provides the reservation entity, its identifier, the derived
//! active/deleted status, and a builder for construction.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::date_range::{is_valid_range, DateRange};
use crate::room::RoomId;

/// A unique identifier for a reservation.
///
/// Reservation ids are UUIDs. Once used, an id is never reassigned to a
/// different reservation.
///
/// # Examples
///
/// ```
/// use booking::ReservationId;
///
/// let id: ReservationId = "3f2c5a1e-8d4b-4c7a-9e6f-1a2b3c4d5e6f".parse().unwrap();
/// assert_eq!(id.to_string(), "3f2c5a1e-8d4b-4c7a-9e6f-1a2b3c4d5e6f");
///
/// assert!("not-a-uuid".parse::<ReservationId>().is_err());
/// assert!("".parse::<ReservationId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(Uuid);

impl ReservationId {
    /// Generates a fresh random (v4) id.
    #[must_use]
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for ReservationId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for ReservationId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_uuid("id", s).map(Self)
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Parses a non-empty UUID string, naming `field` on failure.
pub(crate) fn parse_uuid(field: &str, value: &str) -> Result<Uuid, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError {
            field: field.into(),
            message: format!("{field} must not be empty"),
        });
    }

    Uuid::parse_str(trimmed).map_err(|_| ValidationError {
        field: field.into(),
        message: format!("'{trimmed}' is not a valid UUID"),
    })
}

/// Whether a reservation is active or soft-deleted.
///
/// Derived from `deleted_at`; never stored on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    /// The reservation holds its room.
    Active,
    /// The reservation was soft-deleted and can be restored.
    Deleted,
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Deleted => write!(f, "deleted"),
        }
    }
}

/// A room reservation.
///
/// # Examples
///
/// ```
/// use booking::{Reservation, ReservationStatus, RoomId};
/// use chrono::NaiveDate;
///
/// let room = RoomId::new_v4();
/// let reservation = Reservation::builder(room)
///     .from_date(NaiveDate::from_ymd_opt(2023, 1, 3))
///     .to_date(NaiveDate::from_ymd_opt(2023, 1, 5))
///     .build()
///     .unwrap();
///
/// assert_eq!(reservation.room_id(), room);
/// assert_eq!(reservation.status(), ReservationStatus::Active);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    id: ReservationId,
    #[serde(rename = "from")]
    from_date: Option<NaiveDate>,
    #[serde(rename = "to")]
    to_date: Option<NaiveDate>,
    room_id: RoomId,
    deleted_at: Option<DateTime<Utc>>,
}

impl Reservation {
    /// Creates a new reservation builder for the given room.
    ///
    /// The id defaults to a fresh v4 UUID.
    #[must_use]
    pub fn builder(room_id: RoomId) -> ReservationBuilder {
        ReservationBuilder {
            id: None,
            from_date: None,
            to_date: None,
            room_id,
            deleted_at: None,
        }
    }

    /// Returns the reservation id.
    #[must_use]
    pub const fn id(&self) -> ReservationId {
        self.id
    }

    /// Returns the first reserved day.
    #[must_use]
    pub const fn from_date(&self) -> Option<NaiveDate> {
        self.from_date
    }

    /// Returns the last reserved day.
    #[must_use]
    pub const fn to_date(&self) -> Option<NaiveDate> {
        self.to_date
    }

    /// Returns the reserved room.
    #[must_use]
    pub const fn room_id(&self) -> RoomId {
        self.room_id
    }

    /// Returns the soft-delete timestamp, if any.
    #[must_use]
    pub const fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    /// Returns the reserved days as a range.
    #[must_use]
    pub const fn range(&self) -> DateRange {
        DateRange::new(self.from_date, self.to_date)
    }

    /// Returns the status derived from `deleted_at`.
    #[must_use]
    pub const fn status(&self) -> ReservationStatus {
        if self.deleted_at.is_some() {
            ReservationStatus::Deleted
        } else {
            ReservationStatus::Active
        }
    }

    /// Returns `true` if the reservation is not soft-deleted.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }

    /// Marks the reservation as soft-deleted at `at`.
    pub fn mark_deleted(&mut self, at: DateTime<Utc>) {
        self.deleted_at = Some(at);
    }

    /// Clears the soft-delete marker.
    pub fn restore(&mut self) {
        self.deleted_at = None;
    }

    /// Overwrites dates and room, leaving id and delete marker untouched.
    pub fn replace_fields(
        &mut self,
        from_date: Option<NaiveDate>,
        to_date: Option<NaiveDate>,
        room_id: RoomId,
    ) {
        self.from_date = from_date;
        self.to_date = to_date;
        self.room_id = room_id;
    }
}

/// Builder for creating `Reservation` instances.
#[derive(Debug)]
pub struct ReservationBuilder {
    id: Option<ReservationId>,
    from_date: Option<NaiveDate>,
    to_date: Option<NaiveDate>,
    room_id: RoomId,
    deleted_at: Option<DateTime<Utc>>,
}

impl ReservationBuilder {
    /// Sets an explicit id.
    #[must_use]
    pub const fn id(mut self, id: ReservationId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the first reserved day.
    #[must_use]
    pub const fn from_date(mut self, from_date: Option<NaiveDate>) -> Self {
        self.from_date = from_date;
        self
    }

    /// Sets the last reserved day.
    #[must_use]
    pub const fn to_date(mut self, to_date: Option<NaiveDate>) -> Self {
        self.to_date = to_date;
        self
    }

    /// Sets the soft-delete timestamp.
    #[must_use]
    pub const fn deleted_at(mut self, deleted_at: Option<DateTime<Utc>>) -> Self {
        self.deleted_at = deleted_at;
        self
    }

    /// Builds the reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if both dates are set and `from` is after `to`.
    ///
    /// # Examples
    ///
    /// ```
    /// use booking::{Reservation, RoomId};
    /// use chrono::NaiveDate;
    ///
    /// let d = |day| NaiveDate::from_ymd_opt(2023, 1, day);
    ///
    /// let ok = Reservation::builder(RoomId::new_v4())
    ///     .from_date(d(1))
    ///     .to_date(d(2))
    ///     .build();
    /// assert!(ok.is_ok());
    ///
    /// let reversed = Reservation::builder(RoomId::new_v4())
    ///     .from_date(d(2))
    ///     .to_date(d(1))
    ///     .build();
    /// assert!(reversed.is_err());
    /// ```
    pub fn build(self) -> Result<Reservation, ValidationError> {
        if !is_valid_range(self.from_date, self.to_date) {
            return Err(ValidationError {
                field: "from".into(),
                message: "from date must not be after to date".into(),
            });
        }

        Ok(Reservation {
            id: self.id.unwrap_or_else(ReservationId::new_v4),
            from_date: self.from_date,
            to_date: self.to_date,
            room_id: self.room_id,
            deleted_at: self.deleted_at,
        })
    }
}

/// Error type for validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}


#[cfg(test)]
mod proptests;
