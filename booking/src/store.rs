//! Persistence boundary for reservations, rooms and audit events.
//!
//! The operations layer only talks to these traits. Two backends implement
//! them: the `SQLite`-backed [`Database`](crate::Database) and the in-process
//! [`MemoryStore`].
//!
//! Both backends enforce the two storage invariants themselves: an id is
//! never inserted twice, and an active reservation never overlaps another
//! active reservation in the same room.
//!
//! Mutations coming from operations go through [`ReservationStore::apply`],
//! which persists the change and its audit event as one unit.

pub mod memory;

use chrono::{DateTime, NaiveDate, Utc};

use crate::audit::AuditEvent;
use crate::error::Result;
use crate::reservation::{Reservation, ReservationId};
use crate::room::RoomId;

pub use memory::MemoryStore;

/// Filter for listing reservations.
///
/// # Examples
///
/// ```
/// use booking::ReservationFilter;
/// use chrono::NaiveDate;
///
/// let filter = ReservationFilter::new()
///     .with_include_deleted(true)
///     .with_before(NaiveDate::from_ymd_opt(2023, 2, 1));
/// assert!(filter.include_deleted);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationFilter {
    /// Include soft-deleted reservations.
    pub include_deleted: bool,
    /// Restrict to one room.
    pub room_id: Option<RoomId>,
    /// Keep reservations starting strictly before this day.
    pub before: Option<NaiveDate>,
    /// Keep reservations ending strictly after this day.
    pub after: Option<NaiveDate>,
}

impl ReservationFilter {
    /// Creates a filter matching every active reservation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether soft-deleted reservations are included.
    #[must_use]
    pub const fn with_include_deleted(mut self, include_deleted: bool) -> Self {
        self.include_deleted = include_deleted;
        self
    }

    /// Restricts the listing to one room.
    #[must_use]
    pub const fn with_room(mut self, room_id: Option<RoomId>) -> Self {
        self.room_id = room_id;
        self
    }

    /// Sets the exclusive upper bound on `from`.
    #[must_use]
    pub const fn with_before(mut self, before: Option<NaiveDate>) -> Self {
        self.before = before;
        self
    }

    /// Sets the exclusive lower bound on `to`.
    #[must_use]
    pub const fn with_after(mut self, after: Option<NaiveDate>) -> Self {
        self.after = after;
        self
    }

    /// Returns `true` if the reservation passes this filter.
    ///
    /// A date bound excludes reservations missing the compared date.
    #[must_use]
    pub fn matches(&self, reservation: &Reservation) -> bool {
        if !self.include_deleted && !reservation.is_active() {
            return false;
        }

        if let Some(room_id) = self.room_id {
            if reservation.room_id() != room_id {
                return false;
            }
        }

        if let Some(before) = self.before {
            if !reservation.from_date().is_some_and(|from| from < before) {
                return false;
            }
        }

        if let Some(after) = self.after {
            if !reservation.to_date().is_some_and(|to| to > after) {
                return false;
            }
        }

        true
    }
}

/// One reservation write, applied together with its audit event.
///
/// Soft delete and restore only touch the delete marker, so a concurrent
/// replace of dates or room is never reverted by them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// Insert a new reservation.
    Insert(Reservation),
    /// Overwrite dates and room, keeping the stored delete marker.
    Replace(Reservation),
    /// Mark an active reservation deleted.
    SoftDelete {
        /// The reservation.
        id: ReservationId,
        /// The delete timestamp.
        at: DateTime<Utc>,
    },
    /// Clear the delete marker of a soft-deleted reservation.
    Restore(ReservationId),
    /// Remove the row.
    Remove(ReservationId),
}

impl Change {
    /// Returns the id of the reservation this change touches.
    #[must_use]
    pub const fn id(&self) -> ReservationId {
        match self {
            Self::Insert(r) | Self::Replace(r) => r.id(),
            Self::SoftDelete { id, .. } | Self::Restore(id) | Self::Remove(id) => *id,
        }
    }
}

/// Reservation persistence.
#[cfg_attr(test, mockall::automock)]
pub trait ReservationStore {
    /// Looks up a reservation by id, active or soft-deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn find_by_id(&self, id: ReservationId) -> Result<Option<Reservation>>;

    /// Inserts a new reservation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateId`](crate::Error::DuplicateId) if the id is
    /// taken, [`Error::ReservationConflict`](crate::Error::ReservationConflict)
    /// if an active reservation overlaps, or a storage error.
    fn add(&mut self, reservation: &Reservation) -> Result<()>;

    /// Lists reservations passing `filter`, ordered by `from` then id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list_filtered(&self, filter: &ReservationFilter) -> Result<Vec<Reservation>>;

    /// Persists changes to an existing reservation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`](crate::Error::NotFound) if no row has this
    /// id, [`Error::ReservationConflict`](crate::Error::ReservationConflict)
    /// if the saved state would overlap, or a storage error.
    fn save(&mut self, reservation: &Reservation) -> Result<()>;

    /// Permanently removes a reservation. Returns `false` if nothing was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn remove(&mut self, id: ReservationId) -> Result<bool>;

    /// Applies `change` and records `event` as one unit of work.
    ///
    /// Invariants are checked against the state current at write time.
    /// On error neither the change nor the event is persisted. Returns the
    /// stored reservation after the change, or `None` once removed.
    ///
    /// # Errors
    ///
    /// - [`Error::DuplicateId`](crate::Error::DuplicateId) when inserting a
    ///   used id
    /// - [`Error::ReservationConflict`](crate::Error::ReservationConflict)
    ///   when the resulting active reservation would overlap another
    /// - [`Error::NotFound`](crate::Error::NotFound) when the reservation is
    ///   gone
    /// - [`Error::AlreadyDeleted`](crate::Error::AlreadyDeleted) when soft
    ///   deleting a soft-deleted reservation
    /// - [`Error::BadRequest`](crate::Error::BadRequest) when restoring an
    ///   active reservation
    /// - a storage error
    fn apply(&mut self, change: &Change, event: &AuditEvent) -> Result<Option<Reservation>>;

    /// Verifies the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached.
    fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

/// Room existence oracle.
#[cfg_attr(test, mockall::automock)]
pub trait RoomDirectory {
    /// Returns `true` if the room currently exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the inventory cannot be queried.
    fn room_exists(&self, room_id: RoomId) -> Result<bool>;
}

/// A backend implementing every persistence trait.
pub trait BookingStore: ReservationStore + RoomDirectory {}

impl<T: ReservationStore + RoomDirectory> BookingStore for T {}
