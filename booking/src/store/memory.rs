//! In-process store backed by ordered maps.

use std::collections::BTreeMap;

use log::debug;

use crate::audit::AuditEvent;
use crate::error::{Error, Result};
use crate::operations::transition::NOT_DELETED_MESSAGE;
use crate::reservation::{Reservation, ReservationId};
use crate::room::{Room, RoomId};
use crate::store::{Change, ReservationFilter, ReservationStore, RoomDirectory};
use crate::validation::{first_overlap, OVERLAP_MESSAGE};

/// A store that keeps everything in memory.
///
/// Enforces the same id-uniqueness and overlap invariants as the `SQLite`
/// backend, so operations behave identically against either.
///
/// # Examples
///
/// ```
/// use booking::{MemoryStore, Room, RoomDirectory};
///
/// let mut store = MemoryStore::new();
/// let room = Room::new("Library").unwrap();
/// let room_id = room.id;
/// store.add_room(room);
///
/// assert!(store.room_exists(room_id).unwrap());
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    reservations: BTreeMap<ReservationId, Reservation>,
    rooms: BTreeMap<RoomId, Room>,
    audit: Vec<AuditEvent>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or replaces a room.
    pub fn add_room(&mut self, room: Room) {
        self.rooms.insert(room.id, room);
    }

    /// Returns all rooms ordered by id.
    #[must_use]
    pub fn rooms(&self) -> Vec<&Room> {
        self.rooms.values().collect()
    }

    /// Returns recorded audit events, oldest first.
    #[must_use]
    pub fn audit_events(&self) -> &[AuditEvent] {
        &self.audit
    }

    /// Returns the number of stored reservations, including soft-deleted ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reservations.len()
    }

    /// Returns `true` if no reservations are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reservations.is_empty()
    }

    fn check_overlap(&self, reservation: &Reservation) -> Result<()> {
        if !reservation.is_active() {
            return Ok(());
        }

        match first_overlap(
            self.reservations.values(),
            reservation.room_id(),
            reservation.range(),
            Some(reservation.id()),
        ) {
            Some(existing) => Err(Error::ReservationConflict {
                details: format!("{OVERLAP_MESSAGE} ({})", existing.id()),
            }),
            None => Ok(()),
        }
    }

    fn require(&self, id: ReservationId) -> Result<Reservation> {
        self.reservations
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::NotFound {
                resource: format!("reservation {id}"),
            })
    }

    /// Computes the row a change leaves behind without touching the map.
    fn resolve(&self, change: &Change) -> Result<Option<Reservation>> {
        match change {
            Change::Insert(reservation) => {
                if self.reservations.contains_key(&reservation.id()) {
                    return Err(Error::DuplicateId {
                        id: reservation.id(),
                    });
                }
                Ok(Some(reservation.clone()))
            }
            Change::Replace(replacement) => {
                let mut current = self.require(replacement.id())?;
                current.replace_fields(
                    replacement.from_date(),
                    replacement.to_date(),
                    replacement.room_id(),
                );
                Ok(Some(current))
            }
            Change::SoftDelete { id, at } => {
                let mut current = self.require(*id)?;
                if !current.is_active() {
                    return Err(Error::AlreadyDeleted { id: *id });
                }
                current.mark_deleted(*at);
                Ok(Some(current))
            }
            Change::Restore(id) => {
                let mut current = self.require(*id)?;
                if current.is_active() {
                    return Err(Error::BadRequest {
                        message: NOT_DELETED_MESSAGE.into(),
                    });
                }
                current.restore();
                Ok(Some(current))
            }
            Change::Remove(id) => {
                self.require(*id)?;
                Ok(None)
            }
        }
    }
}

impl ReservationStore for MemoryStore {
    fn find_by_id(&self, id: ReservationId) -> Result<Option<Reservation>> {
        Ok(self.reservations.get(&id).cloned())
    }

    fn add(&mut self, reservation: &Reservation) -> Result<()> {
        if self.reservations.contains_key(&reservation.id()) {
            return Err(Error::DuplicateId {
                id: reservation.id(),
            });
        }
        self.check_overlap(reservation)?;

        debug!("memory store: inserting reservation {}", reservation.id());
        self.reservations
            .insert(reservation.id(), reservation.clone());
        Ok(())
    }

    fn list_filtered(&self, filter: &ReservationFilter) -> Result<Vec<Reservation>> {
        let mut results: Vec<Reservation> = self
            .reservations
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        results.sort_by(|a, b| {
            a.from_date()
                .cmp(&b.from_date())
                .then_with(|| a.id().cmp(&b.id()))
        });
        Ok(results)
    }

    fn save(&mut self, reservation: &Reservation) -> Result<()> {
        if !self.reservations.contains_key(&reservation.id()) {
            return Err(Error::NotFound {
                resource: format!("reservation {}", reservation.id()),
            });
        }
        self.check_overlap(reservation)?;

        self.reservations
            .insert(reservation.id(), reservation.clone());
        Ok(())
    }

    fn remove(&mut self, id: ReservationId) -> Result<bool> {
        Ok(self.reservations.remove(&id).is_some())
    }

    fn apply(&mut self, change: &Change, event: &AuditEvent) -> Result<Option<Reservation>> {
        let stored = self.resolve(change)?;
        match &stored {
            Some(reservation) => {
                self.check_overlap(reservation)?;
                self.reservations
                    .insert(reservation.id(), reservation.clone());
            }
            None => {
                self.reservations.remove(&change.id());
            }
        }

        debug!("memory store: applied {change:?}");
        self.audit.push(event.clone());
        Ok(stored)
    }
}

impl RoomDirectory for MemoryStore {
    fn room_exists(&self, room_id: RoomId) -> Result<bool> {
        Ok(self.rooms.get(&room_id).is_some_and(Room::exists))
    }
}
