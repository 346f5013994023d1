//! Read-only reservation queries.

use crate::error::{Error, Result};
use crate::store::{ReservationFilter, ReservationStore};
use crate::{Reservation, ReservationId};

use super::executor::translate_storage_error;

/// Fetches one reservation, active or soft-deleted.
///
/// # Errors
///
/// Returns [`Error::NotFound`] for an unknown id, or an `internal` or
/// `unavailable` error when the store fails.
///
/// # Examples
///
/// ```
/// use booking::operations::get_reservation;
/// use booking::{ErrorKind, MemoryStore, ReservationId};
///
/// let store = MemoryStore::new();
/// let err = get_reservation(&store, ReservationId::new_v4()).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::NotFound);
/// ```
pub fn get_reservation<S>(store: &S, id: ReservationId) -> Result<Reservation>
where
    S: ReservationStore + ?Sized,
{
    store
        .find_by_id(id)
        .map_err(|e| translate_storage_error(e, "get", Some(id)))?
        .ok_or_else(|| Error::NotFound {
            resource: format!("reservation {id}"),
        })
}

/// Lists reservations matching `filter`, ordered by start date then id.
///
/// # Errors
///
/// Returns an `internal` or `unavailable` error when the store fails.
pub fn list_reservations<S>(store: &S, filter: &ReservationFilter) -> Result<Vec<Reservation>>
where
    S: ReservationStore + ?Sized,
{
    store
        .list_filtered(filter)
        .map_err(|e| translate_storage_error(e, "list", None))
}
