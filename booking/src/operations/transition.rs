//! The update/restore state machine.
//!
//! [`decide`] resolves one update request against the stored reservation
//! into a restore, a create or a replace. Rules are evaluated top to bottom
//! and the first match wins:
//!
//! | stored       | request                          | outcome  |
//! |--------------|----------------------------------|----------|
//! | none         | action restore                   | reject (not found) |
//! | active       | action restore                   | reject   |
//! | active       | `deleted_at: null`, replace      | ignore the null, go on |
//! | soft-deleted | action restore or `deleted_at: null` | restore |
//! | any          | `deleted_at` timestamp           | reject   |
//! | any          | no body                          | reject   |
//! | none         | replace with body                | create   |
//! | present      | replace with body                | replace  |
//!
//! The restore rows ignore the body entirely.

use crate::error::Issue;
use crate::request::{ActionHint, DeletedAtField, UpdateRequest};
use crate::Reservation;

/// Rejection for a restore of a reservation that is not soft-deleted.
pub const NOT_DELETED_MESSAGE: &str = "Reservation is not deleted, cannot restore";

/// Rejection for a write without a body.
pub const BODY_REQUIRED_MESSAGE: &str = "Reservation body is required for replace/create action";

/// Rejection for a client-supplied delete timestamp.
pub const TIMESTAMP_NOT_SETTABLE_MESSAGE: &str =
    "deleted_at cannot be set explicitly, use delete instead";

/// The outcome of the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    /// Clear the delete marker of the stored reservation.
    Restore,
    /// Create a new reservation at the requested id.
    Create,
    /// Overwrite dates and room of the stored reservation.
    Replace,
}

/// Decides what an update request does.
///
/// # Errors
///
/// Returns a `not_found` issue for a restore of a missing reservation and a
/// `bad_request` issue for every other rejection.
///
/// # Examples
///
/// ```
/// use booking::operations::{decide, Decision};
/// use booking::{ActionHint, Reservation, RoomId, UpdateRequest};
/// use chrono::Utc;
///
/// let mut stored = Reservation::builder(RoomId::new_v4()).build().unwrap();
/// let restore = UpdateRequest::new(ActionHint::Restore, None);
///
/// // Active reservations cannot be restored
/// assert!(decide(Some(&stored), &restore).is_err());
///
/// stored.mark_deleted(Utc::now());
/// assert_eq!(decide(Some(&stored), &restore), Ok(Decision::Restore));
/// ```
pub fn decide(existing: Option<&Reservation>, request: &UpdateRequest) -> Result<Decision, Issue> {
    let marker = request.deleted_at();
    let restore_hint = request.action == ActionHint::Restore;
    let soft_deleted = existing.is_some_and(|r| !r.is_active());

    if restore_hint && existing.is_none() {
        return Err(Issue::not_found(NOT_DELETED_MESSAGE));
    }

    if restore_hint && !soft_deleted {
        return Err(Issue::bad_request(NOT_DELETED_MESSAGE));
    }

    if soft_deleted && (restore_hint || marker.is_null()) {
        return Ok(Decision::Restore);
    }

    if let DeletedAtField::Timestamp(_) = marker {
        return Err(Issue::bad_request(TIMESTAMP_NOT_SETTABLE_MESSAGE));
    }

    if request.body.is_none() {
        return Err(Issue::bad_request(BODY_REQUIRED_MESSAGE));
    }

    Ok(match existing {
        None => Decision::Create,
        Some(_) => Decision::Replace,
    })
}

/// Returns `true` when a `deleted_at: null` signal is sent to an active
/// reservation and will be ignored.
#[must_use]
pub fn ignores_restore_signal(existing: Option<&Reservation>, request: &UpdateRequest) -> bool {
    request.action == ActionHint::Replace
        && request.deleted_at().is_null()
        && existing.is_some_and(Reservation::is_active)
}
