//! Reservation validation and conflict detection.
//!
//! [`ReservationValidator`] runs every check in a fixed order and collects
//! all issues rather than stopping at the first one:
//!
//! 1. identity well-formedness (only when the caller asks for it)
//! 2. date range validity
//! 3. room presence and existence
//! 4. overlap with active reservations in the same room
//!
//! The overlap check only runs when the room exists and both dates are set.

use chrono::NaiveDate;
use log::debug;

use crate::date_range::{is_valid_range, DateRange};
use crate::error::{Error, Issue, Result};
use crate::request::ReservationPayload;
use crate::reservation::{Reservation, ReservationId};
use crate::room::RoomId;
use crate::store::{ReservationFilter, ReservationStore, RoomDirectory};

/// Message reported when a candidate overlaps an active reservation.
pub const OVERLAP_MESSAGE: &str =
    "Reservation overlaps with an existing reservation in the same room";

/// Returns the first active reservation in `room_id` overlapping `range`,
/// skipping `exclude`.
///
/// Incomplete ranges never overlap.
pub fn first_overlap<'a, I>(
    reservations: I,
    room_id: RoomId,
    range: DateRange,
    exclude: Option<ReservationId>,
) -> Option<&'a Reservation>
where
    I: IntoIterator<Item = &'a Reservation>,
{
    reservations.into_iter().find(|existing| {
        existing.is_active()
            && existing.room_id() == room_id
            && Some(existing.id()) != exclude
            && existing.range().overlaps(&range)
    })
}

/// Looks up an active reservation blocking `room_id` over `range`.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn find_conflict<S>(
    store: &S,
    room_id: RoomId,
    range: DateRange,
    exclude: Option<ReservationId>,
) -> Result<Option<Reservation>>
where
    S: ReservationStore + ?Sized,
{
    let Some((from, to)) = range.bounds() else {
        return Ok(None);
    };

    // Narrow the scan to rows that can possibly overlap
    let filter = ReservationFilter::new()
        .with_room(Some(room_id))
        .with_before(to.succ_opt())
        .with_after(from.pred_opt());
    let candidates = store.list_filtered(&filter)?;

    Ok(first_overlap(&candidates, room_id, range, exclude).cloned())
}

/// Fails with [`Error::DuplicateId`] if any stored reservation, active or
/// soft-deleted, already uses `id`.
///
/// # Errors
///
/// Returns `DuplicateId` on reuse, or a storage error.
pub fn ensure_unique_id<S>(store: &S, id: ReservationId) -> Result<()>
where
    S: ReservationStore + ?Sized,
{
    if store.find_by_id(id)?.is_some() {
        return Err(Error::DuplicateId { id });
    }
    Ok(())
}

/// A candidate that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCandidate {
    /// The parsed id, when one was supplied and checked.
    pub id: Option<ReservationId>,
    /// First reserved day.
    pub from_date: Option<NaiveDate>,
    /// Last reserved day.
    pub to_date: Option<NaiveDate>,
    /// The existing room.
    pub room_id: RoomId,
}

/// The outcome of one validation pass.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    issues: Vec<Issue>,
    id: Option<ReservationId>,
    from_date: Option<NaiveDate>,
    to_date: Option<NaiveDate>,
    room_id: Option<RoomId>,
}

impl ValidationReport {
    /// Returns `true` if no issues were found.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Returns the issues in check order.
    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Converts the report into the validated candidate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] carrying every issue if any were found.
    pub fn into_result(self) -> Result<ValidatedCandidate> {
        match (self.issues.is_empty(), self.room_id) {
            (true, Some(room_id)) => Ok(ValidatedCandidate {
                id: self.id,
                from_date: self.from_date,
                to_date: self.to_date,
                room_id,
            }),
            _ => Err(Error::Invalid {
                issues: self.issues,
            }),
        }
    }
}

/// Validates reservation candidates against a store and a room oracle.
///
/// # Examples
///
/// ```
/// use booking::{MemoryStore, ReservationPayload, ReservationValidator, Room};
/// use chrono::NaiveDate;
///
/// let mut store = MemoryStore::new();
/// let room = Room::new("Studio").unwrap();
/// let room_id = room.id;
/// store.add_room(room);
///
/// let payload = ReservationPayload {
///     from: NaiveDate::from_ymd_opt(2023, 1, 5),
///     to: NaiveDate::from_ymd_opt(2023, 1, 3),
///     room_id: Some(room_id.to_string()),
///     ..ReservationPayload::default()
/// };
///
/// let report = ReservationValidator::new(&store, &store).validate(&payload).unwrap();
/// assert_eq!(report.issues().len(), 1);
/// ```
pub struct ReservationValidator<'a, S: ?Sized, R: ?Sized> {
    reservations: &'a S,
    rooms: &'a R,
    check_identity: bool,
    exclude: Option<ReservationId>,
}

impl<'a, S, R> ReservationValidator<'a, S, R>
where
    S: ReservationStore + ?Sized,
    R: RoomDirectory + ?Sized,
{
    /// Creates a validator over a reservation store and a room oracle.
    #[must_use]
    pub const fn new(reservations: &'a S, rooms: &'a R) -> Self {
        Self {
            reservations,
            rooms,
            check_identity: false,
            exclude: None,
        }
    }

    /// Enables the identity well-formedness check.
    #[must_use]
    pub const fn with_identity_check(mut self, check_identity: bool) -> Self {
        self.check_identity = check_identity;
        self
    }

    /// Excludes one reservation from the overlap check.
    #[must_use]
    pub const fn excluding(mut self, exclude: Option<ReservationId>) -> Self {
        self.exclude = exclude;
        self
    }

    /// Runs every check against `candidate`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store or the oracle fails; validation
    /// findings are reported in the returned [`ValidationReport`].
    pub fn validate(&self, candidate: &ReservationPayload) -> Result<ValidationReport> {
        let mut report = ValidationReport {
            from_date: candidate.from,
            to_date: candidate.to,
            ..ValidationReport::default()
        };

        // 1. Identity
        if self.check_identity {
            if let Some(raw) = candidate.supplied_id() {
                match raw.parse::<ReservationId>() {
                    Ok(id) => report.id = Some(id),
                    Err(e) => report
                        .issues
                        .push(Issue::bad_request(format!("invalid reservation id: {}", e.message))),
                }
            }
        }

        // 2. Range
        if !is_valid_range(candidate.from, candidate.to) {
            if let (Some(from), Some(to)) = (candidate.from, candidate.to) {
                report.issues.push(Issue::bad_request(format!(
                    "from date {from} is after to date {to}"
                )));
            }
        }

        // 3. Room
        let mut room_exists = false;
        match candidate.room_id.as_deref().map(str::trim) {
            None | Some("") => {
                report.issues.push(Issue::bad_request("room_id is required"));
            }
            Some(raw) => match raw.parse::<RoomId>() {
                Err(e) => report
                    .issues
                    .push(Issue::bad_request(format!("invalid room id: {}", e.message))),
                Ok(room_id) => {
                    room_exists = self.rooms.room_exists(room_id)?;
                    if room_exists {
                        report.room_id = Some(room_id);
                    } else {
                        report
                            .issues
                            .push(Issue::bad_request(format!("Room {room_id} does not exist")));
                    }
                }
            },
        }

        // 4. Conflict
        if let (true, Some(room_id)) = (room_exists, report.room_id) {
            let range = DateRange::new(candidate.from, candidate.to);
            if range.is_complete() {
                if let Some(existing) =
                    find_conflict(self.reservations, room_id, range, self.exclude)?
                {
                    debug!(
                        "candidate {range} in room {room_id} overlaps reservation {}",
                        existing.id()
                    );
                    report.issues.push(Issue::conflict(OVERLAP_MESSAGE));
                }
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::store::{MemoryStore, MockReservationStore, MockRoomDirectory};
    use crate::Room;
    use chrono::Utc;

    fn d(day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2023, 1, day)
    }

    fn store_with_room() -> (MemoryStore, RoomId) {
        let mut store = MemoryStore::new();
        let room = Room::new("Board Room").unwrap();
        let id = room.id;
        store.add_room(room);
        (store, id)
    }

    fn payload(room: Option<RoomId>, from: u32, to: u32) -> ReservationPayload {
        ReservationPayload {
            from: d(from),
            to: d(to),
            room_id: room.map(|r| r.to_string()),
            ..ReservationPayload::default()
        }
    }

    fn hold(store: &mut MemoryStore, room: RoomId, from: u32, to: u32) -> Reservation {
        let r = Reservation::builder(room)
            .from_date(d(from))
            .to_date(d(to))
            .build()
            .unwrap();
        store.add(&r).unwrap();
        r
    }

    #[test]
    fn test_valid_candidate() {
        let (store, room) = store_with_room();
        let report = ReservationValidator::new(&store, &store)
            .validate(&payload(Some(room), 3, 5))
            .unwrap();
        assert!(report.is_valid());

        let candidate = report.into_result().unwrap();
        assert_eq!(candidate.room_id, room);
        assert_eq!(candidate.from_date, d(3));
    }

    #[test]
    fn test_overlap_is_conflict() {
        let (mut store, room) = store_with_room();
        hold(&mut store, room, 3, 5);

        let report = ReservationValidator::new(&store, &store)
            .validate(&payload(Some(room), 4, 6))
            .unwrap();
        assert_eq!(report.issues(), &[Issue::conflict(OVERLAP_MESSAGE)]);

        let err = report.into_result().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn test_adjacent_range_is_free() {
        let (mut store, room) = store_with_room();
        hold(&mut store, room, 3, 5);

        let report = ReservationValidator::new(&store, &store)
            .validate(&payload(Some(room), 6, 8))
            .unwrap();
        assert!(report.is_valid());
    }

    #[test]
    fn test_excluded_reservation_does_not_conflict() {
        let (mut store, room) = store_with_room();
        let held = hold(&mut store, room, 3, 5);

        let report = ReservationValidator::new(&store, &store)
            .excluding(Some(held.id()))
            .validate(&payload(Some(room), 4, 6))
            .unwrap();
        assert!(report.is_valid());
    }

    #[test]
    fn test_soft_deleted_reservation_does_not_conflict() {
        let (mut store, room) = store_with_room();
        let mut held = hold(&mut store, room, 3, 5);
        held.mark_deleted(Utc::now());
        store.save(&held).unwrap();

        let report = ReservationValidator::new(&store, &store)
            .validate(&payload(Some(room), 3, 5))
            .unwrap();
        assert!(report.is_valid());
    }

    #[test]
    fn test_issues_accumulate_in_order() {
        let store = MemoryStore::new();
        let mut candidate = payload(None, 9, 2);
        candidate.id = Some("not-a-uuid".to_string());

        let report = ReservationValidator::new(&store, &store)
            .with_identity_check(true)
            .validate(&candidate)
            .unwrap();

        let messages: Vec<_> = report.issues().iter().map(|i| i.message.as_str()).collect();
        assert_eq!(messages.len(), 3);
        assert!(messages[0].starts_with("invalid reservation id"));
        assert_eq!(messages[1], "from date 2023-01-09 is after to date 2023-01-02");
        assert_eq!(messages[2], "room_id is required");
    }

    #[test]
    fn test_identity_not_checked_by_default() {
        let (store, room) = store_with_room();
        let mut candidate = payload(Some(room), 1, 2);
        candidate.id = Some("garbage".to_string());

        let report = ReservationValidator::new(&store, &store)
            .validate(&candidate)
            .unwrap();
        assert!(report.is_valid());
    }

    #[test]
    fn test_unknown_room_names_id_and_skips_conflict() {
        let store = MemoryStore::new();
        let room = RoomId::new_v4();

        let report = ReservationValidator::new(&store, &store)
            .validate(&payload(Some(room), 1, 2))
            .unwrap();
        assert_eq!(report.issues().len(), 1);
        assert!(report.issues()[0].message.contains(&room.to_string()));
        assert_eq!(report.issues()[0].kind, ErrorKind::BadRequest);
    }

    #[test]
    fn test_malformed_room_id() {
        let store = MemoryStore::new();
        let mut candidate = payload(None, 1, 2);
        candidate.room_id = Some("room-7".to_string());

        let report = ReservationValidator::new(&store, &store)
            .validate(&candidate)
            .unwrap();
        assert!(report.issues()[0].message.starts_with("invalid room id"));
    }

    #[test]
    fn test_mixed_issues_report_bad_request() {
        let (mut store, room) = store_with_room();
        hold(&mut store, room, 1, 31);
        let mut candidate = payload(Some(room), 5, 6);
        candidate.id = Some("???".to_string());

        let err = ReservationValidator::new(&store, &store)
            .with_identity_check(true)
            .validate(&candidate)
            .unwrap()
            .into_result()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadRequest);
        assert_eq!(err.issues().len(), 2);
    }

    #[test]
    fn test_oracle_not_consulted_without_room() {
        let mut rooms = MockRoomDirectory::new();
        rooms.expect_room_exists().never();
        let mut reservations = MockReservationStore::new();
        reservations.expect_list_filtered().never();

        let report = ReservationValidator::new(&reservations, &rooms)
            .validate(&payload(None, 1, 2))
            .unwrap();
        assert!(!report.is_valid());
    }

    #[test]
    fn test_conflict_scan_skipped_for_incomplete_range() {
        let room = RoomId::new_v4();
        let mut rooms = MockRoomDirectory::new();
        rooms.expect_room_exists().returning(|_| Ok(true));
        let mut reservations = MockReservationStore::new();
        reservations.expect_list_filtered().never();

        let mut candidate = payload(Some(room), 1, 2);
        candidate.to = None;

        let report = ReservationValidator::new(&reservations, &rooms)
            .validate(&candidate)
            .unwrap();
        assert!(report.is_valid());
    }

    #[test]
    fn test_oracle_failure_propagates() {
        let mut rooms = MockRoomDirectory::new();
        rooms.expect_room_exists().returning(|_| {
            Err(Error::Unavailable {
                operation: "room lookup".into(),
            })
        });
        let reservations = MockReservationStore::new();

        let result = ReservationValidator::new(&reservations, &rooms)
            .validate(&payload(Some(RoomId::new_v4()), 1, 2));
        assert!(matches!(result, Err(Error::Unavailable { .. })));
    }

    #[test]
    fn test_find_conflict_narrows_scan() {
        let room = RoomId::new_v4();
        let mut reservations = MockReservationStore::new();
        reservations
            .expect_list_filtered()
            .withf(move |filter| {
                filter.room_id == Some(room)
                    && filter.before == d(6)
                    && filter.after == d(2)
                    && !filter.include_deleted
            })
            .returning(|_| Ok(Vec::new()));

        let found = find_conflict(&reservations, room, DateRange::new(d(3), d(5)), None).unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn test_ensure_unique_id_sees_soft_deleted() {
        let (mut store, room) = store_with_room();
        let mut held = hold(&mut store, room, 1, 2);
        held.mark_deleted(Utc::now());
        store.save(&held).unwrap();

        let err = ensure_unique_id(&store, held.id()).unwrap_err();
        assert!(matches!(err, Error::DuplicateId { .. }));
        assert!(ensure_unique_id(&store, ReservationId::new_v4()).is_ok());
    }
}
