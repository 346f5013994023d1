//! Create operation planning.
//!
//! A create validates the body (including the id, when one is supplied),
//! rejects a reused id and always starts the reservation active.

use crate::error::{Error, Result};
use crate::request::{DeletedAtField, ReservationPayload};
use crate::store::{ReservationStore, RoomDirectory};
use crate::validation::{ensure_unique_id, ReservationValidator};
use crate::{Reservation, ReservationId};

use super::plan::{OperationPlan, PlanAction};

/// Options for a create operation.
#[derive(Debug, Clone)]
pub struct CreateOptions {
    /// The client body.
    pub payload: ReservationPayload,
}

impl CreateOptions {
    /// Creates options for the given body.
    #[must_use]
    pub const fn new(payload: ReservationPayload) -> Self {
        Self { payload }
    }
}

/// A create plan generator.
pub struct CreatePlan {
    options: CreateOptions,
}

impl CreatePlan {
    /// Creates a new create plan with the given options.
    #[must_use]
    pub const fn new(options: CreateOptions) -> Self {
        Self { options }
    }

    /// Builds an operation plan for this create request.
    ///
    /// Reads the store but never writes to it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] with every validation issue,
    /// [`Error::DuplicateId`] if the supplied id is already in use, or a
    /// storage error.
    ///
    /// # Examples
    ///
    /// ```
    /// use booking::operations::{CreateOptions, CreatePlan};
    /// use booking::{MemoryStore, ReservationPayload, Room};
    /// use chrono::NaiveDate;
    ///
    /// let mut store = MemoryStore::new();
    /// let room = Room::new("Hall").unwrap();
    /// let room_id = room.id;
    /// store.add_room(room);
    ///
    /// let payload = ReservationPayload {
    ///     from: NaiveDate::from_ymd_opt(2023, 1, 3),
    ///     to: NaiveDate::from_ymd_opt(2023, 1, 5),
    ///     room_id: Some(room_id.to_string()),
    ///     ..ReservationPayload::default()
    /// };
    ///
    /// let plan = CreatePlan::new(CreateOptions::new(payload)).build_plan(&store).unwrap();
    /// assert_eq!(plan.len(), 1);
    /// ```
    pub fn build_plan<S>(&self, store: &S) -> Result<OperationPlan>
    where
        S: ReservationStore + RoomDirectory + ?Sized,
    {
        let payload = &self.options.payload;

        // Step 1: Validate the body, identity included
        let candidate = ReservationValidator::new(store, store)
            .with_identity_check(true)
            .validate(payload)?
            .into_result()?;

        // Step 2: Pick the id and make sure it was never used
        let id = match candidate.id {
            Some(id) => {
                ensure_unique_id(store, id)?;
                id
            }
            None => ReservationId::new_v4(),
        };

        // Step 3: Build the reservation, always active
        let reservation = Reservation::builder(candidate.room_id)
            .id(id)
            .from_date(candidate.from_date)
            .to_date(candidate.to_date)
            .build()
            .map_err(Error::from)?;

        let mut plan = OperationPlan::new(format!("Create reservation {id}"))
            .add_action(PlanAction::CreateReservation(reservation));

        if payload.deleted_at != DeletedAtField::Absent {
            plan = plan.add_warning("deleted_at is ignored on create; the reservation starts active");
        }

        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::store::MemoryStore;
    use crate::{Room, RoomId};
    use chrono::{NaiveDate, Utc};

    fn d(day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2023, 1, day)
    }

    fn setup() -> (MemoryStore, RoomId) {
        let mut store = MemoryStore::new();
        let room = Room::new("Gym").unwrap();
        let id = room.id;
        store.add_room(room);
        (store, id)
    }

    fn payload(room: RoomId, from: u32, to: u32) -> ReservationPayload {
        ReservationPayload {
            from: d(from),
            to: d(to),
            room_id: Some(room.to_string()),
            ..ReservationPayload::default()
        }
    }

    fn created(plan: &OperationPlan) -> &Reservation {
        match &plan.actions[0] {
            PlanAction::CreateReservation(r) => r,
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn test_assigns_id_when_absent() {
        let (store, room) = setup();
        let plan = CreatePlan::new(CreateOptions::new(payload(room, 3, 5)))
            .build_plan(&store)
            .unwrap();

        let r = created(&plan);
        assert_eq!(r.room_id(), room);
        assert!(r.is_active());
        assert!(plan.warnings.is_empty());
    }

    #[test]
    fn test_empty_id_means_server_assigns() {
        let (store, room) = setup();
        let mut body = payload(room, 3, 5);
        body.id = Some(String::new());

        let plan = CreatePlan::new(CreateOptions::new(body)).build_plan(&store).unwrap();
        assert_eq!(plan.len(), 1);
    }

    #[test]
    fn test_uses_supplied_id() {
        let (store, room) = setup();
        let id = ReservationId::new_v4();
        let mut body = payload(room, 3, 5);
        body.id = Some(id.to_string());

        let plan = CreatePlan::new(CreateOptions::new(body)).build_plan(&store).unwrap();
        assert_eq!(created(&plan).id(), id);
    }

    #[test]
    fn test_reused_soft_deleted_id_is_conflict() {
        let (mut store, room) = setup();
        let mut existing = Reservation::builder(room)
            .from_date(d(1))
            .to_date(d(1))
            .build()
            .unwrap();
        existing.mark_deleted(Utc::now());
        store.add(&existing).unwrap();

        let mut body = payload(room, 10, 12);
        body.id = Some(existing.id().to_string());

        let err = CreatePlan::new(CreateOptions::new(body))
            .build_plan(&store)
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateId { .. }));
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn test_overlap_is_conflict() {
        let (mut store, room) = setup();
        store
            .add(
                &Reservation::builder(room)
                    .from_date(d(3))
                    .to_date(d(5))
                    .build()
                    .unwrap(),
            )
            .unwrap();

        let err = CreatePlan::new(CreateOptions::new(payload(room, 4, 6)))
            .build_plan(&store)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        CreatePlan::new(CreateOptions::new(payload(room, 6, 8)))
            .build_plan(&store)
            .unwrap();
    }

    #[test]
    fn test_malformed_id_is_bad_request() {
        let (store, room) = setup();
        let mut body = payload(room, 3, 5);
        body.id = Some("abc".to_string());

        let err = CreatePlan::new(CreateOptions::new(body))
            .build_plan(&store)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadRequest);
    }

    #[test]
    fn test_delete_marker_forced_active() {
        let (store, room) = setup();
        let mut body = payload(room, 3, 5);
        body.deleted_at = DeletedAtField::Timestamp(Utc::now());

        let plan = CreatePlan::new(CreateOptions::new(body)).build_plan(&store).unwrap();
        assert!(created(&plan).is_active());
        assert_eq!(plan.warnings.len(), 1);
    }
}
