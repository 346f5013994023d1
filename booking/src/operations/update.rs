//! Update (replace-or-restore) operation planning.
//!
//! The stored reservation is loaded fresh, then [`decide`] picks the
//! outcome. Writes validate the body; restores ignore it.

use log::debug;

use crate::error::{Error, Issue, Result};
use crate::request::{ReservationPayload, UpdateRequest};
use crate::store::{ReservationStore, RoomDirectory};
use crate::validation::{find_conflict, ReservationValidator, OVERLAP_MESSAGE};
use crate::{Reservation, ReservationId};

use super::plan::{OperationPlan, PlanAction};
use super::transition::{decide, ignores_restore_signal, Decision};

/// Options for an update operation.
#[derive(Debug, Clone)]
pub struct UpdateOptions {
    /// The reservation id from the route.
    pub id: ReservationId,
    /// The request.
    pub request: UpdateRequest,
}

impl UpdateOptions {
    /// Creates options for the given id and request.
    #[must_use]
    pub const fn new(id: ReservationId, request: UpdateRequest) -> Self {
        Self { id, request }
    }
}

/// An update plan generator.
pub struct UpdatePlan {
    options: UpdateOptions,
}

impl UpdatePlan {
    /// Creates a new update plan with the given options.
    #[must_use]
    pub const fn new(options: UpdateOptions) -> Self {
        Self { options }
    }

    /// Builds an operation plan for this update request.
    ///
    /// # Errors
    ///
    /// Returns a `bad_request` error when the state machine rejects the
    /// request or the body id differs from the route id,
    /// [`Error::Invalid`] when validation fails, a conflict when a restore
    /// would overlap an active reservation, or a storage error.
    pub fn build_plan<S>(&self, store: &S) -> Result<OperationPlan>
    where
        S: ReservationStore + RoomDirectory + ?Sized,
    {
        let id = self.options.id;
        let request = &self.options.request;

        // Step 1: Load the stored reservation
        let existing = store.find_by_id(id)?;

        // Step 2: Decide
        let decision = decide(existing.as_ref(), request)?;
        debug!("update of {id} resolved to {decision:?}");

        match (decision, existing, request.body.as_ref()) {
            (Decision::Restore, Some(stored), _) => Self::plan_restore(store, stored),
            (Decision::Create, None, Some(body)) => self.plan_create(store, body),
            (Decision::Replace, Some(stored), Some(body)) => {
                self.plan_replace(store, stored, body)
            }
            _ => Err(Error::Internal {
                operation: "update".into(),
            }),
        }
    }

    fn plan_restore<S>(store: &S, mut stored: Reservation) -> Result<OperationPlan>
    where
        S: ReservationStore + ?Sized,
    {
        // Reactivating must not break the active-set invariant
        let blocking = find_conflict(store, stored.room_id(), stored.range(), Some(stored.id()))?;
        if let Some(other) = blocking {
            debug!("restore of {} blocked by {}", stored.id(), other.id());
            return Err(Error::Invalid {
                issues: vec![Issue::conflict(OVERLAP_MESSAGE)],
            });
        }

        stored.restore();
        Ok(OperationPlan::new(format!("Restore reservation {}", stored.id()))
            .add_action(PlanAction::RestoreReservation(stored)))
    }

    fn plan_create<S>(&self, store: &S, body: &ReservationPayload) -> Result<OperationPlan>
    where
        S: ReservationStore + RoomDirectory + ?Sized,
    {
        let id = self.options.id;
        self.check_body_id(body)?;

        let candidate = ReservationValidator::new(store, store)
            .validate(body)?
            .into_result()?;

        let reservation = Reservation::builder(candidate.room_id)
            .id(id)
            .from_date(candidate.from_date)
            .to_date(candidate.to_date)
            .build()
            .map_err(Error::from)?;

        Ok(OperationPlan::new(format!("Create reservation {id}"))
            .add_action(PlanAction::CreateReservation(reservation)))
    }

    fn plan_replace<S>(
        &self,
        store: &S,
        mut stored: Reservation,
        body: &ReservationPayload,
    ) -> Result<OperationPlan>
    where
        S: ReservationStore + RoomDirectory + ?Sized,
    {
        self.check_body_id(body)?;

        let candidate = ReservationValidator::new(store, store)
            .excluding(Some(stored.id()))
            .validate(body)?
            .into_result()?;

        let ignored_signal = ignores_restore_signal(Some(&stored), &self.options.request);
        let still_deleted = !stored.is_active();

        stored.replace_fields(candidate.from_date, candidate.to_date, candidate.room_id);

        let mut plan = OperationPlan::new(format!("Replace reservation {}", stored.id()))
            .add_action(PlanAction::ReplaceReservation(stored));

        if ignored_signal {
            plan = plan.add_warning("deleted_at: null ignored, reservation is not deleted");
        }
        if still_deleted {
            plan = plan.add_warning("reservation remains deleted; restore it to reactivate");
        }

        Ok(plan)
    }

    /// A body id, when present, must name the route id.
    fn check_body_id(&self, body: &ReservationPayload) -> Result<()> {
        let Some(raw) = body.supplied_id() else {
            return Ok(());
        };

        match raw.parse::<ReservationId>() {
            Ok(body_id) if body_id == self.options.id => Ok(()),
            _ => Err(Error::BadRequest {
                message: format!(
                    "body id '{raw}' does not match reservation id {}",
                    self.options.id
                ),
            }),
        }
    }
}
