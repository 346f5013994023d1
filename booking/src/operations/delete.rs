//! Delete operation planning.
//!
//! Soft deletes stamp `deleted_at` with the current time and keep the row.
//! Hard deletes remove it.

use chrono::Utc;

use crate::error::{Error, Result};
use crate::store::ReservationStore;
use crate::ReservationId;

use super::plan::{OperationPlan, PlanAction};

/// Options for a delete operation.
#[derive(Debug, Clone)]
pub struct DeleteOptions {
    /// The reservation to delete.
    pub id: ReservationId,

    /// Remove the row instead of marking it deleted.
    pub hard: bool,
}

impl DeleteOptions {
    /// Creates options for a soft delete of `id`.
    ///
    /// # Examples
    ///
    /// ```
    /// use booking::operations::DeleteOptions;
    /// use booking::ReservationId;
    ///
    /// let options = DeleteOptions::new(ReservationId::new_v4());
    /// assert!(!options.hard);
    /// ```
    #[must_use]
    pub const fn new(id: ReservationId) -> Self {
        Self { id, hard: false }
    }

    /// Sets the hard flag.
    #[must_use]
    pub const fn with_hard(mut self, hard: bool) -> Self {
        self.hard = hard;
        self
    }
}

/// A delete plan generator.
pub struct DeletePlan {
    options: DeleteOptions,
}

impl DeletePlan {
    /// Creates a new delete plan with the given options.
    #[must_use]
    pub const fn new(options: DeleteOptions) -> Self {
        Self { options }
    }

    /// Builds an operation plan for this delete request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the reservation does not exist,
    /// [`Error::AlreadyDeleted`] for a soft delete of a soft-deleted
    /// reservation, or a storage error.
    pub fn build_plan<S>(&self, store: &S) -> Result<OperationPlan>
    where
        S: ReservationStore + ?Sized,
    {
        let id = self.options.id;

        let Some(mut reservation) = store.find_by_id(id)? else {
            return Err(Error::NotFound {
                resource: format!("reservation {id}"),
            });
        };

        if self.options.hard {
            return Ok(OperationPlan::new(format!("Permanently delete reservation {id}"))
                .add_action(PlanAction::HardDeleteReservation(id)));
        }

        if !reservation.is_active() {
            return Err(Error::AlreadyDeleted { id });
        }

        reservation.mark_deleted(Utc::now());
        Ok(OperationPlan::new(format!("Soft-delete reservation {id}"))
            .add_action(PlanAction::SoftDeleteReservation(reservation)))
    }
}
