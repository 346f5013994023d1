//! Plan types for reservation operations.
//!
//! This module defines the plan structures that describe what actions
//! will be taken during an operation, without actually performing them.

use chrono::Utc;

use crate::audit::AuditOperation;
use crate::store::Change;
use crate::{Reservation, ReservationId};

/// A single action to be taken during plan execution.
///
/// Actions that keep the row carry the reservation in the exact state to be
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanAction {
    /// Insert a new reservation.
    CreateReservation(Reservation),

    /// Overwrite dates and room of an existing reservation.
    ReplaceReservation(Reservation),

    /// Clear the delete marker of a soft-deleted reservation.
    RestoreReservation(Reservation),

    /// Set the delete marker of an active reservation.
    SoftDeleteReservation(Reservation),

    /// Permanently remove a reservation.
    HardDeleteReservation(ReservationId),
}

impl PlanAction {
    /// Returns a human-readable description of this action.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::CreateReservation(r) => {
                format!(
                    "Create reservation {} for room {} ({})",
                    r.id(),
                    r.room_id(),
                    r.range()
                )
            }
            Self::ReplaceReservation(r) => {
                format!(
                    "Replace reservation {} with room {} ({})",
                    r.id(),
                    r.room_id(),
                    r.range()
                )
            }
            Self::RestoreReservation(r) => format!("Restore reservation {}", r.id()),
            Self::SoftDeleteReservation(r) => format!("Soft-delete reservation {}", r.id()),
            Self::HardDeleteReservation(id) => format!("Permanently delete reservation {id}"),
        }
    }

    /// Returns the audit operation recorded for this action.
    #[must_use]
    pub const fn audit_operation(&self) -> AuditOperation {
        match self {
            Self::CreateReservation(_) => AuditOperation::Create,
            Self::ReplaceReservation(_) => AuditOperation::Replace,
            Self::RestoreReservation(_) => AuditOperation::Restore,
            Self::SoftDeleteReservation(_) => AuditOperation::SoftDelete,
            Self::HardDeleteReservation(_) => AuditOperation::HardDelete,
        }
    }

    /// Returns the id of the reservation this action touches.
    #[must_use]
    pub const fn reservation_id(&self) -> ReservationId {
        match self {
            Self::CreateReservation(r)
            | Self::ReplaceReservation(r)
            | Self::RestoreReservation(r)
            | Self::SoftDeleteReservation(r) => r.id(),
            Self::HardDeleteReservation(id) => *id,
        }
    }

    /// Returns the store change that carries out this action.
    ///
    /// Soft delete and restore shrink to the delete marker alone.
    #[must_use]
    pub fn change(&self) -> Change {
        match self {
            Self::CreateReservation(r) => Change::Insert(r.clone()),
            Self::ReplaceReservation(r) => Change::Replace(r.clone()),
            Self::RestoreReservation(r) => Change::Restore(r.id()),
            Self::SoftDeleteReservation(r) => Change::SoftDelete {
                id: r.id(),
                at: r.deleted_at().unwrap_or_else(Utc::now),
            },
            Self::HardDeleteReservation(id) => Change::Remove(*id),
        }
    }

    /// Returns the reservation state this action persists, if it keeps one.
    #[must_use]
    pub const fn reservation(&self) -> Option<&Reservation> {
        match self {
            Self::CreateReservation(r)
            | Self::ReplaceReservation(r)
            | Self::RestoreReservation(r)
            | Self::SoftDeleteReservation(r) => Some(r),
            Self::HardDeleteReservation(_) => None,
        }
    }
}

/// A complete operation plan describing all actions to be taken.
///
/// Plans are generated during the planning phase and can be inspected,
/// logged, or executed. They include a description, a sequence of actions,
/// and any warnings that should be communicated to the user.
#[derive(Debug, Clone)]
pub struct OperationPlan {
    /// A human-readable description of the operation.
    pub description: String,

    /// The sequence of actions to perform.
    pub actions: Vec<PlanAction>,

    /// Warnings to communicate to the user.
    pub warnings: Vec<String>,
}

impl OperationPlan {
    /// Creates a new operation plan with the given description.
    ///
    /// # Examples
    ///
    /// ```
    /// use booking::operations::OperationPlan;
    ///
    /// let plan = OperationPlan::new("Create reservation");
    /// assert_eq!(plan.description, "Create reservation");
    /// assert!(plan.is_empty());
    /// ```
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            actions: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an action to the plan.
    ///
    /// # Examples
    ///
    /// ```
    /// use booking::operations::{OperationPlan, PlanAction};
    /// use booking::ReservationId;
    ///
    /// let plan = OperationPlan::new("Test")
    ///     .add_action(PlanAction::HardDeleteReservation(ReservationId::new_v4()));
    ///
    /// assert_eq!(plan.len(), 1);
    /// ```
    #[must_use]
    pub fn add_action(mut self, action: PlanAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Adds a warning to the plan.
    #[must_use]
    pub fn add_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Checks if the plan has no actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns the number of actions in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }
}
