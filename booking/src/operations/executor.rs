//! Plan execution engine.
//!
//! This module implements the executor that takes operation plans and
//! applies them to a store. Each action is written together with its audit
//! event, so a change is never persisted without its record.

use log::{error, info};

use crate::audit::AuditEvent;
use crate::error::{Error, ErrorKind, Result};
use crate::store::ReservationStore;
use crate::{Reservation, ReservationId};

use super::plan::{OperationPlan, PlanAction};

/// Result of executing a plan.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Whether the execution was successful.
    pub success: bool,

    /// Whether this was a dry-run (no actual changes made).
    pub dry_run: bool,

    /// Descriptions of actions that were taken (or would be taken in dry-run).
    pub actions_taken: Vec<String>,

    /// Warnings from the plan.
    pub warnings: Vec<String>,

    /// The reservation state after the last action that keeps a row.
    pub reservation: Option<Reservation>,

    /// Audit events recorded, empty in dry-run.
    pub audit_events: Vec<AuditEvent>,
}

impl ExecutionResult {
    fn from_plan(
        plan: &OperationPlan,
        dry_run: bool,
        reservation: Option<Reservation>,
        audit_events: Vec<AuditEvent>,
    ) -> Self {
        Self {
            success: true,
            dry_run,
            actions_taken: plan.actions.iter().map(PlanAction::description).collect(),
            warnings: plan.warnings.clone(),
            reservation,
            audit_events,
        }
    }
}

/// Translates a persistence failure into the public taxonomy.
///
/// Domain errors pass through. Storage errors are logged in full with the
/// operation and id, then replaced by an `internal` or `unavailable` error
/// naming only the operation.
#[must_use]
pub fn translate_storage_error(err: Error, operation: &str, id: Option<ReservationId>) -> Error {
    match err.kind() {
        ErrorKind::BadRequest | ErrorKind::Conflict | ErrorKind::NotFound => err,
        kind => {
            match id {
                Some(id) => error!("{operation} failed for reservation {id}: {err}"),
                None => error!("{operation} failed: {err}"),
            }
            if kind == ErrorKind::Unavailable {
                Error::Unavailable {
                    operation: operation.to_string(),
                }
            } else {
                Error::Internal {
                    operation: operation.to_string(),
                }
            }
        }
    }
}

/// Executes operation plans against a store.
///
/// The executor can run in normal mode (applying changes) or dry-run mode
/// (reporting the plan without changes).
///
/// # Examples
///
/// ```
/// use booking::operations::{DeleteOptions, DeletePlan, PlanExecutor};
/// use booking::{MemoryStore, Reservation, ReservationStore, RoomId};
///
/// let mut store = MemoryStore::new();
/// let reservation = Reservation::builder(RoomId::new_v4()).build().unwrap();
/// store.add(&reservation).unwrap();
///
/// let plan = DeletePlan::new(DeleteOptions::new(reservation.id()))
///     .build_plan(&store)
///     .unwrap();
///
/// let result = PlanExecutor::new(&mut store)
///     .with_principal(Some("alice".to_string()))
///     .execute(&plan)
///     .unwrap();
/// assert!(result.success);
/// assert_eq!(result.audit_events[0].principal, "alice");
/// ```
pub struct PlanExecutor<'a, S: ?Sized> {
    store: &'a mut S,
    principal: Option<String>,
    dry_run: bool,
}

impl<'a, S> PlanExecutor<'a, S>
where
    S: ReservationStore + ?Sized,
{
    /// Creates a new plan executor.
    #[must_use]
    pub fn new(store: &'a mut S) -> Self {
        Self {
            store,
            principal: None,
            dry_run: false,
        }
    }

    /// Sets the principal recorded in audit events.
    #[must_use]
    pub fn with_principal(mut self, principal: Option<String>) -> Self {
        self.principal = principal;
        self
    }

    /// Sets the executor to dry-run mode.
    ///
    /// In dry-run mode the plan is reported but nothing is written.
    #[must_use]
    pub const fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Executes the given plan.
    ///
    /// # Errors
    ///
    /// Returns a domain error (conflict, not found) raised by the store's
    /// own invariant checks, or an `internal`/`unavailable` error when
    /// persistence fails.
    pub fn execute(&mut self, plan: &OperationPlan) -> Result<ExecutionResult> {
        if self.dry_run {
            let planned = plan
                .actions
                .iter()
                .rev()
                .find_map(PlanAction::reservation)
                .cloned();
            return Ok(ExecutionResult::from_plan(plan, true, planned, Vec::new()));
        }

        let mut reservation = None;
        let mut audit_events = Vec::with_capacity(plan.len());
        for action in &plan.actions {
            let operation = action.audit_operation();
            let id = action.reservation_id();
            let event = AuditEvent::reservation(operation, id, self.principal.as_deref());

            let stored = self
                .store
                .apply(&action.change(), &event)
                .map_err(|e| translate_storage_error(e, operation.as_str(), Some(id)))?;

            info!(target: "audit", "{event}");
            if stored.is_some() {
                reservation = stored;
            }
            audit_events.push(event);
        }

        Ok(ExecutionResult::from_plan(plan, false, reservation, audit_events))
    }
}
