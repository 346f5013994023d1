//! The booking service facade.
//!
//! [`BookingService`] ties planning and execution together for callers that
//! want one call per operation. Every method loads state fresh from the
//! store, so no result depends on an earlier call.

use log::warn;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::request::{ReservationPayload, UpdateRequest};
use crate::store::{BookingStore, ReservationFilter};
use crate::{Reservation, ReservationId};

use super::create::{CreateOptions, CreatePlan};
use super::delete::{DeleteOptions, DeletePlan};
use super::executor::{translate_storage_error, ExecutionResult, PlanExecutor};
use super::plan::OperationPlan;
use super::query::{get_reservation, list_reservations};
use super::update::{UpdateOptions, UpdatePlan};

/// Version of the booking API surface.
pub const API_VERSION: &str = "1.1.0";

/// Static service information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceStatus {
    /// Service authors.
    pub authors: Vec<String>,
    /// API version.
    pub api_version: String,
}

impl ServiceStatus {
    /// Returns the status of this build.
    #[must_use]
    pub fn current() -> Self {
        Self {
            authors: env!("CARGO_PKG_AUTHORS")
                .split(':')
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(String::from)
                .collect(),
            api_version: API_VERSION.to_string(),
        }
    }
}

/// Liveness and readiness of the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    /// The process answers.
    pub live: bool,
    /// The store answers.
    pub ready: bool,
    /// Failure detail when not ready.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Runs reservation operations against one store.
///
/// # Examples
///
/// ```
/// use booking::operations::BookingService;
/// use booking::{ActionHint, MemoryStore, ReservationPayload, Room, UpdateRequest};
/// use chrono::NaiveDate;
///
/// let mut store = MemoryStore::new();
/// let room = Room::new("Studio").unwrap();
/// let room_id = room.id;
/// store.add_room(room);
///
/// let mut service = BookingService::new(&mut store).with_principal(Some("bob".into()));
/// let created = service
///     .create(ReservationPayload {
///         from: NaiveDate::from_ymd_opt(2023, 1, 3),
///         to: NaiveDate::from_ymd_opt(2023, 1, 5),
///         room_id: Some(room_id.to_string()),
///         ..ReservationPayload::default()
///     })
///     .unwrap();
///
/// let id = created.reservation.unwrap().id();
/// service.delete(id, false).unwrap();
/// let restored = service
///     .update(id, UpdateRequest::new(ActionHint::Restore, None))
///     .unwrap();
/// assert!(restored.reservation.unwrap().is_active());
/// ```
pub struct BookingService<'a, S: ?Sized> {
    store: &'a mut S,
    principal: Option<String>,
    dry_run: bool,
}

impl<'a, S> BookingService<'a, S>
where
    S: BookingStore + ?Sized,
{
    /// Creates a service over `store`.
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

    /// Plans mutations without applying them.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Lists reservations.
    ///
    /// # Errors
    ///
    /// Returns an `internal` or `unavailable` error when the store fails.
    pub fn list(&self, filter: &ReservationFilter) -> Result<Vec<Reservation>> {
        list_reservations(&*self.store, filter)
    }

    /// Fetches one reservation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown id.
    pub fn get(&self, id: ReservationId) -> Result<Reservation> {
        get_reservation(&*self.store, id)
    }

    /// Creates a reservation from a client body.
    ///
    /// # Errors
    ///
    /// Returns validation, conflict or storage errors.
    pub fn create(&mut self, payload: ReservationPayload) -> Result<ExecutionResult> {
        let plan = CreatePlan::new(CreateOptions::new(payload))
            .build_plan(&*self.store)
            .map_err(|e| translate_storage_error(e, "create", None))?;
        self.run(&plan)
    }

    /// Replaces, creates or restores the reservation at `id`.
    ///
    /// # Errors
    ///
    /// Returns rejections from the state machine, validation, conflict or
    /// storage errors.
    pub fn update(&mut self, id: ReservationId, request: UpdateRequest) -> Result<ExecutionResult> {
        let plan = UpdatePlan::new(UpdateOptions::new(id, request))
            .build_plan(&*self.store)
            .map_err(|e| translate_storage_error(e, "update", Some(id)))?;
        self.run(&plan)
    }

    /// Soft or hard deletes the reservation at `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown id,
    /// [`Error::AlreadyDeleted`] for a repeated soft delete, or a storage
    /// error.
    pub fn delete(&mut self, id: ReservationId, hard: bool) -> Result<ExecutionResult> {
        let plan = DeletePlan::new(DeleteOptions::new(id).with_hard(hard))
            .build_plan(&*self.store)
            .map_err(|e| translate_storage_error(e, "delete", Some(id)))?;
        self.run(&plan)
    }

    /// Returns static service information.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn status(&self) -> ServiceStatus {
        ServiceStatus::current()
    }

    /// Probes the store.
    #[must_use]
    pub fn health(&self) -> HealthReport {
        match self.store.health_check() {
            Ok(()) => HealthReport {
                live: true,
                ready: true,
                detail: None,
            },
            Err(e) => {
                warn!("health check failed: {e}");
                HealthReport {
                    live: true,
                    ready: false,
                    detail: Some(e.to_string()),
                }
            }
        }
    }

    /// Fails with `unavailable` unless the store answers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unavailable`] when the health check fails.
    pub fn ensure_ready(&self) -> Result<()> {
        if self.health().ready {
            Ok(())
        } else {
            Err(Error::Unavailable {
                operation: "health".into(),
            })
        }
    }

    fn run(&mut self, plan: &OperationPlan) -> Result<ExecutionResult> {
        for warning in &plan.warnings {
            warn!("{warning}");
        }

        let mut executor =
            PlanExecutor::new(&mut *self.store).with_principal(self.principal.clone());
        if self.dry_run {
            executor = executor.dry_run();
        }
        executor.execute(plan)
    }
}
