//! Audit events recorded for every mutating reservation operation.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::reservation::{ReservationId, ValidationError};

/// Principal recorded when the caller is not identified.
pub const ANONYMOUS_PRINCIPAL: &str = "anonymous";

/// Object type recorded for reservation events.
pub const RESERVATION_OBJECT_TYPE: &str = "reservation";

/// The kind of mutation an audit event describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditOperation {
    /// A reservation was created.
    Create,
    /// A reservation's fields were overwritten.
    Replace,
    /// A soft-deleted reservation was reactivated.
    Restore,
    /// A reservation was marked deleted.
    SoftDelete,
    /// A reservation was permanently removed.
    HardDelete,
}

impl AuditOperation {
    /// Returns the stored name of this operation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Replace => "replace",
            Self::Restore => "restore",
            Self::SoftDelete => "soft_delete",
            Self::HardDelete => "hard_delete",
        }
    }
}

impl fmt::Display for AuditOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditOperation {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(Self::Create),
            "replace" => Ok(Self::Replace),
            "restore" => Ok(Self::Restore),
            "soft_delete" => Ok(Self::SoftDelete),
            "hard_delete" => Ok(Self::HardDelete),
            other => Err(ValidationError {
                field: "operation".into(),
                message: format!("unknown audit operation '{other}'"),
            }),
        }
    }
}

/// One recorded mutation.
///
/// # Examples
///
/// ```
/// use booking::{AuditEvent, AuditOperation, ReservationId};
///
/// let id = ReservationId::new_v4();
/// let event = AuditEvent::reservation(AuditOperation::Create, id, None);
///
/// assert_eq!(event.object_type, "reservation");
/// assert_eq!(event.object_id, id.to_string());
/// assert_eq!(event.principal, "anonymous");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// What happened.
    pub operation: AuditOperation,
    /// Type of the affected object.
    pub object_type: String,
    /// Id of the affected object.
    pub object_id: String,
    /// Who did it.
    pub principal: String,
    /// When it was recorded.
    pub recorded_at: DateTime<Utc>,
}

impl AuditEvent {
    /// Creates an event for a reservation, stamped with the current time.
    ///
    /// A missing or blank principal is recorded as `anonymous`.
    #[must_use]
    pub fn reservation(
        operation: AuditOperation,
        id: ReservationId,
        principal: Option<&str>,
    ) -> Self {
        let principal = principal
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or(ANONYMOUS_PRINCIPAL);

        Self {
            operation,
            object_type: RESERVATION_OBJECT_TYPE.to_string(),
            object_id: id.to_string(),
            principal: principal.to_string(),
            recorded_at: Utc::now(),
        }
    }
}

impl fmt::Display for AuditEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} by {}",
            self.operation, self.object_type, self.object_id, self.principal
        )
    }
}
