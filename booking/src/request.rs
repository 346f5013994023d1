//! Request shapes for create and update calls.
//!
//! A request body is a partial reservation whose `deleted_at` field carries
//! three distinct meanings: absent, explicit `null` (an un-delete signal), or
//! a timestamp. [`DeletedAtField`] keeps those apart.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};
use crate::reservation::ValidationError;

/// The action requested by an update call.
///
/// # Examples
///
/// ```
/// use booking::ActionHint;
///
/// assert_eq!("RESTORE".parse::<ActionHint>().unwrap(), ActionHint::Restore);
/// assert_eq!("replace".parse::<ActionHint>().unwrap(), ActionHint::Replace);
/// assert!("merge".parse::<ActionHint>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionHint {
    /// Replace the stored fields, or create when nothing is stored.
    #[default]
    Replace,
    /// Clear the soft-delete marker.
    Restore,
}

impl FromStr for ActionHint {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "replace" => Ok(Self::Replace),
            "restore" => Ok(Self::Restore),
            other => Err(ValidationError {
                field: "action".into(),
                message: format!("unknown action '{other}', expected 'replace' or 'restore'"),
            }),
        }
    }
}

impl std::fmt::Display for ActionHint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Replace => write!(f, "replace"),
            Self::Restore => write!(f, "restore"),
        }
    }
}

/// The tri-state `deleted_at` field of a request body.
///
/// # Examples
///
/// ```
/// use booking::{DeletedAtField, ReservationPayload};
///
/// let body: ReservationPayload = serde_json::from_str("{}").unwrap();
/// assert_eq!(body.deleted_at, DeletedAtField::Absent);
///
/// let body: ReservationPayload = serde_json::from_str(r#"{"deleted_at": null}"#).unwrap();
/// assert_eq!(body.deleted_at, DeletedAtField::Null);
///
/// let body: ReservationPayload =
///     serde_json::from_str(r#"{"deleted_at": {"value": null}}"#).unwrap();
/// assert_eq!(body.deleted_at, DeletedAtField::Null);
///
/// let body: ReservationPayload =
///     serde_json::from_str(r#"{"deleted_at": "2023-01-05T10:00:00Z"}"#).unwrap();
/// assert!(matches!(body.deleted_at, DeletedAtField::Timestamp(_)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeletedAtField {
    /// The field was not sent.
    #[default]
    Absent,
    /// The field was sent as `null`.
    Null,
    /// The field carried a timestamp.
    Timestamp(DateTime<Utc>),
}

impl DeletedAtField {
    /// Returns `true` for an explicit `null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDeletedAt {
    Text(String),
    Wrapped(serde_json::Map<String, serde_json::Value>),
}

impl<'de> Deserialize<'de> for DeletedAtField {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<RawDeletedAt>::deserialize(deserializer).map_err(|_| {
            D::Error::custom(
                "deleted_at must be null, a datetime string or an object with a 'value' field",
            )
        })?;

        match raw {
            None => Ok(Self::Null),
            Some(RawDeletedAt::Text(text)) => parse_timestamp(&text)
                .map(Self::Timestamp)
                .ok_or_else(|| D::Error::custom("deleted_at is not a valid datetime")),
            // Only a string `value` carries a timestamp; anything else reads as null
            Some(RawDeletedAt::Wrapped(fields)) => match fields.get("value") {
                Some(serde_json::Value::String(text)) => parse_timestamp(text)
                    .map(Self::Timestamp)
                    .ok_or_else(|| D::Error::custom("deleted_at.value is not a valid datetime")),
                _ => Ok(Self::Null),
            },
        }
    }
}

/// Parses a client-supplied timestamp as UTC.
///
/// Accepts RFC 3339, a naive date-time (assumed UTC) or a bare date
/// (midnight UTC).
///
/// # Examples
///
/// ```
/// use booking::request::parse_timestamp;
///
/// assert!(parse_timestamp("2023-01-05T10:00:00+02:00").is_some());
/// assert!(parse_timestamp("2023-01-05T10:00:00").is_some());
/// assert!(parse_timestamp("2023-01-05").is_some());
/// assert!(parse_timestamp("yesterday").is_none());
/// ```
#[must_use]
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// A partial reservation as sent by a client.
///
/// Ids are kept as text so that malformed values can be reported by the
/// validator alongside other issues.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReservationPayload {
    /// Optional reservation id.
    pub id: Option<String>,
    /// First reserved day.
    pub from: Option<NaiveDate>,
    /// Last reserved day.
    pub to: Option<NaiveDate>,
    /// Room to reserve.
    pub room_id: Option<String>,
    /// Tri-state delete marker.
    pub deleted_at: DeletedAtField,
}

impl ReservationPayload {
    /// Parses a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BadRequest`] if the body is not valid JSON or has
    /// fields of the wrong shape.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::BadRequest {
            message: format!("invalid reservation body: {e}"),
        })
    }

    /// Returns the body id when it is present and non-blank.
    #[must_use]
    pub fn supplied_id(&self) -> Option<&str> {
        self.id.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }
}

/// An update request addressed to one reservation id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdateRequest {
    /// The requested action.
    pub action: ActionHint,
    /// The request body, if one was sent.
    pub body: Option<ReservationPayload>,
}

impl UpdateRequest {
    /// Creates a request with the given action and body.
    #[must_use]
    pub const fn new(action: ActionHint, body: Option<ReservationPayload>) -> Self {
        Self { action, body }
    }

    /// Returns the body's delete marker, or `Absent` without a body.
    #[must_use]
    pub fn deleted_at(&self) -> DeletedAtField {
        self.body
            .as_ref()
            .map_or(DeletedAtField::Absent, |body| body.deleted_at)
    }
}
