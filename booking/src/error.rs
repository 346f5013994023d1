//! Error types for the booking library.
//!
//! Every failure the library can report is a variant of [`Error`]. Callers
//! that need to branch on the broad class of a failure (for exit codes or
//! status mapping) use [`Error::kind`], which folds the variants onto the
//! five-way [`ErrorKind`] taxonomy.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::reservation::ReservationId;

/// Result type alias for operations that may fail with a booking error.
///
/// # Examples
///
/// ```
/// use booking::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Broad failure classes reported to callers.
///
/// # Examples
///
/// ```
/// use booking::ErrorKind;
///
/// assert_eq!(ErrorKind::BadRequest.to_string(), "bad_request");
/// assert_eq!(ErrorKind::NotFound.to_string(), "not_found");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed or semantically invalid input.
    BadRequest,
    /// The request collides with existing state.
    Conflict,
    /// The addressed record does not exist (or is already deleted).
    NotFound,
    /// A persistence or logic failure inside the service.
    Internal,
    /// The persistence layer could not be reached.
    Unavailable,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadRequest => write!(f, "bad_request"),
            Self::Conflict => write!(f, "conflict"),
            Self::NotFound => write!(f, "not_found"),
            Self::Internal => write!(f, "internal"),
            Self::Unavailable => write!(f, "unavailable"),
        }
    }
}

/// A single validation finding, tagged with its failure class.
///
/// # Examples
///
/// ```
/// use booking::{ErrorKind, Issue};
///
/// let issue = Issue::bad_request("room_id is required");
/// assert_eq!(issue.kind, ErrorKind::BadRequest);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// The failure class of this finding.
    pub kind: ErrorKind,
    /// Human-readable description.
    pub message: String,
}

impl Issue {
    /// Creates a `bad_request` issue.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::BadRequest,
            message: message.into(),
        }
    }

    /// Creates a `not_found` issue.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::NotFound,
            message: message.into(),
        }
    }

    /// Creates a `conflict` issue.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Conflict,
            message: message.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

fn join_issues(issues: &[Issue]) -> String {
    issues
        .iter()
        .map(|issue| issue.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// The main error type for the booking library.
#[derive(Debug, Error)]
pub enum Error {
    /// A reservation candidate failed validation.
    #[error("reservation rejected: {}", join_issues(issues))]
    Invalid {
        /// Every issue found, in check order.
        issues: Vec<Issue>,
    },

    /// The request is malformed or not allowed in the current state.
    #[error("bad request: {message}")]
    BadRequest {
        /// Why the request was rejected.
        message: String,
    },

    /// An active reservation already occupies the requested room and days.
    #[error("reservation conflict: {details}")]
    ReservationConflict {
        /// Details about the conflict.
        details: String,
    },

    /// A create reused an id that belongs to a stored reservation.
    #[error("reservation id {id} is already in use")]
    DuplicateId {
        /// The id that was reused.
        id: ReservationId,
    },

    /// The requested resource was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// A soft delete targeted a reservation that is already soft-deleted.
    #[error("reservation {id} is already deleted")]
    AlreadyDeleted {
        /// The reservation id.
        id: ReservationId,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },

    /// A persistence failure, reported without storage details.
    #[error("internal error during {operation}")]
    Internal {
        /// The operation that failed.
        operation: String,
    },

    /// The persistence layer could not be reached.
    #[error("storage unavailable during {operation}")]
    Unavailable {
        /// The operation that failed.
        operation: String,
    },
}

impl From<crate::reservation::ValidationError> for Error {
    fn from(err: crate::reservation::ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

impl From<Issue> for Error {
    fn from(issue: Issue) -> Self {
        match issue.kind {
            ErrorKind::Conflict => Self::ReservationConflict {
                details: issue.message,
            },
            ErrorKind::NotFound => Self::NotFound {
                resource: issue.message,
            },
            _ => Self::BadRequest {
                message: issue.message,
            },
        }
    }
}

impl Error {
    /// Classifies this error into the public failure taxonomy.
    ///
    /// A rejection carrying several issues is `bad_request` when any issue
    /// is `bad_request`, and `conflict` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use booking::{Error, ErrorKind, Issue};
    ///
    /// let err = Error::Invalid {
    ///     issues: vec![
    ///         Issue::conflict("overlap"),
    ///         Issue::bad_request("bad range"),
    ///     ],
    /// };
    /// assert_eq!(err.kind(), ErrorKind::BadRequest);
    ///
    /// let err = Error::Invalid { issues: vec![Issue::conflict("overlap")] };
    /// assert_eq!(err.kind(), ErrorKind::Conflict);
    /// ```
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Invalid { issues } => {
                if !issues.is_empty()
                    && issues.iter().all(|issue| issue.kind == ErrorKind::Conflict)
                {
                    ErrorKind::Conflict
                } else {
                    ErrorKind::BadRequest
                }
            }
            Self::BadRequest { .. } | Self::Validation { .. } | Self::InvalidPath { .. } => {
                ErrorKind::BadRequest
            }
            Self::ReservationConflict { .. } | Self::DuplicateId { .. } => ErrorKind::Conflict,
            Self::NotFound { .. } | Self::AlreadyDeleted { .. } => ErrorKind::NotFound,
            Self::Database(err) if is_connectivity_failure(err) => ErrorKind::Unavailable,
            Self::Unavailable { .. } => ErrorKind::Unavailable,
            Self::Database(_)
            | Self::Io(_)
            | Self::UnsupportedSchemaVersion { .. }
            | Self::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Returns the validation issues carried by this error.
    ///
    /// Single-cause errors report themselves as one issue.
    #[must_use]
    pub fn issues(&self) -> Vec<Issue> {
        match self {
            Self::Invalid { issues } => issues.clone(),
            other => vec![Issue {
                kind: other.kind(),
                message: other.to_string(),
            }],
        }
    }
}

/// Returns `true` for `SQLite` failures that mean the store is unreachable
/// rather than broken.
fn is_connectivity_failure(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(inner, _) => matches!(
            inner.code,
            rusqlite::ErrorCode::DatabaseBusy
                | rusqlite::ErrorCode::DatabaseLocked
                | rusqlite::ErrorCode::CannotOpen
        ),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_error_joins_messages() {
        let err = Error::Invalid {
            issues: vec![
                Issue::bad_request("from date is after to date"),
                Issue::bad_request("room_id is required"),
            ],
        };
        let display = format!("{err}");
        assert!(display.contains("reservation rejected"));
        assert!(display.contains("from date is after to date; room_id is required"));
    }

    #[test]
    fn test_invalid_kind_all_conflicts() {
        let err = Error::Invalid {
            issues: vec![Issue::conflict("a"), Issue::conflict("b")],
        };
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn test_invalid_kind_mixed_prefers_bad_request() {
        let err = Error::Invalid {
            issues: vec![Issue::conflict("a"), Issue::bad_request("b")],
        };
        assert_eq!(err.kind(), ErrorKind::BadRequest);
    }

    #[test]
    fn test_invalid_kind_empty_is_bad_request() {
        let err = Error::Invalid { issues: vec![] };
        assert_eq!(err.kind(), ErrorKind::BadRequest);
    }

    #[test]
    fn test_duplicate_id_error() {
        let id = ReservationId::new_v4();
        let err = Error::DuplicateId { id };
        let display = format!("{err}");
        assert!(display.contains(&id.to_string()));
        assert!(display.contains("already in use"));
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn test_already_deleted_error() {
        let id = ReservationId::new_v4();
        let err = Error::AlreadyDeleted { id };
        assert!(format!("{err}").contains("already deleted"));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_not_found_error() {
        let err = Error::NotFound {
            resource: "reservation 1234".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("not found"));
        assert!(display.contains("reservation"));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_internal_error_hides_details() {
        let err = Error::Internal {
            operation: "create".to_string(),
        };
        assert_eq!(format!("{err}"), "internal error during create");
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_busy_database_is_unavailable() {
        let err = Error::Database(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY),
            None,
        ));
        assert_eq!(err.kind(), ErrorKind::Unavailable);
    }

    #[test]
    fn test_other_database_error_is_internal() {
        let err = Error::Database(rusqlite::Error::QueryReturnedNoRows);
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_issue_conversion() {
        let err: Error = Issue::conflict("overlap").into();
        assert!(matches!(err, Error::ReservationConflict { .. }));

        let err: Error = Issue::bad_request("nope").into();
        assert!(matches!(err, Error::BadRequest { .. }));

        let err: Error = Issue::not_found("gone").into();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn test_issues_of_single_cause_error() {
        let err = Error::BadRequest {
            message: "missing body".to_string(),
        };
        let issues = err.issues();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, ErrorKind::BadRequest);
        assert!(issues[0].message.contains("missing body"));
    }

    #[test]
    fn test_unsupported_schema_version_error() {
        let err = Error::UnsupportedSchemaVersion {
            expected: 1,
            found: 2,
        };
        let display = format!("{err}");
        assert!(display.contains("expected 1"));
        assert!(display.contains("found 2"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(format!("{err}").contains("I/O error"));
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_error_kind_display() {
        assert_eq!(ErrorKind::Conflict.to_string(), "conflict");
        assert_eq!(ErrorKind::Internal.to_string(), "internal");
        assert_eq!(ErrorKind::Unavailable.to_string(), "unavailable");
    }
}
