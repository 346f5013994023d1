//! Room references and the mirrored room records behind the existence oracle.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::reservation::{parse_uuid, ValidationError};

/// Identifier of a room owned by the asset inventory.
///
/// # Examples
///
/// ```
/// use booking::RoomId;
///
/// let room: RoomId = "0b6f7c1a-2d3e-4f50-8a9b-c0d1e2f30415".parse().unwrap();
/// assert_eq!(room.to_string(), "0b6f7c1a-2d3e-4f50-8a9b-c0d1e2f30415");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(Uuid);

impl RoomId {
    /// Generates a fresh random (v4) id.
    #[must_use]
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for RoomId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for RoomId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_uuid("room_id", s).map(Self)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// A room as mirrored from the inventory.
///
/// A room exists for booking purposes only while `deleted_at` is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Room identifier.
    pub id: RoomId,
    /// Display name.
    pub name: String,
    /// Storey the room belongs to, if known.
    pub storey_id: Option<Uuid>,
    /// Removal timestamp in the inventory.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Room {
    /// Creates an existing room with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty after trimming whitespace.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ValidationError {
                field: "name".into(),
                message: "room name must be non-empty after trimming whitespace".into(),
            });
        }

        Ok(Self {
            id: RoomId::new_v4(),
            name,
            storey_id: None,
            deleted_at: None,
        })
    }

    /// Sets an explicit id.
    #[must_use]
    pub const fn with_id(mut self, id: RoomId) -> Self {
        self.id = id;
        self
    }

    /// Sets the storey.
    #[must_use]
    pub const fn with_storey(mut self, storey_id: Option<Uuid>) -> Self {
        self.storey_id = storey_id;
        self
    }

    /// Returns `true` while the room has not been removed.
    #[must_use]
    pub const fn exists(&self) -> bool {
        self.deleted_at.is_none()
    }
}
