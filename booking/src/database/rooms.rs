//! Mirrored room records and the room existence oracle.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::Result;
use crate::room::{Room, RoomId};
use crate::store::RoomDirectory;

use super::connection::Database;
use super::reservations::{format_timestamp, parse_timestamp_column, parse_uuid_column};

const UPSERT_ROOM: &str = r"
    INSERT INTO rooms (id, name, storey_id, deleted_at)
    VALUES (?1, ?2, ?3, ?4)
    ON CONFLICT(id) DO UPDATE SET
        name = excluded.name,
        storey_id = excluded.storey_id,
        deleted_at = excluded.deleted_at
";

const SELECT_ROOM_EXISTS: &str = "SELECT 1 FROM rooms WHERE id = ? AND deleted_at IS NULL";

const LIST_ROOMS: &str = r"
    SELECT id, name, storey_id, deleted_at
    FROM rooms
    ORDER BY name, id
";

const SOFT_DELETE_ROOM: &str =
    "UPDATE rooms SET deleted_at = ? WHERE id = ? AND deleted_at IS NULL";

fn row_to_room(row: &rusqlite::Row<'_>) -> rusqlite::Result<Room> {
    let storey: Option<String> = row.get(2)?;
    Ok(Room {
        id: RoomId::from(parse_uuid_column(row, 0)?),
        name: row.get(1)?,
        storey_id: match storey {
            Some(_) => Some(parse_uuid_column(row, 2)?),
            None => None,
        },
        deleted_at: parse_timestamp_column(row, 3)?,
    })
}

impl Database {
    /// Registers a room, or refreshes it if the id is already known.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn upsert_room(&mut self, room: &Room) -> Result<()> {
        self.conn.execute(
            UPSERT_ROOM,
            params![
                room.id.to_string(),
                room.name,
                room.storey_id.map(|s| s.hyphenated().to_string()),
                room.deleted_at.map(format_timestamp),
            ],
        )?;
        Ok(())
    }

    /// Marks a room as removed from the inventory.
    ///
    /// Returns `false` if the room was unknown or already removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn remove_room(&mut self, room_id: RoomId) -> Result<bool> {
        let rows = self.conn.execute(
            SOFT_DELETE_ROOM,
            params![format_timestamp(Utc::now()), room_id.to_string()],
        )?;
        Ok(rows > 0)
    }

    /// Lists all rooms, removed ones included, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is malformed.
    pub fn list_rooms(conn: &Connection) -> Result<Vec<Room>> {
        let mut stmt = conn.prepare(LIST_ROOMS)?;
        let rooms = stmt
            .query_map([], row_to_room)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rooms)
    }
}

impl RoomDirectory for Database {
    fn room_exists(&self, room_id: RoomId) -> Result<bool> {
        let found: Option<i32> = self
            .conn
            .query_row(SELECT_ROOM_EXISTS, [room_id.to_string()], |row| row.get(0))
            .optional()?;
        Ok(found.is_some())
    }
}
