//! Reservation persistence on `SQLite`.
//!
//! Writes run in `IMMEDIATE` transactions and re-check the duplicate-id and
//! overlap invariants inside the transaction, so two writers racing past
//! the planning phase cannot both commit conflicting rows. An applied
//! [`Change`] commits together with its audit row.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, TransactionBehavior};
use uuid::Uuid;

use crate::audit::AuditEvent;
use crate::error::{Error, Result};
use crate::operations::transition::NOT_DELETED_MESSAGE;
use crate::reservation::{Reservation, ReservationId};
use crate::room::RoomId;
use crate::store::{Change, ReservationFilter, ReservationStore};
use crate::validation::OVERLAP_MESSAGE;

use super::connection::Database;

const DATE_FORMAT: &str = "%Y-%m-%d";

const SELECT_COLUMNS: &str = "SELECT id, from_date, to_date, room_id, deleted_at FROM reservations";

const SELECT_RESERVATION: &str = r"
    SELECT id, from_date, to_date, room_id, deleted_at
    FROM reservations
    WHERE id = ?
";

const INSERT_RESERVATION: &str = r"
    INSERT INTO reservations (id, from_date, to_date, room_id, deleted_at)
    VALUES (?1, ?2, ?3, ?4, ?5)
";

const UPDATE_RESERVATION: &str = r"
    UPDATE reservations
    SET from_date = ?2, to_date = ?3, room_id = ?4, deleted_at = ?5
    WHERE id = ?1
";

const REPLACE_FIELDS: &str = r"
    UPDATE reservations
    SET from_date = ?2, to_date = ?3, room_id = ?4
    WHERE id = ?1
";

const SOFT_DELETE_RESERVATION: &str = r"
    UPDATE reservations
    SET deleted_at = ?2
    WHERE id = ?1 AND deleted_at IS NULL
";

const RESTORE_RESERVATION: &str = r"
    UPDATE reservations
    SET deleted_at = NULL
    WHERE id = ?1 AND deleted_at IS NOT NULL
";

const DELETE_RESERVATION: &str = "DELETE FROM reservations WHERE id = ?";

const SELECT_OVERLAPPING: &str = r"
    SELECT id FROM reservations
    WHERE deleted_at IS NULL
      AND room_id = ?1
      AND id != ?2
      AND from_date IS NOT NULL
      AND to_date IS NOT NULL
      AND from_date <= ?4
      AND to_date >= ?3
    ORDER BY from_date, id
    LIMIT 1
";

/// Formats a day for storage.
pub(super) fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Formats a timestamp for storage, keeping full precision.
pub(super) fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn conversion_error(
    idx: usize,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

pub(super) fn parse_uuid_column(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<Uuid> {
    let text: String = row.get(idx)?;
    Uuid::parse_str(&text).map_err(|e| conversion_error(idx, e))
}

fn parse_date_column(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<Option<NaiveDate>> {
    let text: Option<String> = row.get(idx)?;
    text.map(|t| NaiveDate::parse_from_str(&t, DATE_FORMAT).map_err(|e| conversion_error(idx, e)))
        .transpose()
}

pub(super) fn parse_timestamp_column(
    row: &rusqlite::Row<'_>,
    idx: usize,
) -> rusqlite::Result<Option<DateTime<Utc>>> {
    let text: Option<String> = row.get(idx)?;
    text.map(|t| {
        DateTime::parse_from_rfc3339(&t)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(|e| conversion_error(idx, e))
    })
    .transpose()
}

/// Deserializes a reservation from a row.
///
/// Expects row fields in this order: id, `from_date`, `to_date`, `room_id`, `deleted_at`
fn row_to_reservation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reservation> {
    let id = ReservationId::from(parse_uuid_column(row, 0)?);
    let from_date = parse_date_column(row, 1)?;
    let to_date = parse_date_column(row, 2)?;
    let room_id = RoomId::from(parse_uuid_column(row, 3)?);
    let deleted_at = parse_timestamp_column(row, 4)?;

    Reservation::builder(room_id)
        .id(id)
        .from_date(from_date)
        .to_date(to_date)
        .deleted_at(deleted_at)
        .build()
        .map_err(|e| conversion_error(1, e))
}

impl Database {
    /// Gets a reservation by id using an existing connection or transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is malformed.
    pub fn get_reservation(conn: &Connection, id: ReservationId) -> Result<Option<Reservation>> {
        conn.query_row(SELECT_RESERVATION, [id.to_string()], row_to_reservation)
            .optional()
            .map_err(Error::from)
    }

    /// Lists reservations matching `filter`, ordered by `from_date` then id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is malformed.
    pub fn list_reservations(
        conn: &Connection,
        filter: &ReservationFilter,
    ) -> Result<Vec<Reservation>> {
        let mut clauses: Vec<&str> = Vec::new();
        let mut values: Vec<String> = Vec::new();

        if !filter.include_deleted {
            clauses.push("deleted_at IS NULL");
        }
        if let Some(room_id) = filter.room_id {
            clauses.push("room_id = ?");
            values.push(room_id.to_string());
        }
        if let Some(before) = filter.before {
            clauses.push("from_date < ?");
            values.push(format_date(before));
        }
        if let Some(after) = filter.after {
            clauses.push("to_date > ?");
            values.push(format_date(after));
        }

        let mut sql = SELECT_COLUMNS.to_string();
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY from_date, id");

        let mut stmt = conn.prepare(&sql)?;
        let reservations = stmt
            .query_map(params_from_iter(values.iter()), row_to_reservation)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(reservations)
    }

    /// Finds an active reservation in `room_id` overlapping `[from, to]`,
    /// ignoring `exclude`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_overlapping(
        conn: &Connection,
        room_id: RoomId,
        from: NaiveDate,
        to: NaiveDate,
        exclude: ReservationId,
    ) -> Result<Option<ReservationId>> {
        let found = conn
            .query_row(
                SELECT_OVERLAPPING,
                params![
                    room_id.to_string(),
                    exclude.to_string(),
                    format_date(from),
                    format_date(to)
                ],
                |row| parse_uuid_column(row, 0),
            )
            .optional()?;
        Ok(found.map(ReservationId::from))
    }

    fn ensure_no_overlap(conn: &Connection, reservation: &Reservation) -> Result<()> {
        if !reservation.is_active() {
            return Ok(());
        }
        let Some((from, to)) = reservation.range().bounds() else {
            return Ok(());
        };

        match Self::find_overlapping(conn, reservation.room_id(), from, to, reservation.id())? {
            Some(existing) => Err(Error::ReservationConflict {
                details: format!("{OVERLAP_MESSAGE} ({existing})"),
            }),
            None => Ok(()),
        }
    }

    fn require_reservation(conn: &Connection, id: ReservationId) -> Result<Reservation> {
        Self::get_reservation(conn, id)?.ok_or_else(|| Error::NotFound {
            resource: format!("reservation {id}"),
        })
    }

    fn insert_reservation(conn: &Connection, reservation: &Reservation) -> Result<()> {
        if Self::get_reservation(conn, reservation.id())?.is_some() {
            return Err(Error::DuplicateId {
                id: reservation.id(),
            });
        }
        Self::ensure_no_overlap(conn, reservation)?;

        conn.execute(
            INSERT_RESERVATION,
            params_from_iter(Self::reservation_params(reservation)),
        )?;
        Ok(())
    }

    /// Applies one change against the current row. Runs inside the caller's
    /// transaction.
    fn apply_change(conn: &Connection, change: &Change) -> Result<Option<Reservation>> {
        match change {
            Change::Insert(reservation) => {
                Self::insert_reservation(conn, reservation)?;
                Ok(Some(reservation.clone()))
            }
            Change::Replace(replacement) => {
                let mut current = Self::require_reservation(conn, replacement.id())?;
                current.replace_fields(
                    replacement.from_date(),
                    replacement.to_date(),
                    replacement.room_id(),
                );
                Self::ensure_no_overlap(conn, &current)?;

                conn.execute(
                    REPLACE_FIELDS,
                    params![
                        current.id().to_string(),
                        current.from_date().map(format_date),
                        current.to_date().map(format_date),
                        current.room_id().to_string(),
                    ],
                )?;
                Ok(Some(current))
            }
            Change::SoftDelete { id, at } => {
                let rows = conn.execute(
                    SOFT_DELETE_RESERVATION,
                    params![id.to_string(), format_timestamp(*at)],
                )?;
                if rows == 0 {
                    Self::require_reservation(conn, *id)?;
                    return Err(Error::AlreadyDeleted { id: *id });
                }
                Self::get_reservation(conn, *id)
            }
            Change::Restore(id) => {
                let mut current = Self::require_reservation(conn, *id)?;
                if current.is_active() {
                    return Err(Error::BadRequest {
                        message: NOT_DELETED_MESSAGE.into(),
                    });
                }
                current.restore();
                Self::ensure_no_overlap(conn, &current)?;

                conn.execute(RESTORE_RESERVATION, [id.to_string()])?;
                Ok(Some(current))
            }
            Change::Remove(id) => {
                if conn.execute(DELETE_RESERVATION, [id.to_string()])? == 0 {
                    return Err(Error::NotFound {
                        resource: format!("reservation {id}"),
                    });
                }
                Ok(None)
            }
        }
    }

    fn reservation_params(reservation: &Reservation) -> [Option<String>; 5] {
        [
            Some(reservation.id().to_string()),
            reservation.from_date().map(format_date),
            reservation.to_date().map(format_date),
            Some(reservation.room_id().to_string()),
            reservation.deleted_at().map(format_timestamp),
        ]
    }
}

impl ReservationStore for Database {
    fn find_by_id(&self, id: ReservationId) -> Result<Option<Reservation>> {
        Self::get_reservation(&self.conn, id)
    }

    fn add(&mut self, reservation: &Reservation) -> Result<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        Self::insert_reservation(&tx, reservation)?;
        tx.commit()?;
        Ok(())
    }

    fn list_filtered(&self, filter: &ReservationFilter) -> Result<Vec<Reservation>> {
        Self::list_reservations(&self.conn, filter)
    }

    fn save(&mut self, reservation: &Reservation) -> Result<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        if Self::get_reservation(&tx, reservation.id())?.is_none() {
            return Err(Error::NotFound {
                resource: format!("reservation {}", reservation.id()),
            });
        }
        Self::ensure_no_overlap(&tx, reservation)?;

        tx.execute(
            UPDATE_RESERVATION,
            params_from_iter(Self::reservation_params(reservation)),
        )?;
        tx.commit()?;
        Ok(())
    }

    fn remove(&mut self, id: ReservationId) -> Result<bool> {
        let rows = self.conn.execute(DELETE_RESERVATION, [id.to_string()])?;
        Ok(rows > 0)
    }

    fn apply(&mut self, change: &Change, event: &AuditEvent) -> Result<Option<Reservation>> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        // Dropping the transaction on error rolls both writes back
        let stored = Self::apply_change(&tx, change)?;
        Self::insert_audit_event(&tx, event)?;

        tx.commit()?;
        Ok(stored)
    }

    fn health_check(&self) -> Result<()> {
        self.ping()
    }
}
