//! Audit log persistence.
//!
//! Events are written by the same transaction as the change they describe.

use rusqlite::{params, Connection};

use crate::audit::{AuditEvent, AuditOperation};
use crate::error::Result;

use super::connection::Database;
use super::reservations::{format_timestamp, parse_timestamp_column};

const INSERT_AUDIT_EVENT: &str = r"
    INSERT INTO audit_log (operation, object_type, object_id, principal, recorded_at)
    VALUES (?1, ?2, ?3, ?4, ?5)
";

const LIST_AUDIT_EVENTS: &str = r"
    SELECT operation, object_type, object_id, principal, recorded_at
    FROM audit_log
    WHERE ?1 IS NULL OR object_id = ?1
    ORDER BY seq
";

fn row_to_event(row: &rusqlite::Row<'_>) -> rusqlite::Result<AuditEvent> {
    let operation: String = row.get(0)?;
    let operation = operation.parse::<AuditOperation>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let recorded_at = parse_timestamp_column(row, 4)?.ok_or(rusqlite::Error::InvalidColumnType(
        4,
        "recorded_at".into(),
        rusqlite::types::Type::Null,
    ))?;

    Ok(AuditEvent {
        operation,
        object_type: row.get(1)?,
        object_id: row.get(2)?,
        principal: row.get(3)?,
        recorded_at,
    })
}

impl Database {
    /// Lists audit events in recording order, optionally for one object.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is malformed.
    pub fn list_audit_events(conn: &Connection, object_id: Option<&str>) -> Result<Vec<AuditEvent>> {
        let mut stmt = conn.prepare(LIST_AUDIT_EVENTS)?;
        let events = stmt
            .query_map([object_id], row_to_event)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(events)
    }

    /// Appends one event using an open connection or transaction.
    pub(super) fn insert_audit_event(conn: &Connection, event: &AuditEvent) -> Result<()> {
        conn.execute(
            INSERT_AUDIT_EVENT,
            params![
                event.operation.as_str(),
                event.object_type,
                event.object_id,
                event.principal,
                format_timestamp(event.recorded_at),
            ],
        )?;
        Ok(())
    }
}
