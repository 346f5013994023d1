//! Database schema definitions and SQL constants.
//!
//! Dates are stored as `YYYY-MM-DD` text, timestamps as RFC 3339 text and
//! UUIDs in hyphenated lowercase form, so lexical order matches value order.

/// Current schema version for the database.
///
/// This version is stored in the metadata table and is used to ensure
/// compatibility between the database and the application.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the reservations table.
///
/// Soft-deleted rows keep their id, so the primary key also guarantees an
/// id is never reused.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id TEXT PRIMARY KEY NOT NULL,
        from_date TEXT,
        to_date TEXT,
        room_id TEXT NOT NULL,
        deleted_at TEXT
    )";

/// SQL statement to create the mirrored rooms table.
pub const CREATE_ROOMS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS rooms (
        id TEXT PRIMARY KEY NOT NULL,
        name TEXT NOT NULL,
        storey_id TEXT,
        deleted_at TEXT
    )";

/// SQL statement to create the audit log table.
pub const CREATE_AUDIT_LOG_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS audit_log (
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        operation TEXT NOT NULL,
        object_type TEXT NOT NULL,
        object_id TEXT NOT NULL,
        principal TEXT NOT NULL,
        recorded_at TEXT NOT NULL
    )";

/// Index serving the per-room overlap scan.
pub const CREATE_ROOM_RANGE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_room_range ON reservations(room_id, from_date, to_date)";

/// Index serving the ordered listing.
pub const CREATE_FROM_DATE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_from_date ON reservations(from_date, id)";

/// Index serving audit lookups by object.
pub const CREATE_AUDIT_OBJECT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_audit_log_object ON audit_log(object_id)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";
