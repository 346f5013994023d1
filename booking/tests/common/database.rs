//! Shared database test utilities.

use booking::database::{Database, DatabaseConfig};
use booking::{MemoryStore, Room, RoomId};

/// Creates a temporary test database that will be cleaned up when dropped.
///
/// Returns the database instance. The temporary directory is tied to the
/// database's lifetime through the test.
#[allow(dead_code)]
pub fn create_test_database() -> Database {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.db");
    let config = DatabaseConfig::new(path);
    let db = Database::open(config).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}

/// Creates a test database with one registered room.
#[allow(dead_code)]
pub fn database_with_room(name: &str) -> (Database, RoomId) {
    let mut db = create_test_database();
    let room = Room::new(name).unwrap();
    let id = room.id;
    db.upsert_room(&room).unwrap();
    (db, id)
}

/// Creates an in-memory store with one registered room.
#[allow(dead_code)]
pub fn memory_with_room(name: &str) -> (MemoryStore, RoomId) {
    let mut store = MemoryStore::new();
    let room = Room::new(name).unwrap();
    let id = room.id;
    store.add_room(room);
    (store, id)
}
