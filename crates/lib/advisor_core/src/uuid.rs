// Helper for generating UUIDv7 (timestamp-sortable UUIDs)
//
// Message rows are ordered by created_at; two inserts in the same
// transaction timestamp tie, so message ids are UUIDv7 generated app-side
// and used as the secondary sort key.

use uuid::Uuid;

/// Generate a new UUIDv7 (timestamp-sortable).
pub fn uuidv7() -> Uuid {
    Uuid::now_v7()
}
