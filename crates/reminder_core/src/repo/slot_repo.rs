//! Key-value slot contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide get/put/remove over named text slots.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `write_slot` overwrites any previous value for the key.
//! - A missing key reads as `None`, never as an error.

use crate::db::DbResult;
use rusqlite::{params, Connection, OptionalExtension};

/// Storage for named text slots.
pub trait SlotRepository {
    fn read_slot(&self, key: &str) -> DbResult<Option<String>>;
    fn write_slot(&self, key: &str, value: &str) -> DbResult<()>;
    /// Returns whether a value was present.
    fn remove_slot(&self, key: &str) -> DbResult<bool>;
}

/// SQLite-backed slot repository over the `slots` table.
pub struct SqliteSlotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSlotRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SlotRepository for SqliteSlotRepository<'_> {
    fn read_slot(&self, key: &str) -> DbResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM slots WHERE key = ?1;", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn write_slot(&self, key: &str, value: &str) -> DbResult<()> {
        self.conn.execute(
            "INSERT INTO slots (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_slot(&self, key: &str) -> DbResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM slots WHERE key = ?1;", [key])?;
        Ok(changed > 0)
    }
}
