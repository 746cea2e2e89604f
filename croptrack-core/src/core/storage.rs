//! Durable key-value storage backing the record store.
//!
//! The persistence model is a single SQLite table of named slots, each
//! holding one self-describing text payload. [`crate::Tracker`] uses exactly
//! one slot for the whole record collection and replaces its contents on
//! every write.

use crate::Result;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;

pub struct Storage {
    conn: Connection,
}

impl Storage {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(include_str!("schema.sql"))?;
        Ok(Self { conn })
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;

        // Validate database structure
        let table_count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master
             WHERE type='table'
             AND name='slots'",
            [],
            |row| row.get(0),
        )?;

        if table_count != 1 {
            return Err(crate::CropTrackError::InvalidStore(
                "Not a valid Crop Tracker database".to_string(),
            ));
        }

        Ok(Self { conn })
    }

    /// Returns the payload stored under `key`, or `None` for an absent slot.
    pub fn read_slot(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM slots WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Replaces the entire contents of the slot named `key`.
    pub fn write_slot(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO slots (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            [key, value],
        )?;
        Ok(())
    }

    /// Removes the slot named `key` if present.
    pub fn delete_slot(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM slots WHERE key = ?1", [key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_create_storage() {
        let temp = NamedTempFile::new().unwrap();
        let storage = Storage::create(temp.path()).unwrap();

        assert_eq!(storage.read_slot("anything").unwrap(), None);
    }

    #[test]
    fn test_write_read_overwrite_slot() {
        let temp = NamedTempFile::new().unwrap();
        let storage = Storage::create(temp.path()).unwrap();

        storage.write_slot("data", "[]").unwrap();
        assert_eq!(storage.read_slot("data").unwrap().as_deref(), Some("[]"));

        storage.write_slot("data", "[1,2]").unwrap();
        assert_eq!(
            storage.read_slot("data").unwrap().as_deref(),
            Some("[1,2]")
        );
    }

    #[test]
    fn test_delete_slot_is_idempotent() {
        let temp = NamedTempFile::new().unwrap();
        let storage = Storage::create(temp.path()).unwrap();

        storage.write_slot("data", "[]").unwrap();
        storage.delete_slot("data").unwrap();
        storage.delete_slot("data").unwrap();
        assert_eq!(storage.read_slot("data").unwrap(), None);
    }

    #[test]
    fn test_open_existing_storage() {
        let temp = NamedTempFile::new().unwrap();

        {
            let storage = Storage::create(temp.path()).unwrap();
            storage.write_slot("data", "persisted").unwrap();
        }

        let storage = Storage::open(temp.path()).unwrap();
        assert_eq!(
            storage.read_slot("data").unwrap().as_deref(),
            Some("persisted")
        );
    }

    #[test]
    fn test_open_invalid_database() {
        let temp = NamedTempFile::new().unwrap();

        // An empty SQLite file has no slots table.
        Connection::open(temp.path()).unwrap();

        let result = Storage::open(temp.path());
        assert!(result.is_err());
    }
}
