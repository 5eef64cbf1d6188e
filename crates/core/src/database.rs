use std::collections::BTreeMap;

use anyhow::{Context, Result};
use rusqlite::{named_params, Connection, OptionalExtension};
use tracing::warn;

use crate::config::AppConfig;
use crate::model::{DayRecordSet, StoredSlot, TaskRecord};

/// SQLite-backed string key-value store. Each row holds one calendar date's
/// slots as a JSON document under its `taskData-YYYY-MM-DD` key.
pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn initialize(config: &AppConfig) -> Result<Self> {
        let conn = Connection::open(config.db_path()).with_context(|| {
            format!("Failed to open database at {}", config.db_path().display())
        })?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to configure SQLite WAL mode")?;

        let db = Self { conn };
        db.apply_migrations()?;
        Ok(db)
    }

    /// Read the day record set stored under `key`. A missing key reads as an
    /// empty set. An unparseable value is purged and reads as empty, so
    /// corrupt data never blocks a caller and is never re-encountered.
    pub fn load_day(&self, key: &str) -> Result<DayRecordSet> {
        let raw: Option<String> = self
            .conn
            .query_row("SELECT value FROM slots WHERE key = :key", named_params![":key": key], |row| {
                row.get(0)
            })
            .optional()?;

        let Some(raw) = raw else {
            return Ok(DayRecordSet::new());
        };

        match serde_json::from_str::<BTreeMap<String, StoredSlot>>(&raw) {
            Ok(stored) => Ok(stored
                .into_iter()
                .map(|(label, slot)| (label, TaskRecord::from(slot)))
                .collect()),
            Err(err) => {
                warn!(key, error = %err, "purging corrupt day record set");
                self.remove(key)?;
                Ok(DayRecordSet::new())
            }
        }
    }

    /// Persist the full set under `key`, overwriting any previous value.
    /// Callers read-modify-write. An empty set deletes the key so that "all
    /// slots removed" and "no data" stay indistinguishable.
    pub fn save_day(&self, key: &str, slots: &DayRecordSet) -> Result<()> {
        if slots.is_empty() {
            return self.remove(key);
        }

        let value = serde_json::to_string(slots)?;
        self.conn.execute(
            "INSERT INTO slots (key, value) VALUES (:key, :value)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            named_params![":key": key, ":value": value],
        )?;
        Ok(())
    }

    /// Delete the given keys entirely. Used by clear-week.
    pub fn remove_all(&self, keys: &[String]) -> Result<()> {
        for key in keys {
            self.remove(key)?;
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM slots WHERE key = :key", named_params![":key": key])?;
        Ok(())
    }

    fn apply_migrations(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS slots (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
             );",
        )?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn put_raw(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO slots (key, value) VALUES (:key, :value)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            named_params![":key": key, ":value": value],
        )?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn get_raw(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .conn
            .query_row("SELECT value FROM slots WHERE key = :key", named_params![":key": key], |row| {
                row.get(0)
            })
            .optional()?)
    }
}
