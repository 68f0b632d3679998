use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use rusqlite::{Connection, params};

use crate::models::{FoodHistoryEntry, NewFoodHistoryEntry, validate_entry};

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        let db = Database { conn };
        db.migrate()?;
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Database { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        let version: i64 = self
            .conn
            .pragma_query_value(None, "user_version", |row| row.get(0))?;

        if version < 1 {
            self.conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS food_history (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    food_name TEXT NOT NULL,
                    calories INTEGER NOT NULL,
                    created_at TEXT NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_food_history_created_at ON food_history(created_at);

                PRAGMA user_version = 1;",
            )?;
        }

        Ok(())
    }

    fn entry_from_row(row: &rusqlite::Row) -> rusqlite::Result<FoodHistoryEntry> {
        Ok(FoodHistoryEntry {
            id: row.get(0)?,
            food_name: row.get(1)?,
            calories: row.get(2)?,
            created_at: row.get(3)?,
        })
    }

    /// Append a new history entry stamped with the current local time.
    pub fn insert_entry(&self, entry: &NewFoodHistoryEntry) -> Result<FoodHistoryEntry> {
        validate_entry(entry)?;
        let now = Local::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO food_history (food_name, calories, created_at)
             VALUES (?1, ?2, ?3)",
            params![entry.food_name, entry.calories, now],
        )?;
        let id = self.conn.last_insert_rowid();
        self.get_entry(id)
    }

    pub fn get_entry(&self, id: i64) -> Result<FoodHistoryEntry> {
        self.conn
            .query_row(
                "SELECT id, food_name, calories, created_at FROM food_history WHERE id = ?1",
                params![id],
                Self::entry_from_row,
            )
            .context("History entry not found")
    }

    /// All entries, newest first. Same-second appends keep reverse
    /// insertion order via the id tie-break.
    pub fn list_entries_desc(&self) -> Result<Vec<FoodHistoryEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, food_name, calories, created_at FROM food_history
             ORDER BY created_at DESC, id DESC",
        )?;
        let entries = stmt
            .query_map([], Self::entry_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    /// All entries in insertion order, for consumers that only aggregate.
    pub fn list_entries(&self) -> Result<Vec<FoodHistoryEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, food_name, calories, created_at FROM food_history ORDER BY id",
        )?;
        let entries = stmt
            .query_map([], Self::entry_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    pub fn count_entries(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM food_history", [], |row| row.get(0))?;
        Ok(count)
    }
}
