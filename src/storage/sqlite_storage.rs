use crate::{
    domain::{Card, CardId},
    error::{QuizbookError, Result},
    storage::Storage,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::{
    path::Path,
    sync::{Mutex, MutexGuard},
};
use tracing::{debug, info};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS cards (
    id             TEXT PRIMARY KEY,
    position       INTEGER NOT NULL,
    question       TEXT NOT NULL,
    answer         TEXT NOT NULL,
    major_category TEXT NOT NULL DEFAULT '',
    minor_category TEXT NOT NULL DEFAULT '',
    created_at     TEXT,
    updated_at     TEXT
);
CREATE TABLE IF NOT EXISTS meta (
    key   TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
";

/// Marks that a sequence has been saved at least once.
const SAVED_KEY: &str = "saved";

/// SQLite table mirror, one row per card with an explicit position
pub struct SqliteStorage {
    connection: Mutex<Connection>,
}

impl SqliteStorage {
    /// Opens (or creates) the database at `database_path`
    pub fn new(database_path: impl AsRef<Path>) -> Result<Self> {
        let connection = Connection::open(database_path)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let connection = Connection::open_in_memory()?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.connection
            .lock()
            .map_err(|_| QuizbookError::StorageError("database lock poisoned".to_string()))
    }
}

fn parse_timestamp(value: Option<String>) -> Result<Option<DateTime<Utc>>> {
    value
        .map(|raw| {
            DateTime::parse_from_rfc3339(&raw)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| QuizbookError::StorageError(format!("bad timestamp {raw:?}: {e}")))
        })
        .transpose()
}

#[async_trait]
impl Storage for SqliteStorage {
    async fn initialize(&self) -> Result<()> {
        self.lock()?.execute_batch(SCHEMA)?;
        info!("initialized sqlite storage");
        Ok(())
    }

    async fn is_initialized(&self) -> bool {
        let Ok(conn) = self.lock() else {
            return false;
        };
        conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('cards', 'meta')",
            [],
            |row| row.get::<_, i64>(0),
        )
        .map(|count| count == 2)
        .unwrap_or(false)
    }

    async fn load_cards(&self) -> Result<Option<Vec<Card>>> {
        let conn = self.lock()?;

        let saved: Option<String> = conn
            .query_row(
                "SELECT value FROM meta WHERE key = ?1",
                params![SAVED_KEY],
                |row| row.get(0),
            )
            .optional()?;
        if saved.is_none() {
            return Ok(None);
        }

        let mut stmt = conn.prepare(
            "SELECT id, question, answer, major_category, minor_category, created_at, updated_at
             FROM cards ORDER BY position",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, Option<String>>(5)?,
                row.get::<_, Option<String>>(6)?,
            ))
        })?;

        let mut cards = Vec::new();
        for row in rows {
            let (id, question, answer, major, minor, created_at, updated_at) = row?;
            let mut card = Card::new(CardId(id), question, answer, major, minor);
            card.created_at = parse_timestamp(created_at)?;
            card.updated_at = parse_timestamp(updated_at)?;
            cards.push(card);
        }

        debug!(count = cards.len(), "loaded cards");
        Ok(Some(cards))
    }

    async fn save_cards(&self, cards: &[Card]) -> Result<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM cards", [])?;
        {
            let mut insert = tx.prepare(
                "INSERT INTO cards
                 (id, position, question, answer, major_category, minor_category, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;
            for (position, card) in cards.iter().enumerate() {
                insert.execute(params![
                    card.id.as_str(),
                    position as i64,
                    card.prompt,
                    card.response,
                    card.major_category,
                    card.minor_category,
                    card.created_at.map(|t| t.to_rfc3339()),
                    card.updated_at.map(|t| t.to_rfc3339()),
                ])?;
            }
        }
        tx.execute(
            "INSERT OR REPLACE INTO meta (key, value) VALUES (?1, ?2)",
            params![SAVED_KEY, Utc::now().to_rfc3339()],
        )?;
        tx.commit()?;

        debug!(count = cards.len(), "saved cards");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM cards", [])?;
        conn.execute("DELETE FROM meta WHERE key = ?1", params![SAVED_KEY])?;
        Ok(())
    }
}
