//! SQLite-backed rating store.
//!
//! One `kv` table holds the serialized host → rating mapping. Operations run
//! on a background thread via tokio-rusqlite; WAL mode keeps concurrent
//! readers cheap.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use tokio_rusqlite::{Connection, params, rusqlite};

use super::store::RatingStore;
use crate::{CachedRating, Error};

/// SQLite-backed implementation of [`RatingStore`].
#[derive(Clone, Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open a store at the specified path.
    ///
    /// Creates the file if it doesn't exist, applies performance pragmas,
    /// and creates the `kv` table.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let conn = Connection::open(path).await.map_err(|e| Error::Store(e.to_string()))?;
        Self::init(&conn).await?;
        Ok(Self { conn })
    }

    /// Open an in-memory store for testing.
    pub async fn open_in_memory() -> Result<Self, Error> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| Error::Store(e.to_string()))?;
        Self::init(&conn).await?;
        Ok(Self { conn })
    }

    async fn init(conn: &Connection) -> Result<(), Error> {
        conn.call(|conn| -> Result<(), Error> {
            conn.execute_batch(
                "PRAGMA journal_mode=WAL;
                 PRAGMA synchronous=NORMAL;
                 PRAGMA temp_store=MEMORY;",
            )?;
            conn.execute(
                "CREATE TABLE IF NOT EXISTS kv (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                )",
                [],
            )?;
            Ok(())
        })
        .await
        .map_err(Error::from)
    }
}

#[async_trait]
impl RatingStore for SqliteStore {
    async fn load(&self, key: &str) -> Result<Option<HashMap<String, CachedRating>>, Error> {
        let key = key.to_string();
        let json = self
            .conn
            .call(move |conn| -> Result<Option<String>, Error> {
                let result = conn.query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                    row.get::<_, String>(0)
                });
                match result {
                    Ok(v) => Ok(Some(v)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)?;

        match json {
            Some(json) => {
                let mapping = serde_json::from_str(&json).map_err(|e| Error::Store(e.to_string()))?;
                Ok(Some(mapping))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, key: &str, mapping: &HashMap<String, CachedRating>) -> Result<(), Error> {
        let key = key.to_string();
        let json = serde_json::to_string(mapping).map_err(|e| Error::Store(e.to_string()))?;
        let updated_at = chrono::Utc::now().to_rfc3339();
        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute(
                    "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
                     ON CONFLICT(key) DO UPDATE SET
                        value = excluded.value,
                        updated_at = excluded.updated_at",
                    params![key, json, updated_at],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    async fn remove(&self, key: &str) -> Result<(), Error> {
        let key = key.to_string();
        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }
}
