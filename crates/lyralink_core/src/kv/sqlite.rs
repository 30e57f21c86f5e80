//! Durable key-value backend on a single SQLite table.
//!
//! # Invariants
//! - Returned stores have migrations fully applied.
//! - One row per key; writes are upserts.

use super::migrations::{apply_migrations, current_user_version};
use super::{KeyValueStore, KvError, KvResult};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::{Duration, Instant};

/// SQLite-backed [`KeyValueStore`].
pub struct SqliteKvStore {
    conn: Connection,
}

impl SqliteKvStore {
    /// Opens (or creates) the store file and applies pending migrations.
    ///
    /// # Side effects
    /// - Emits `kv_open` events with duration and status.
    pub fn open(path: impl AsRef<Path>) -> KvResult<Self> {
        Self::bootstrap("file", || Connection::open(path))
    }

    /// Opens a throwaway in-memory store.
    pub fn open_in_memory() -> KvResult<Self> {
        Self::bootstrap("memory", Connection::open_in_memory)
    }

    /// Returns the schema version recorded in the database.
    pub fn schema_version(&self) -> KvResult<u32> {
        current_user_version(&self.conn)
    }

    fn bootstrap(
        mode: &'static str,
        connect: impl FnOnce() -> rusqlite::Result<Connection>,
    ) -> KvResult<Self> {
        let started_at = Instant::now();
        info!("event=kv_open module=kv status=start mode={mode}");

        let result = connect()
            .map_err(KvError::from)
            .and_then(|mut conn| configure(&mut conn).map(|()| conn));

        match result {
            Ok(conn) => {
                info!(
                    "event=kv_open module=kv status=ok mode={mode} duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(Self { conn })
            }
            Err(err) => {
                error!(
                    "event=kv_open module=kv status=error mode={mode} duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}

fn configure(conn: &mut Connection) -> KvResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;
    apply_migrations(conn)?;
    Ok(())
}

impl KeyValueStore for SqliteKvStore {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1;", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> KvResult<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}
