use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension, Result as SqlResult};

use super::KvStore;

/// Single-table SQLite key-value store.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (creating if needed) the store at `path`, in WAL mode.
    pub fn open(path: &Path) -> SqlResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    log::warn!(target: "persistence", "could not create {}: {}", parent.display(), e);
                }
            }
        }
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Self::init(conn)
    }

    pub fn open_in_memory() -> SqlResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> SqlResult<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(Self { conn })
    }
}

impl KvStore for SqliteStore {
    fn get(&self, key: &str) -> Option<String> {
        let res = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| row.get(0))
            .optional();
        match res {
            Ok(value) => value,
            Err(e) => {
                log::warn!(target: "persistence", "kv read {} failed: {}", key, e);
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) {
        let res = self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        );
        if let Err(e) = res {
            log::warn!(target: "persistence", "kv write {} failed: {}", key, e);
        }
    }
}
