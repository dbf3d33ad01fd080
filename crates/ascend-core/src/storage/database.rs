//! SQLite-backed state and blob storage.
//!
//! One database file holds:
//! - a `kv` table for the profile snapshot, the maintenance marker, and the
//!   export-reminder timestamp
//! - an `images` table for evidence blobs, indexed by timestamp for the
//!   retention sweep

use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

use super::{data_dir, BlobStore, StateStore};
use crate::calendar::DAY_MS;
use crate::error::StorageError;
use crate::profile::ProfileState;

const PROFILE_KEY: &str = "profile_state";
const MAINTENANCE_KEY: &str = "last_maintenance_date";
const EXPORT_KEY: &str = "last_export_at";

/// Blob-store occupancy summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobUsage {
    pub count: u64,
    pub total_bytes: u64,
}

/// SQLite database for profile snapshots and evidence blobs.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `~/.config/ascend/ascend.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    pub fn open() -> Result<Self, StorageError> {
        let dir = data_dir().map_err(|e| StorageError::QueryFailed(e.to_string()))?;
        Self::open_at(&dir.join("ascend.db"))
    }

    /// Open a database at an explicit path (used by tests with tempdirs).
    pub fn open_at(path: &std::path::Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(|source| StorageError::OpenFailed {
            path: ":memory:".into(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS kv (
                    key   TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS images (
                    id         INTEGER PRIMARY KEY AUTOINCREMENT,
                    session_id INTEGER NOT NULL,
                    kind       TEXT NOT NULL,
                    stored_at  INTEGER NOT NULL,
                    size       INTEGER NOT NULL,
                    blob       BLOB NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_images_stored_at ON images(stored_at);
                CREATE INDEX IF NOT EXISTS idx_images_session_id ON images(session_id);",
            )
            .map_err(|e| StorageError::MigrationFailed(e.to_string()))
    }

    // ── Profile snapshot ─────────────────────────────────────────────

    /// Load the persisted profile, or `None` on first launch.
    pub fn load_profile(&self) -> Result<Option<ProfileState>, StorageError> {
        match self.kv_get(PROFILE_KEY)? {
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|e| StorageError::Snapshot(e.to_string())),
            None => Ok(None),
        }
    }

    /// Persist the profile snapshot. Called after every mutation.
    pub fn save_profile(&self, profile: &ProfileState) -> Result<(), StorageError> {
        let json =
            serde_json::to_string(profile).map_err(|e| StorageError::Snapshot(e.to_string()))?;
        self.kv_set(PROFILE_KEY, &json)
    }

    // ── Markers ──────────────────────────────────────────────────────

    /// Date key of the last completed maintenance run.
    pub fn maintenance_marker(&self) -> Result<Option<String>, StorageError> {
        self.kv_get(MAINTENANCE_KEY)
    }

    pub fn set_maintenance_marker(&self, date: &str) -> Result<(), StorageError> {
        self.kv_set(MAINTENANCE_KEY, date)
    }

    /// True when the export reminder cadence has elapsed.
    pub fn export_due(&self, now_ms: i64, reminder_days: u32) -> Result<bool, StorageError> {
        let last: i64 = self
            .kv_get(EXPORT_KEY)?
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        Ok(now_ms - last >= reminder_days as i64 * DAY_MS)
    }

    pub fn mark_exported(&self, now_ms: i64) -> Result<(), StorageError> {
        self.kv_set(EXPORT_KEY, &now_ms.to_string())
    }
}

impl StateStore for Database {
    fn kv_get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(StorageError::from)
    }

    fn kv_set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn
            .execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
            .map(|_| ())
            .map_err(StorageError::from)
    }
}

impl BlobStore for Database {
    fn put(
        &self,
        bytes: &[u8],
        session_id: i64,
        kind: &str,
        now_ms: i64,
    ) -> Result<i64, StorageError> {
        self.conn.execute(
            "INSERT INTO images (session_id, kind, stored_at, size, blob)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![session_id, kind, now_ms, bytes.len() as i64, bytes],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get(&self, image_id: i64) -> Result<Option<Vec<u8>>, StorageError> {
        self.conn
            .query_row(
                "SELECT blob FROM images WHERE id = ?1",
                params![image_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(StorageError::from)
    }

    fn delete_older_than(&self, cutoff_ms: i64) -> Result<u64, StorageError> {
        let deleted = self.conn.execute(
            "DELETE FROM images WHERE stored_at < ?1",
            params![cutoff_ms],
        )?;
        Ok(deleted as u64)
    }

    fn usage(&self) -> Result<BlobUsage, StorageError> {
        self.conn
            .query_row(
                "SELECT COUNT(*), COALESCE(SUM(size), 0) FROM images",
                [],
                |row| {
                    Ok(BlobUsage {
                        count: row.get::<_, i64>(0)? as u64,
                        total_bytes: row.get::<_, i64>(1)? as u64,
                    })
                },
            )
            .map_err(StorageError::from)
    }
}
