//! Persistence: durable key-value snapshots and the evidence blob store.
//!
//! The engine itself never touches storage; callers load the snapshot, run
//! operations, and save it back. The two narrow interfaces here are the
//! only seams the core exposes to persistence.

pub mod database;

pub use database::{BlobUsage, Database};

use std::path::PathBuf;

use crate::error::StorageError;

/// Evidence blobs older than this are eligible for the cleanup sweep.
pub const BLOB_RETENTION_DAYS: i64 = 90;

/// Durable key-value store for the profile snapshot and small markers.
pub trait StateStore {
    fn kv_get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn kv_set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Opaque evidence blob store keyed by an integer id. Payload encoding and
/// compression are the producer's concern, never inspected here.
pub trait BlobStore {
    fn put(
        &self,
        bytes: &[u8],
        session_id: i64,
        kind: &str,
        now_ms: i64,
    ) -> Result<i64, StorageError>;
    fn get(&self, image_id: i64) -> Result<Option<Vec<u8>>, StorageError>;
    /// Delete blobs stored before the cutoff; returns how many went.
    fn delete_older_than(&self, cutoff_ms: i64) -> Result<u64, StorageError>;
    fn usage(&self) -> Result<BlobUsage, StorageError>;
}

/// Returns `~/.config/ascend[-dev]/` based on ASCEND_ENV.
///
/// Set ASCEND_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("ASCEND_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("ascend-dev")
    } else {
        base_dir.join("ascend")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
