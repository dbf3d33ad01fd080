use ascend_core::calendar::DAY_MS;
use ascend_core::storage::{BlobStore, BLOB_RETENTION_DAYS};
use ascend_core::Database;
use clap::Subcommand;

use super::common;

#[derive(Subcommand)]
pub enum StorageAction {
    /// Evidence blob count and total bytes
    Usage,
    /// Delete evidence blobs past the retention window
    Cleanup,
}

pub fn run(action: StorageAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        StorageAction::Usage => {
            let usage = db.usage()?;
            println!("{}", serde_json::to_string_pretty(&usage)?);
        }
        StorageAction::Cleanup => {
            let cutoff = common::now_ms() - BLOB_RETENTION_DAYS * DAY_MS;
            let deleted = db.delete_older_than(cutoff)?;
            println!("{{\"deleted\": {deleted}}}");
        }
    }

    Ok(())
}
