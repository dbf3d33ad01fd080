//! Core error types for ascend-core.
//!
//! This module defines the error hierarchy using thiserror. Errors are
//! grouped by the subsystem that raises them; `CoreError` is the top-level
//! type returned across the public API.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for ascend-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Session lifecycle errors
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Input validation errors (recoverable, state unchanged)
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Ledger errors
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Session lifecycle errors.
///
/// `MinimumTimeNotMet` is the only variant that is raised *after* a state
/// mutation: the failure penalty has already been applied and the active
/// session discarded by the time the caller sees it.
#[derive(Error, Debug)]
pub enum SessionError {
    /// No session is currently in flight
    #[error("No active session")]
    NoActiveSession,

    /// A session is already in flight; finish or cancel it first
    #[error("A session is already in progress (started at {started_at})")]
    SessionInProgress { started_at: i64 },

    /// Operation called on the wrong session kind
    #[error("Active session is a {actual} session, expected {expected}")]
    WrongKind {
        expected: &'static str,
        actual: &'static str,
    },

    /// Operation called in the wrong lifecycle stage
    #[error("Session is in the {actual} stage, expected {expected}")]
    InvalidStage {
        expected: &'static str,
        actual: &'static str,
    },

    /// Finalize called before evidence was confirmed
    #[error("Evidence has not been attached to this session")]
    EvidenceMissing,

    /// Session ran shorter than the enforced minimum.
    /// The failure penalty has been applied and the session discarded.
    #[error("Minimum time not met: {actual_min} min of {required_min} min required")]
    MinimumTimeNotMet { required_min: u64, actual_min: u64 },
}

/// Input validation errors. State is never mutated on these paths, so the
/// caller can re-prompt and retry.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Reflection notes below the minimum length
    #[error("Notes must be at least {min} characters (got {len})")]
    NotesTooShort { min: usize, len: usize },

    /// Affirmation text below the minimum length
    #[error("Affirmation must be at least {min} characters (got {len})")]
    AffirmationTooShort { min: usize, len: usize },

    /// Weekly affirmation allowance exhausted
    #[error("Affirmation limit reached ({limit} per week)")]
    AffirmationLimitReached { limit: u32 },

    /// This session requires visual proof (audit draw or mock evidence)
    #[error("Photo or screenshot evidence is required for this session")]
    PhotoEvidenceRequired,

    /// Missing required input field
    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Ledger errors.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Reward claim exceeds the gold balance; state unchanged
    #[error("Insufficient gold: {cost} required, {gold} available")]
    InsufficientGold { cost: u64, gold: u64 },
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the database
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Snapshot could not be encoded or decoded
    #[error("Snapshot serialization failed: {0}")]
    Snapshot(String),

    /// Referenced blob does not exist
    #[error("No blob stored under id {0}")]
    BlobMissing(i64),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::QueryFailed(err.to_string())
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Storage(StorageError::from(err))
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
