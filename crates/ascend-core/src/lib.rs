//! # Ascend Core Library
//!
//! This library provides the core business logic for Ascend, a single-user
//! exam-preparation progression tracker. It implements a CLI-first
//! philosophy where all operations are available via a standalone CLI
//! binary over this library; any richer front end stays a thin layer over
//! the same core.
//!
//! ## Architecture
//!
//! - **Progression Ledger**: weekly-cap-aware XP admission, level and rank
//!   bookkeeping, gold
//! - **Session Engine**: the study/mock lifecycle state machine with an
//!   explicit evidence-confirmation stage
//! - **Failure Policy**: escalating penalties, streaks, protection grants
//! - **Daily Maintenance**: idempotent once-per-day decay / grace / weekly
//!   rollover / quest pass
//! - **Storage**: SQLite key-value snapshot store and evidence blob store
//!
//! Every operation takes the current timestamp as a parameter and random
//! draws go through an injected generator, so the whole engine is
//! deterministic under test.
//!
//! ## Key Components
//!
//! - [`ProfileState`]: the persisted profile snapshot all operations mutate
//! - [`Database`]: snapshot, marker, and evidence-blob persistence
//! - [`ProgressReport`]: point-in-time export of the whole profile
//! - [`CoreError`]: top-level error type

pub mod calendar;
pub mod config;
pub mod error;
pub mod maintenance;
pub mod policy;
pub mod profile;
pub mod progression;
pub mod quest;
pub mod readiness;
pub mod report;
pub mod rewards;
pub mod session;
pub mod storage;

pub use config::{Config, RewardDef};
pub use error::{
    ConfigError, CoreError, LedgerError, Result, SessionError, StorageError, ValidationError,
};
pub use maintenance::MaintenanceReport;
pub use policy::{FailureReason, FailureSummary};
pub use profile::{
    Awakening, ClaimedReward, DailyQuest, Habits, ProfileState, Protection, ProtectionKind, Skills,
};
pub use progression::Rank;
pub use readiness::Readiness;
pub use report::ProgressReport;
pub use session::engine::FinalizeSummary;
pub use session::{
    Confidence, EvidenceInput, EvidenceKind, MockKind, MockScore, Session, SessionKind,
    SessionRecord, SessionStage, StudyPhase, StudyReflection, Subject,
};
pub use storage::{BlobStore, BlobUsage, Database, StateStore};
