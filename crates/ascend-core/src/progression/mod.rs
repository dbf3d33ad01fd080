//! Progression ledger: XP admission, level normalization, gold.

pub mod ledger;
pub mod tables;

pub use tables::{FailurePenalty, Rank};
