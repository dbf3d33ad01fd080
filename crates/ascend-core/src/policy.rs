//! Failure penalties, streak bookkeeping, and protection removal.
//!
//! Penalties escalate with the consecutive-failure streak; the deepest tier
//! trades a fixed level loss for a cadence of one level every second
//! consecutive failure day. The streak only clears on a successful
//! finalize.

use serde::{Deserialize, Serialize};

use crate::calendar::{self, DAY_MS};
use crate::profile::ProfileState;
use crate::progression::tables;

/// Why a session was registered as failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureReason {
    MinimumTime,
    Cancelled,
}

/// What a failure registration cost the profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureSummary {
    pub reason: FailureReason,
    pub failure_streak: u32,
    pub xp_lost: u64,
    pub levels_lost: u32,
    pub protection_removed: bool,
}

impl ProfileState {
    /// Apply the penalty for one more consecutive failure.
    pub fn register_failure(&mut self, reason: FailureReason) -> FailureSummary {
        self.failure_streak += 1;
        self.consecutive_failure_days += 1;

        let penalty = tables::failure_penalty(self.failure_streak.min(4));

        self.remove_xp(penalty.xp_loss);

        let had_protection = self.protection.active;
        if penalty.remove_protection {
            self.protection.clear();
        }

        let levels_lost = if penalty.level_loss > 0 {
            penalty.level_loss
        } else if penalty.half_level_cadence && self.consecutive_failure_days % 2 == 0 {
            1
        } else {
            0
        };
        if levels_lost > 0 {
            self.level_down(levels_lost);
        }

        FailureSummary {
            reason,
            failure_streak: self.failure_streak,
            xp_lost: penalty.xp_loss,
            levels_lost,
            protection_removed: penalty.remove_protection && had_protection,
        }
    }

    /// Clear failure counters after a successful finalize. Applies to both
    /// study and mock successes.
    pub fn clear_failure_streak(&mut self) {
        self.failure_streak = 0;
        self.consecutive_failure_days = 0;
    }

    /// Advance the study streak for a qualifying completion at `now_ms`.
    ///
    /// Counts at most once per calendar day; a previous study exactly one
    /// day earlier continues the streak, anything else restarts it at 1.
    pub fn update_study_streak(&mut self, now_ms: i64) {
        let today = calendar::date_key(now_ms);
        if self.last_study_date.as_deref() == Some(today.as_str()) {
            return;
        }

        let yesterday = calendar::date_key(now_ms - DAY_MS);
        if self.last_study_date.as_deref() == Some(yesterday.as_str()) {
            self.study_streak += 1;
        } else {
            self.study_streak = 1;
        }

        self.last_study_date = Some(today);
    }
}
