//! Progress report aggregation.
//!
//! A point-in-time summary of the whole profile, suitable for JSON export
//! and for the status display.

use serde::{Deserialize, Serialize};

use crate::calendar::DAY_MS;
use crate::profile::{ProfileState, Protection, Skills};
use crate::progression::{tables, Rank};
use crate::readiness::{self, Readiness};
use crate::session::SessionRecord;

/// History records included in a report.
const REPORT_HISTORY_LEN: usize = 50;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyStatus {
    pub weekly_xp: u64,
    pub weekly_cap: u64,
    pub weekly_rollover: u64,
    pub rollover_cap: u64,
    pub week_start: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressReport {
    pub generated_at: i64,
    pub start_date: i64,
    pub days_since_start: i64,

    pub level: u32,
    pub rank: Rank,
    pub xp: u64,
    pub xp_required: u64,
    pub gold: u64,

    pub weekly: WeeklyStatus,

    pub study_streak: u32,
    pub failure_streak: u32,

    pub protection: Protection,
    pub grace_days_remaining: u8,

    pub total_study_minutes: u64,
    pub total_study_hours: f64,
    pub total_sessions: u64,
    pub total_mocks: u64,

    pub skills: Skills,
    pub readiness: Readiness,

    pub history: Vec<SessionRecord>,
}

impl ProgressReport {
    /// Build a report from the profile at `now_ms`.
    pub fn build(profile: &ProfileState, now_ms: i64) -> Self {
        let days_since_start = ((now_ms - profile.start_date).max(0)) / DAY_MS;
        let grace_remaining = if profile.grace_month == crate::calendar::month_key(now_ms) {
            1u8.saturating_sub(profile.grace_days_used)
        } else {
            1
        };

        Self {
            generated_at: now_ms,
            start_date: profile.start_date,
            days_since_start,
            level: profile.level,
            rank: profile.rank(),
            xp: profile.xp,
            xp_required: profile.required_xp(),
            gold: profile.gold,
            weekly: WeeklyStatus {
                weekly_xp: profile.weekly_xp,
                weekly_cap: tables::weekly_cap(profile.level),
                weekly_rollover: profile.weekly_rollover,
                rollover_cap: tables::rollover_cap(profile.level),
                week_start: profile.week_start.clone(),
            },
            study_streak: profile.study_streak,
            failure_streak: profile.failure_streak,
            protection: profile.protection.clone(),
            grace_days_remaining: grace_remaining,
            total_study_minutes: profile.total_study_minutes,
            total_study_hours: profile.total_study_minutes as f64 / 60.0,
            total_sessions: profile.total_sessions,
            total_mocks: profile.total_mocks,
            skills: profile.skills.clone(),
            readiness: readiness::calculate(profile, now_ms),
            history: profile
                .session_history
                .iter()
                .take(REPORT_HISTORY_LEN)
                .cloned()
                .collect(),
        }
    }
}
