//! The profile snapshot.
//!
//! `ProfileState` is the single unit of persisted state: it is loaded once,
//! mutated synchronously by engine operations, and written back to the
//! key-value store after every mutation. No operation reads the wall clock;
//! callers inject `now_ms` everywhere.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar;
use crate::session::{Session, SessionRecord, StudyPhase, Subject, MAX_AFFIRMATIONS_PER_WEEK};

/// Retained history length. Older records fall out of working memory.
pub const HISTORY_CAP: usize = 100;

/// One-time onboarding ritual: the user writes down what they are working
/// toward and what they refuse to become.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Awakening {
    pub completed: bool,
    #[serde(default)]
    pub vision: String,
    #[serde(default)]
    pub anti_vision: String,
}

/// Protection grant flavor, recorded by the granting mock kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtectionKind {
    Partial,
    Full,
}

/// A time-boxed decay shield granted by mock completion.
///
/// At most one grant is active; a new grant replaces the old one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Protection {
    pub active: bool,
    #[serde(default)]
    pub kind: Option<ProtectionKind>,
    #[serde(default)]
    pub expires_at: Option<i64>,
}

impl Protection {
    /// Grant window length: 24 hours.
    pub const WINDOW_MS: i64 = 24 * 60 * 60 * 1000;

    pub fn grant(kind: ProtectionKind, now_ms: i64) -> Self {
        Self {
            active: true,
            kind: Some(kind),
            expires_at: Some(now_ms + Self::WINDOW_MS),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// True while the grant is active and unexpired.
    pub fn shields(&self, now_ms: i64) -> bool {
        self.active && self.expires_at.map_or(false, |e| e > now_ms)
    }
}

/// Accumulated XP per subject. Only credited (post-cap) XP lands here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skills {
    pub quant: u64,
    pub reasoning: u64,
    pub english: u64,
    pub gk: u64,
}

impl Skills {
    pub fn add(&mut self, subject: Subject, amount: u64) {
        match subject {
            Subject::Quant => self.quant += amount,
            Subject::Reasoning => self.reasoning += amount,
            Subject::English => self.english += amount,
            Subject::Gk => self.gk += amount,
        }
    }

    pub fn get(&self, subject: Subject) -> u64 {
        match subject {
            Subject::Quant => self.quant,
            Subject::Reasoning => self.reasoning,
            Subject::English => self.english,
            Subject::Gk => self.gk,
        }
    }
}

/// Informational habit counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habits {
    pub daily_study: u64,
    pub daily_revision: u64,
    pub weekly_mock: u64,
    pub formula_review: u64,
}

/// One randomized target per calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyQuest {
    pub date: String,
    pub subject: Subject,
    pub phase: StudyPhase,
    pub xp: u64,
    pub completed: bool,
}

/// Append-only record of a spent reward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimedReward {
    pub id: Uuid,
    pub name: String,
    pub cost: u64,
    pub claimed_at: i64,
}

/// The whole persisted profile. See module docs for the mutation contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileState {
    /// Epoch ms of first launch.
    pub start_date: i64,
    #[serde(default)]
    pub awakening: Awakening,

    // Progress.
    pub level: u32,
    pub xp: u64,
    pub gold: u64,

    // Weekly tracking.
    pub weekly_xp: u64,
    pub weekly_rollover: u64,
    /// Monday date-key of the week currently being tracked.
    pub week_start: String,

    // Streaks.
    pub study_streak: u32,
    pub failure_streak: u32,
    #[serde(default)]
    pub last_study_date: Option<String>,
    /// Day-granularity counter driving the deepest penalty tier's cadence.
    pub consecutive_failure_days: u32,

    #[serde(default)]
    pub protection: Protection,

    // Grace days.
    pub grace_days_used: u8,
    /// Month key the grace allowance was last observed in.
    pub grace_month: String,

    #[serde(default)]
    pub skills: Skills,
    #[serde(default)]
    pub habits: Habits,

    // Session tracking.
    #[serde(default)]
    pub active_session: Option<Session>,
    #[serde(default)]
    pub session_history: Vec<SessionRecord>,

    // Mock tracking.
    #[serde(default)]
    pub last_mock_date: Option<i64>,
    pub total_mocks: u64,

    #[serde(default)]
    pub daily_quest: Option<DailyQuest>,

    // Affirmation tracking.
    pub weekly_affirmations: u32,
    pub affirmation_week_start: String,

    #[serde(default)]
    pub claimed_rewards: Vec<ClaimedReward>,

    // Lifetime stats.
    pub total_study_minutes: u64,
    pub total_sessions: u64,
}

impl ProfileState {
    /// Fresh profile anchored at `now_ms`.
    pub fn new(now_ms: i64) -> Self {
        Self {
            start_date: now_ms,
            awakening: Awakening::default(),
            level: 1,
            xp: 0,
            gold: 0,
            weekly_xp: 0,
            weekly_rollover: 0,
            week_start: calendar::week_start(now_ms),
            study_streak: 0,
            failure_streak: 0,
            last_study_date: None,
            consecutive_failure_days: 0,
            protection: Protection::default(),
            grace_days_used: 0,
            grace_month: calendar::month_key(now_ms),
            skills: Skills::default(),
            habits: Habits::default(),
            active_session: None,
            session_history: Vec::new(),
            last_mock_date: None,
            total_mocks: 0,
            daily_quest: None,
            weekly_affirmations: 0,
            affirmation_week_start: calendar::week_start(now_ms),
            claimed_rewards: Vec::new(),
            total_study_minutes: 0,
            total_sessions: 0,
        }
    }

    /// Prepend a finalized record, evicting beyond [`HISTORY_CAP`].
    pub fn push_history(&mut self, record: SessionRecord) {
        self.session_history.insert(0, record);
        self.session_history.truncate(HISTORY_CAP);
    }

    /// Zero the affirmation counter when the tracked week has rolled.
    pub fn roll_affirmation_week(&mut self, now_ms: i64) {
        let current = calendar::week_start(now_ms);
        if self.affirmation_week_start != current {
            self.weekly_affirmations = 0;
            self.affirmation_week_start = current;
        }
    }

    /// Whether another affirmation may be used this week.
    pub fn can_use_affirmation(&mut self, now_ms: i64) -> bool {
        self.roll_affirmation_week(now_ms);
        self.weekly_affirmations < MAX_AFFIRMATIONS_PER_WEEK
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{EvidenceKind, SessionKind};
    use chrono::{TimeZone, Utc};

    fn ms(y: i32, mo: u32, d: u32) -> i64 {
        Utc.with_ymd_and_hms(y, mo, d, 12, 0, 0)
            .unwrap()
            .timestamp_millis()
    }

    fn record(id: i64) -> SessionRecord {
        SessionRecord {
            id,
            kind: SessionKind::Study {
                subject: Subject::Quant,
                topic: "t".into(),
                phase: StudyPhase::Learning,
            },
            started_at: id,
            completed_at: id,
            duration_min: 30,
            evidence_kind: Some(EvidenceKind::Photo),
            image_id: None,
            notes: None,
            difficulty: None,
            mistakes: None,
            revision_needed: None,
            confidence: None,
            score: None,
            total_questions: None,
            correct: None,
            analysis: None,
            xp_earned: 10,
            gold_earned: 1,
        }
    }

    #[test]
    fn new_profile_anchors_week_and_month() {
        let p = ProfileState::new(ms(2026, 3, 4));
        assert_eq!(p.level, 1);
        assert_eq!(p.week_start, "2026-03-02");
        assert_eq!(p.grace_month, "2026-03");
        assert!(p.active_session.is_none());
    }

    #[test]
    fn history_is_most_recent_first_and_capped() {
        let mut p = ProfileState::new(0);
        for i in 0..(HISTORY_CAP as i64 + 10) {
            p.push_history(record(i));
        }
        assert_eq!(p.session_history.len(), HISTORY_CAP);
        assert_eq!(p.session_history[0].id, HISTORY_CAP as i64 + 9);
    }

    #[test]
    fn affirmation_allowance_resets_with_the_week() {
        let mut p = ProfileState::new(ms(2026, 3, 2));
        p.weekly_affirmations = MAX_AFFIRMATIONS_PER_WEEK;
        assert!(!p.can_use_affirmation(ms(2026, 3, 6)));
        // Next Monday.
        assert!(p.can_use_affirmation(ms(2026, 3, 9)));
        assert_eq!(p.weekly_affirmations, 0);
    }

    #[test]
    fn protection_shields_until_expiry() {
        let granted = Protection::grant(ProtectionKind::Full, 1_000);
        assert!(granted.shields(1_000 + Protection::WINDOW_MS - 1));
        assert!(!granted.shields(1_000 + Protection::WINDOW_MS));
        let mut cleared = granted.clone();
        cleared.clear();
        assert!(!cleared.shields(1_001));
        assert_eq!(cleared.kind, None);
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let mut p = ProfileState::new(ms(2026, 3, 2));
        p.push_history(record(1));
        p.push_history(record(2));
        p.skills.add(Subject::English, 55);
        p.protection = Protection::grant(ProtectionKind::Partial, ms(2026, 3, 2));
        let json = serde_json::to_string(&p).unwrap();
        let back: ProfileState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
        assert_eq!(back.session_history[0].id, 2);
    }
}
