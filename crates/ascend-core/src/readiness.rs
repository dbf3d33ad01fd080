//! Readiness index.
//!
//! A deliberately rough estimate of exam readiness: a rank-based floor
//! nudged by streaks, mock volume, and trailing-window consistency signals,
//! reported as a bounded percentage with a +-5 range. Hidden entirely at
//! low ranks and during failure streaks so it never rewards gaming.

use serde::{Deserialize, Serialize};

use crate::calendar::{self, DAY_MS};
use crate::profile::ProfileState;
use crate::progression::Rank;
use crate::session::EvidenceKind;
use std::collections::HashSet;

/// Upper bound on the reported percentage. Never promise certainty.
pub const MAX_PERCENTAGE: i32 = 95;

/// Trailing window for consistency, in days.
const CONSISTENCY_WINDOW_DAYS: i64 = 28;
/// Minimum study sessions in the window before a ratio is computed.
const CONSISTENCY_MIN_SESSIONS: usize = 16;
/// Trailing window for affirmation-overuse and confidence signals.
const SIGNAL_WINDOW_DAYS: i64 = 14;

/// Why the index is hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HiddenReason {
    /// Below rank C there is not enough signal to be honest about.
    TooEarly,
    /// Mid-failure-streak numbers would only mislead.
    FailureStreak,
}

/// Computed readiness, visible or hidden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Readiness {
    Hidden {
        reason: HiddenReason,
    },
    Visible {
        percentage: u8,
        range_low: u8,
        range_high: u8,
        base: u8,
        modifiers: i32,
    },
}

impl Readiness {
    pub fn is_visible(&self) -> bool {
        matches!(self, Readiness::Visible { .. })
    }
}

fn base_percentage(rank: Rank) -> i32 {
    match rank {
        Rank::E => 5,
        Rank::D => 15,
        Rank::C => 30,
        Rank::B => 55,
        Rank::A => 75,
        Rank::S => 90,
    }
}

/// Compute the readiness index at `now_ms`.
pub fn calculate(profile: &ProfileState, now_ms: i64) -> Readiness {
    let rank = profile.rank();
    if rank < Rank::C {
        return Readiness::Hidden {
            reason: HiddenReason::TooEarly,
        };
    }
    if profile.failure_streak > 0 {
        return Readiness::Hidden {
            reason: HiddenReason::FailureStreak,
        };
    }

    let base = base_percentage(rank);
    let mut modifiers = 0i32;

    for milestone in [7, 14, 30] {
        if profile.study_streak >= milestone {
            modifiers += 5;
        }
    }

    for (count, bonus) in [(10, 3), (25, 5), (50, 7)] {
        if profile.total_mocks >= count {
            modifiers += bonus;
        }
    }

    let consistency = weekly_consistency(profile, now_ms);
    if consistency >= 0.8 {
        modifiers += 5;
    }
    if consistency >= 0.9 {
        modifiers += 5;
    }

    let affirmations = recent_affirmations(profile, now_ms);
    if affirmations >= 3 {
        modifiers -= 5;
    }
    if affirmations >= 6 {
        modifiers -= 10;
    }

    let weak = weak_confidence_sessions(profile, now_ms);
    if weak >= 5 {
        modifiers -= 5;
    }
    if weak >= 10 {
        modifiers -= 10;
    }

    let percentage = (base + modifiers).clamp(0, MAX_PERCENTAGE);
    let range_low = (percentage - 5).clamp(0, MAX_PERCENTAGE);
    let range_high = (percentage + 5).clamp(0, MAX_PERCENTAGE);

    Readiness::Visible {
        percentage: percentage as u8,
        range_low: range_low as u8,
        range_high: range_high as u8,
        base: base as u8,
        modifiers,
    }
}

/// Fraction of the trailing 28 days with at least one study completion.
/// Returns 0.0 below the minimum sample size.
fn weekly_consistency(profile: &ProfileState, now_ms: i64) -> f64 {
    let cutoff = now_ms - CONSISTENCY_WINDOW_DAYS * DAY_MS;
    let recent: Vec<_> = profile
        .session_history
        .iter()
        .filter(|r| r.completed_at >= cutoff && r.is_study())
        .collect();
    if recent.len() < CONSISTENCY_MIN_SESSIONS {
        return 0.0;
    }
    let days: HashSet<String> = recent
        .iter()
        .map(|r| calendar::date_key(r.completed_at))
        .collect();
    days.len() as f64 / CONSISTENCY_WINDOW_DAYS as f64
}

fn recent_affirmations(profile: &ProfileState, now_ms: i64) -> usize {
    let cutoff = now_ms - SIGNAL_WINDOW_DAYS * DAY_MS;
    profile
        .session_history
        .iter()
        .filter(|r| {
            r.completed_at >= cutoff && r.evidence_kind == Some(EvidenceKind::Affirmation)
        })
        .count()
}

fn weak_confidence_sessions(profile: &ProfileState, now_ms: i64) -> usize {
    let cutoff = now_ms - SIGNAL_WINDOW_DAYS * DAY_MS;
    profile
        .session_history
        .iter()
        .filter(|r| r.completed_at >= cutoff && r.confidence.map_or(false, |c| c.is_weak()))
        .count()
}
