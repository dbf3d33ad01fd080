//! Progression tuning tables.
//!
//! Level-banded lookups (multiplier, weekly cap, rollover, decay, quest
//! reward), rank thresholds, the level curve, and the XP/gold formulas.
//! Every table here is a disjoint ordered range over levels.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::session::{EvidenceKind, MockKind, StudyPhase};

/// Coarse tier derived from level. Gates readiness visibility and grace-day
/// eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    E,
    D,
    C,
    B,
    A,
    S,
}

impl Rank {
    /// Highest rank threshold not exceeding the level.
    pub fn for_level(level: u32) -> Rank {
        match level {
            0..=3 => Rank::E,
            4..=5 => Rank::D,
            6..=7 => Rank::C,
            8..=9 => Rank::B,
            10..=11 => Rank::A,
            _ => Rank::S,
        }
    }

    /// Ranks eligible for a monthly grace day.
    pub fn grace_eligible(&self) -> bool {
        matches!(self, Rank::B | Rank::A | Rank::S)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Rank::E => "E",
            Rank::D => "D",
            Rank::C => "C",
            Rank::B => "B",
            Rank::A => "A",
            Rank::S => "S",
        };
        f.write_str(s)
    }
}

/// XP required to clear the given level: `floor(100 * 2^(level-2))`.
///
/// Levels 1 and 2 both require 100 -- the naive negative-exponent floor
/// would give level 1 a 50 XP requirement, which is not intended.
pub fn required_xp(level: u32) -> u64 {
    if level <= 2 {
        100
    } else {
        // Exponent clamp keeps the shift in range; levels that high are
        // unreachable under the weekly caps anyway.
        100u64 << (level - 2).min(52)
    }
}

/// XP multiplier applied to session rewards, by level band.
pub fn level_multiplier(level: u32) -> f64 {
    match level {
        0..=3 => 1.0,
        4..=5 => 1.1,
        6..=7 => 1.25,
        8..=9 => 1.4,
        10..=11 => 1.6,
        _ => 1.8,
    }
}

/// Weekly XP admission cap, by level band.
pub fn weekly_cap(level: u32) -> u64 {
    match level {
        0..=3 => 800,
        4..=5 => 1200,
        6..=7 => 1500,
        8..=9 => 1800,
        10..=11 => 2100,
        _ => 2500,
    }
}

/// Maximum XP banked for next week once the weekly cap is hit.
pub fn rollover_cap(level: u32) -> u64 {
    match level {
        0..=3 => 50,
        4..=5 => 75,
        6..=7 => 100,
        8..=9 => 120,
        10..=11 => 150,
        _ => 200,
    }
}

/// XP lost per idle day, by level band. Low levels are exempt.
pub fn daily_decay(level: u32) -> u64 {
    match level {
        0..=3 => 0,
        4..=5 => 15,
        6..=7 => 30,
        8..=9 => 50,
        10..=11 => 80,
        _ => 120,
    }
}

/// Daily quest reward, by level band.
pub fn quest_xp(level: u32) -> u64 {
    match level {
        0..=3 => 30,
        4..=5 => 50,
        6..=7 => 80,
        8..=9 => 120,
        10..=11 => 180,
        _ => 250,
    }
}

/// Base study XP rate per hour, by phase.
pub fn study_rate(phase: StudyPhase) -> u64 {
    match phase {
        StudyPhase::Learning => 20,
        StudyPhase::Revision => 15,
        StudyPhase::MockAnalysis => 25,
    }
}

/// Base XP for a completed mock test.
pub fn mock_base_xp(kind: MockKind) -> u64 {
    match kind {
        MockKind::Sectional => 30,
        MockKind::Full => 75,
    }
}

/// Study XP: `floor((duration/60) * rate(phase) * multiplier(level))`.
pub fn study_xp(duration_min: u64, phase: StudyPhase, level: u32) -> u64 {
    let hours = duration_min as f64 / 60.0;
    (hours * study_rate(phase) as f64 * level_multiplier(level)).floor() as u64
}

/// Mock XP: `floor(base(kind) * multiplier(level))`.
pub fn mock_xp(kind: MockKind, level: u32) -> u64 {
    (mock_base_xp(kind) as f64 * level_multiplier(level)).floor() as u64
}

/// Gold from credited XP; affirmation evidence earns half (floored).
pub fn gold_reward(credited_xp: u64, evidence: EvidenceKind) -> u64 {
    let gold = credited_xp / 10;
    if evidence == EvidenceKind::Affirmation {
        gold / 2
    } else {
        gold
    }
}

/// One failure-penalty tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailurePenalty {
    pub xp_loss: u64,
    /// Whole levels lost immediately.
    pub level_loss: u32,
    /// Lose one level every second consecutive failure day instead of a
    /// fixed amount (the deepest tier only).
    pub half_level_cadence: bool,
    pub remove_protection: bool,
}

/// Penalty for the `min(streak, 4)`th consecutive failure.
pub fn failure_penalty(streak: u32) -> FailurePenalty {
    match streak {
        0 | 1 => FailurePenalty {
            xp_loss: 40,
            level_loss: 0,
            half_level_cadence: false,
            remove_protection: false,
        },
        2 => FailurePenalty {
            xp_loss: 90,
            level_loss: 0,
            half_level_cadence: false,
            remove_protection: true,
        },
        3 => FailurePenalty {
            xp_loss: 180,
            level_loss: 1,
            half_level_cadence: false,
            remove_protection: true,
        },
        _ => FailurePenalty {
            xp_loss: 250,
            level_loss: 0,
            half_level_cadence: true,
            remove_protection: true,
        },
    }
}
