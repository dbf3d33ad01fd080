//! Daily maintenance: decay, grace days, weekly rollover, quest refresh.
//!
//! Runs at most once per calendar day. The idempotency marker (the date key
//! of the last completed run) lives in the key-value store next to the
//! snapshot, not inside the profile; the runner passes the previous marker
//! in and persists the date from the returned report. Calling this again on
//! the same day is a no-op, which matters because it runs on every process
//! activation.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::calendar::{self, DAY_MS};
use crate::profile::ProfileState;
use crate::progression::tables;
use crate::quest;

/// Days of mock inactivity after which protection lapses.
pub const MOCK_PROTECTION_DAYS: i64 = 7;

/// What a maintenance pass did, for display and for marker persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceReport {
    /// Date key this report covers; persist as the new marker when `ran`.
    pub date: String,
    /// False when the day was already processed.
    pub ran: bool,
    pub grace_day_used: bool,
    /// XP removed by decay (table value; removal clamps at zero).
    pub decay_applied: u64,
    /// Decay was due but an unexpired protection grant suppressed it.
    pub decay_shielded: bool,
    /// Protection cleared by mock inactivity.
    pub protection_lapsed: bool,
    pub week_rolled: bool,
    /// Rollover XP seeded into the new week.
    pub rollover_credited: u64,
    pub quest_generated: bool,
}

impl MaintenanceReport {
    fn skipped(date: String) -> Self {
        Self {
            date,
            ran: false,
            grace_day_used: false,
            decay_applied: 0,
            decay_shielded: false,
            protection_lapsed: false,
            week_rolled: false,
            rollover_credited: 0,
            quest_generated: false,
        }
    }
}

/// Run the once-per-day pass. `last_processed` is the marker from the
/// previous run; when it already names today, nothing happens.
pub fn run_daily(
    profile: &mut ProfileState,
    last_processed: Option<&str>,
    now_ms: i64,
    rng: &mut impl Rng,
) -> MaintenanceReport {
    let today = calendar::date_key(now_ms);
    if last_processed == Some(today.as_str()) {
        return MaintenanceReport::skipped(today);
    }

    let mut report = MaintenanceReport {
        ran: true,
        ..MaintenanceReport::skipped(today.clone())
    };

    // 1. Decay or grace when no qualifying study happened today.
    let studied_today = profile.last_study_date.as_deref() == Some(today.as_str());
    if !studied_today {
        if profile.rank().grace_eligible() && take_grace_day(profile, now_ms) {
            report.grace_day_used = true;
        } else {
            let decay = tables::daily_decay(profile.level);
            if decay > 0 {
                if profile.protection.shields(now_ms) {
                    report.decay_shielded = true;
                } else {
                    profile.remove_xp(decay);
                    report.decay_applied = decay;
                }
            }
        }
    }

    // 2. Protection lapses after a week without a mock, decay path or not.
    if let Some(last_mock) = profile.last_mock_date {
        if now_ms - last_mock >= MOCK_PROTECTION_DAYS * DAY_MS && profile.protection.active {
            profile.protection.clear();
            report.protection_lapsed = true;
        }
    }

    // 3. Week boundary: seed the new week with the banked rollover.
    let current_week = calendar::week_start(now_ms);
    if profile.week_start != current_week {
        report.week_rolled = true;
        report.rollover_credited = profile.weekly_rollover;
        profile.weekly_xp = profile.weekly_rollover;
        profile.weekly_rollover = 0;
        profile.week_start = current_week;
        profile.roll_affirmation_week(now_ms);
    }

    // 4. Fresh quest for the day.
    report.quest_generated = quest::generate(profile, now_ms, rng);

    report
}

/// Consume the monthly grace allowance if available. The allowance resets
/// when the observed month key changes.
fn take_grace_day(profile: &mut ProfileState, now_ms: i64) -> bool {
    let month = calendar::month_key(now_ms);
    if profile.grace_month != month {
        profile.grace_days_used = 0;
        profile.grace_month = month;
    }
    if profile.grace_days_used < 1 {
        profile.grace_days_used += 1;
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{Protection, ProtectionKind};
    use chrono::{TimeZone, Utc};
    use rand::SeedableRng;
    use rand_pcg::Mcg128Xsl64;

    fn ms(mo: u32, d: u32, h: u32) -> i64 {
        Utc.with_ymd_and_hms(2026, mo, d, h, 0, 0)
            .unwrap()
            .timestamp_millis()
    }

    fn rng() -> Mcg128Xsl64 {
        Mcg128Xsl64::seed_from_u64(9)
    }

    #[test]
    fn runs_once_per_day() {
        let mut p = ProfileState::new(ms(3, 2, 8));
        let first = run_daily(&mut p, None, ms(3, 2, 8), &mut rng());
        assert!(first.ran);
        let snapshot = p.clone();
        let second = run_daily(&mut p, Some(&first.date), ms(3, 2, 22), &mut rng());
        assert!(!second.ran);
        assert_eq!(p, snapshot);
    }

    #[test]
    fn decay_applies_when_idle_and_unprotected() {
        let mut p = ProfileState::new(ms(3, 2, 8));
        p.level = 6; // 30/day decay band
        p.xp = 100;
        let report = run_daily(&mut p, None, ms(3, 2, 8), &mut rng());
        assert_eq!(report.decay_applied, 30);
        assert_eq!(p.xp, 70);
    }

    #[test]
    fn low_levels_are_exempt_from_decay() {
        let mut p = ProfileState::new(ms(3, 2, 8));
        p.xp = 50;
        let report = run_daily(&mut p, None, ms(3, 2, 8), &mut rng());
        assert_eq!(report.decay_applied, 0);
        assert_eq!(p.xp, 50);
    }

    #[test]
    fn studying_today_skips_decay() {
        let mut p = ProfileState::new(ms(3, 2, 8));
        p.level = 6;
        p.xp = 100;
        p.last_study_date = Some("2026-03-02".into());
        let report = run_daily(&mut p, None, ms(3, 2, 20), &mut rng());
        assert_eq!(report.decay_applied, 0);
        assert!(!report.grace_day_used);
    }

    #[test]
    fn protection_suppresses_decay_entirely() {
        let mut p = ProfileState::new(ms(3, 2, 8));
        p.level = 6;
        p.xp = 100;
        p.protection = Protection::grant(ProtectionKind::Full, ms(3, 2, 7));
        let report = run_daily(&mut p, None, ms(3, 2, 8), &mut rng());
        assert!(report.decay_shielded);
        assert_eq!(p.xp, 100);
    }

    #[test]
    fn grace_day_spares_high_ranks_once_a_month() {
        let mut p = ProfileState::new(ms(3, 2, 8));
        p.level = 8; // rank B, decay band 50
        p.xp = 200;
        let first = run_daily(&mut p, None, ms(3, 2, 8), &mut rng());
        assert!(first.grace_day_used);
        assert_eq!(p.xp, 200);
        // Second idle day the same month: decay hits.
        let second = run_daily(&mut p, Some(&first.date), ms(3, 3, 8), &mut rng());
        assert!(!second.grace_day_used);
        assert_eq!(second.decay_applied, 50);
        // New month: allowance refreshed.
        let third = run_daily(&mut p, Some(&second.date), ms(4, 1, 8), &mut rng());
        assert!(third.grace_day_used);
    }

    #[test]
    fn protection_lapses_after_seven_mockless_days() {
        let mut p = ProfileState::new(ms(3, 2, 8));
        p.protection = Protection::grant(ProtectionKind::Full, ms(3, 2, 8));
        p.last_mock_date = Some(ms(3, 2, 8));
        let report = run_daily(&mut p, None, ms(3, 9, 8), &mut rng());
        assert!(report.protection_lapsed);
        assert!(!p.protection.active);
    }

    #[test]
    fn week_roll_seeds_rollover_and_resets_affirmations() {
        let mut p = ProfileState::new(ms(3, 2, 8));
        p.weekly_xp = 800;
        p.weekly_rollover = 50;
        p.weekly_affirmations = 2;
        let report = run_daily(&mut p, None, ms(3, 9, 8), &mut rng());
        assert!(report.week_rolled);
        assert_eq!(report.rollover_credited, 50);
        assert_eq!(p.weekly_xp, 50);
        assert_eq!(p.weekly_rollover, 0);
        assert_eq!(p.week_start, "2026-03-09");
        assert_eq!(p.weekly_affirmations, 0);
    }

    #[test]
    fn multi_day_absence_replays_in_one_pass() {
        // Ten days away: one maintenance run applies one decay step, rolls
        // the week, lapses protection, and issues a fresh quest.
        let mut p = ProfileState::new(ms(3, 2, 8));
        p.level = 6;
        p.xp = 500;
        p.weekly_xp = 900;
        p.weekly_rollover = 100;
        p.protection = Protection::grant(ProtectionKind::Partial, ms(3, 2, 8));
        p.last_mock_date = Some(ms(3, 2, 8));
        let report = run_daily(&mut p, Some("2026-03-02"), ms(3, 12, 8), &mut rng());
        assert_eq!(report.decay_applied, 30);
        assert!(report.protection_lapsed);
        assert!(report.week_rolled);
        assert_eq!(p.weekly_xp, 100);
        assert!(report.quest_generated);
        assert_eq!(p.daily_quest.as_ref().unwrap().date, "2026-03-12");
    }

    #[test]
    fn quest_refreshes_daily() {
        let mut p = ProfileState::new(ms(3, 2, 8));
        let first = run_daily(&mut p, None, ms(3, 2, 8), &mut rng());
        assert!(first.quest_generated);
        let second = run_daily(&mut p, Some(&first.date), ms(3, 3, 8), &mut rng());
        assert!(second.quest_generated);
        assert_eq!(p.daily_quest.as_ref().unwrap().date, "2026-03-03");
    }
}
