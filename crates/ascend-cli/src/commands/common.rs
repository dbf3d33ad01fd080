//! Shared command plumbing: database handle, profile load/save cycle, and
//! the injected clock and random source.
//!
//! Every command follows the same shape: open the database, load the
//! profile (running the once-per-day maintenance pass), apply the
//! operation, save the snapshot back.

use ascend_core::maintenance::{self, MaintenanceReport};
use ascend_core::{Database, ProfileState};
use chrono::Utc;
use rand::SeedableRng;
use rand_pcg::Mcg128Xsl64;

pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Seeded generator when `--seed` is given, entropy-seeded otherwise.
pub fn make_rng(seed: Option<u64>) -> Mcg128Xsl64 {
    Mcg128Xsl64::seed_from_u64(seed.unwrap_or_else(rand::random))
}

/// Load the profile, creating one on first launch, and run the daily
/// maintenance pass. The maintenance marker and snapshot are persisted
/// whenever the pass actually ran.
pub fn load_profile(
    db: &Database,
    now: i64,
    rng: &mut Mcg128Xsl64,
) -> Result<(ProfileState, MaintenanceReport), Box<dyn std::error::Error>> {
    let mut profile = match db.load_profile()? {
        Some(profile) => profile,
        None => {
            let profile = ProfileState::new(now);
            db.save_profile(&profile)?;
            profile
        }
    };

    let marker = db.maintenance_marker()?;
    let report = maintenance::run_daily(&mut profile, marker.as_deref(), now, rng);
    if report.ran {
        db.set_maintenance_marker(&report.date)?;
        db.save_profile(&profile)?;
    }

    Ok((profile, report))
}

/// Persist the snapshot after a mutating operation.
pub fn save_profile(
    db: &Database,
    profile: &ProfileState,
) -> Result<(), Box<dyn std::error::Error>> {
    db.save_profile(profile)?;
    Ok(())
}
