//! Calendar key derivation.
//!
//! Every temporal decision in the engine is expressed as equality or
//! ordering over the keys computed here, never over raw timestamps, so day
//! and week boundaries stay unambiguous regardless of time-of-day. All
//! functions are pure over an epoch-milliseconds timestamp.

use chrono::{DateTime, Datelike, Duration, Utc};

/// One calendar day in milliseconds.
pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

fn datetime(ts_ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ts_ms).unwrap_or_default()
}

/// Canonical `YYYY-MM-DD` key for the day containing the timestamp.
pub fn date_key(ts_ms: i64) -> String {
    datetime(ts_ms).format("%Y-%m-%d").to_string()
}

/// Date key of the Monday on or before the timestamp.
///
/// ISO week convention: Sunday belongs to the prior week.
pub fn week_start(ts_ms: i64) -> String {
    let dt = datetime(ts_ms);
    let back = dt.weekday().num_days_from_monday() as i64;
    (dt - Duration::days(back)).format("%Y-%m-%d").to_string()
}

/// Canonical `YYYY-MM` key for the month containing the timestamp.
pub fn month_key(ts_ms: i64) -> String {
    datetime(ts_ms).format("%Y-%m").to_string()
}
