//! Keyword and recency scoring.
//!
//! Hits dominate: one extra match (100 points) always outweighs the full
//! recency bonus (at most 10 points).

use chrono::{DateTime, Utc};

pub const SECONDS_PER_DAY: f64 = 86_400.0;
pub const HIT_WEIGHT: f64 = 100.0;
pub const RECENCY_WEIGHT: f64 = 10.0;

/// Fractional seconds since the Unix epoch.
#[must_use]
pub fn epoch_seconds(at: DateTime<Utc>) -> f64 {
    at.timestamp() as f64 + f64::from(at.timestamp_subsec_nanos()) / 1e9
}

/// Earliest admissible modification time for a `days` window.
#[must_use]
pub fn cutoff_seconds(now_secs: f64, days: i64) -> f64 {
    now_secs - days as f64 * SECONDS_PER_DAY
}

/// Age in days, clamped at zero for files stamped in the future.
#[must_use]
pub fn age_days(now_secs: f64, mtime_secs: f64) -> f64 {
    ((now_secs - mtime_secs) / SECONDS_PER_DAY).max(0.0)
}

/// Linear decay from 1.0 (just modified) to 0.0 at the window edge. The
/// window is floored at one day so a zero or negative `days` cannot divide
/// by zero.
#[must_use]
pub fn recency(age_days: f64, days: i64) -> f64 {
    let window = days.max(1) as f64;
    (1.0 - age_days / window).max(0.0)
}

#[must_use]
pub fn score(hits: usize, recency: f64) -> f64 {
    hits as f64 * HIT_WEIGHT + recency * RECENCY_WEIGHT
}
