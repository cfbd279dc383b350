//! Calendar helpers over caller-supplied epoch seconds.
//!
//! RULE: Nothing in the core reads the wall clock. Every entry point
//! takes `now: EpochSecs` from the invoking layer, so tests can march
//! time forward explicitly.

use crate::types::EpochSecs;
use chrono::{DateTime, Datelike, NaiveDate, Timelike};

/// A UTC calendar date. Daily resets (daily bonus, quest refresh,
/// nanopulse counter) all key off this.
pub type DayStamp = NaiveDate;

/// The UTC calendar date containing `now`.
pub fn utc_day(now: EpochSecs) -> DayStamp {
    DateTime::from_timestamp(now, 0)
        .map(|dt| dt.date_naive())
        .unwrap_or(NaiveDate::MIN)
}

/// The UTC hour-of-day containing `now`. Drives the market shift's
/// even/odd alternation.
pub fn utc_hour(now: EpochSecs) -> u32 {
    DateTime::from_timestamp(now, 0)
        .map(|dt| dt.hour())
        .unwrap_or(0)
}

/// Whole calendar days from `earlier` to `later` (negative if reversed).
pub fn days_between(earlier: DayStamp, later: DayStamp) -> i64 {
    later.num_days_from_ce() as i64 - earlier.num_days_from_ce() as i64
}
