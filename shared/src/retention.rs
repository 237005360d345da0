//! Retention pruning
//!
//! Keeps only records from the trailing window of calendar days ending
//! today. Pruned records are gone for good: callers persist the result.

use crate::models::Timestamped;
use chrono::{DateTime, Days, Duration, NaiveDate, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};

/// Days of history kept, today included
pub const RETENTION_DAYS: u32 = 7;

/// Epoch milliseconds of local midnight starting `date` in `tz`
pub fn local_midnight_millis<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> i64 {
    let midnight = date.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&midnight).earliest() {
        Some(start) => start.timestamp_millis(),
        // Midnight skipped by a DST jump
        None => tz
            .from_local_datetime(&(midnight + Duration::hours(1)))
            .earliest()
            .map(|start| start.timestamp_millis())
            .unwrap_or_else(|| midnight.and_utc().timestamp_millis()),
    }
}

/// Start of the day `window_days - 1` days before today, local time
///
/// A zero-day window keeps nothing.
pub fn retention_cutoff<Tz: TimeZone>(now: &DateTime<Tz>, window_days: u32) -> i64 {
    if window_days == 0 {
        return i64::MAX;
    }
    let today = now.date_naive();
    let first_day = today
        .checked_sub_days(Days::new(u64::from(window_days - 1)))
        .unwrap_or(NaiveDate::MIN);
    local_midnight_millis(first_day, &now.timezone())
}

/// Entries with `timestamp >= cutoff`, order preserved
pub fn prune_older_than<T, Tz>(entries: Vec<T>, window_days: u32, now: &DateTime<Tz>) -> Vec<T>
where
    T: Timestamped,
    Tz: TimeZone,
{
    let cutoff = retention_cutoff(now, window_days);
    entries
        .into_iter()
        .filter(|e| e.timestamp_millis() >= cutoff)
        .collect()
}

/// Detects calendar-day rollover between clock polls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayTracker {
    last_seen: NaiveDate,
}

impl DayTracker {
    pub fn new<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        Self {
            last_seen: now.date_naive(),
        }
    }

    pub fn last_seen(&self) -> NaiveDate {
        self.last_seen
    }

    /// Record `now`; true when its local date differs from the last one seen
    pub fn observe<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> bool {
        let today = now.date_naive();
        if today == self.last_seen {
            return false;
        }
        self.last_seen = today;
        true
    }
}
