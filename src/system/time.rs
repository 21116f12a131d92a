//! Time keeping module for PineTime

use chrono::{DateTime, NaiveDateTime, TimeDelta};
use embassy_time::Instant;

/// A known wall clock time and the system time it was taken at
pub struct TimeReference {
    /// Clock time (UTC)
    time: NaiveDateTime,
    /// Related system time
    instant: Instant,
}

impl Default for TimeReference {
    fn default() -> Self {
        Self {
            time: NaiveDateTime::UNIX_EPOCH,
            instant: Instant::from_ticks(0),
        }
    }
}

impl TimeReference {
    /// Create new time reference from a UNIX timestamp
    pub fn from_timestamp(secs: i64) -> Option<Self> {
        DateTime::from_timestamp(secs, 0).map(|utc| Self {
            time: utc.naive_utc(),
            instant: Instant::now(),
        })
    }
}

pub struct Clock {
    reference: TimeReference,
    /// Local offset from UTC in seconds
    offset: i32,
}

impl Clock {
    /// Initialize time measurement on boot
    pub fn init(reference: TimeReference, offset: i32) -> Self {
        Self { reference, offset }
    }

    /// Get current local time
    pub fn now(&self) -> NaiveDateTime {
        let elapsed = Instant::now().duration_since(self.reference.instant);
        let delta = TimeDelta::microseconds(elapsed.as_micros() as i64)
            + TimeDelta::seconds(self.offset as i64);

        self.reference
            .time
            .checked_add_signed(delta)
            .unwrap_or(self.reference.time)
    }
}

