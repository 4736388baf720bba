//! Wall-clock sources consumed by the time engine

use std::sync::{
    atomic::{AtomicI64, Ordering},
    Arc,
};
use chrono::{Local, TimeZone, Timelike, Utc};

use crate::state::Hms;

/// Seconds in one day, used for time-of-day arithmetic
pub const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Source of the current instant and of local time-of-day
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch
    fn now_millis(&self) -> i64;

    /// Local time-of-day of the given epoch instant, floored to whole seconds
    fn time_of_day(&self, epoch_millis: i64) -> Hms;
}

/// Clock backed by the operating system and the local timezone
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    fn time_of_day(&self, epoch_millis: i64) -> Hms {
        match Local.timestamp_millis_opt(epoch_millis).earliest() {
            Some(local) => Hms::new(local.hour(), local.minute(), local.second()),
            // Out of chrono's range; fall back to UTC arithmetic
            None => Hms::from_seconds(epoch_millis.div_euclid(1000).rem_euclid(SECONDS_PER_DAY)),
        }
    }
}

/// Manually driven clock with a fixed UTC offset, for tests and simulations
#[derive(Debug, Clone)]
pub struct ManualClock {
    now_millis: Arc<AtomicI64>,
    utc_offset_seconds: i64,
}

impl ManualClock {
    /// Create a clock frozen at the given epoch milliseconds, in UTC
    pub fn new(now_millis: i64) -> Self {
        Self {
            now_millis: Arc::new(AtomicI64::new(now_millis)),
            utc_offset_seconds: 0,
        }
    }

    /// Create a UTC clock whose current time-of-day is `hms` on day zero
    pub fn at_time_of_day(hms: Hms) -> Self {
        Self::new(hms.total_seconds() * 1000)
    }

    /// Use a fixed offset from UTC for time-of-day conversions
    pub fn with_utc_offset(mut self, seconds: i64) -> Self {
        self.utc_offset_seconds = seconds;
        self
    }

    pub fn advance_millis(&self, millis: i64) {
        self.now_millis.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now_millis.load(Ordering::SeqCst)
    }

    fn time_of_day(&self, epoch_millis: i64) -> Hms {
        let local_seconds = epoch_millis.div_euclid(1000) + self.utc_offset_seconds;
        Hms::from_seconds(local_seconds.rem_euclid(SECONDS_PER_DAY))
    }
}
