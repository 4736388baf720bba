//! Per-mode timer state

use serde::{Deserialize, Serialize};

use super::Hms;

/// Timer state for one display mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub running: bool,
    /// User-editable stored value (elapsed, duration or target time-of-day, per mode)
    pub fields: Hms,
    /// Epoch milliseconds: stopwatch anchor or countdown target, while running
    #[serde(skip)]
    pub reference: Option<i64>,
}

impl TimerState {
    /// Create a stopped timer holding `fields`
    pub fn new(fields: Hms) -> Self {
        Self {
            running: false,
            fields,
            reference: None,
        }
    }

    /// Create a stopped timer at 00:00:00
    pub fn stopped() -> Self {
        Self::new(Hms::ZERO)
    }

    /// Mark running from the given reference instant
    pub fn run_from(&mut self, reference: Option<i64>) {
        self.running = true;
        self.reference = reference;
    }

    /// Mark stopped and forget the reference instant
    pub fn halt(&mut self) {
        self.running = false;
        self.reference = None;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Reference instant, only while running
    pub fn reference(&self) -> Option<i64> {
        if self.running {
            self.reference
        } else {
            None
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::stopped()
    }
}
