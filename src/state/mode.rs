//! Display modes and the per-mode lookup table

use std::{
    fmt,
    ops::{Index, IndexMut},
    str::FromStr,
};
use serde::{Deserialize, Serialize};

/// The four display modes. Exactly one is displayed at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimerMode {
    #[default]
    CurrentTime,
    Stopwatch,
    CountdownA,
    CountdownB,
}

impl TimerMode {
    pub const ALL: [TimerMode; 4] = [
        TimerMode::CurrentTime,
        TimerMode::Stopwatch,
        TimerMode::CountdownA,
        TimerMode::CountdownB,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Human-readable label shown above the digits
    pub fn label(self) -> &'static str {
        match self {
            TimerMode::CurrentTime => "Current Time",
            TimerMode::Stopwatch => "Stopwatch",
            TimerMode::CountdownA => "Countdown Timer A",
            TimerMode::CountdownB => "Countdown Timer B",
        }
    }

    /// Identifier used on the command line and in API paths
    pub fn slug(self) -> &'static str {
        match self {
            TimerMode::CurrentTime => "current-time",
            TimerMode::Stopwatch => "stopwatch",
            TimerMode::CountdownA => "countdown-a",
            TimerMode::CountdownB => "countdown-b",
        }
    }

    /// The following mode, wrapping back to the first
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn is_countdown(self) -> bool {
        matches!(self, TimerMode::CountdownA | TimerMode::CountdownB)
    }
}

impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for TimerMode {
    type Err = String;

    /// Accepts either the slug or the numeric index
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(index) = s.parse::<usize>() {
            return Self::from_index(index)
                .ok_or_else(|| format!("Mode index out of range: {}", index));
        }
        Self::ALL
            .into_iter()
            .find(|mode| mode.slug().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown mode: {}", s))
    }
}

/// One value per display mode, indexed by `TimerMode`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModeTable<T>([T; 4]);

impl<T> ModeTable<T> {
    pub fn from_fn(mut f: impl FnMut(TimerMode) -> T) -> Self {
        Self(TimerMode::ALL.map(|mode| f(mode)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (TimerMode, &T)> {
        TimerMode::ALL.into_iter().zip(self.0.iter())
    }
}

impl<T> Index<TimerMode> for ModeTable<T> {
    type Output = T;

    fn index(&self, mode: TimerMode) -> &T {
        &self.0[mode.index()]
    }
}

impl<T> IndexMut<TimerMode> for ModeTable<T> {
    fn index_mut(&mut self, mode: TimerMode) -> &mut T {
        &mut self.0[mode.index()]
    }
}
