//! tickwatch - A clock, stopwatch and dual countdown timer with alarms
//!
//! The core is a small time engine that samples the wall clock and drives four
//! display modes. It is exposed through a local HTTP control API and a
//! terminal display.

pub mod clock;
pub mod config;
pub mod preferences;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use preferences::Preferences;
pub use state::{AppState, TimeEngine, TimerMode};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
