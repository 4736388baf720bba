//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod display;
pub mod field_repeat;
pub mod ticker;

// Re-export main functions
pub use display::display_task;
pub use field_repeat::{hold_repeat_task, spawn_hold_repeat};
pub use ticker::{tick_task, DEFAULT_TICK_PERIOD};
