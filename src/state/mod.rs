//! State management module
//!
//! This module contains the timer engine, its building blocks, and the
//! shared application state that wraps them.

pub mod app_state;
pub mod engine;
pub mod field_editor;
pub mod hms;
pub mod mode;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, TimerAction};
pub use engine::{EngineSnapshot, ModeSnapshot, TimeEngine};
pub use field_editor::{Direction, Field, FieldEditor, Hold};
pub use hms::Hms;
pub use mode::{ModeTable, TimerMode};
pub use timer_state::TimerState;
