//! External side effects module
//!
//! This module contains the alarm sink: message rendering and the
//! user-configured alarm command.

pub mod alarm;

// Re-export main functions
pub use alarm::*;
