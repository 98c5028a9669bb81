//! Event handlers for the TUI
//!
//! Keyboard and mouse input, plus frame rendering.

pub mod keyboard;
pub mod mouse;
pub mod rendering;
