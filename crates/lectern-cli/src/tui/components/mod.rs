//! UI components for the Lectern TUI
//!
//! Reusable rendering components

pub mod scrollbars;

pub use scrollbars::render_surface_scrollbar;
