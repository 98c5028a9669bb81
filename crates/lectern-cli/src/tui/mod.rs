//! Terminal User Interface for Lectern

pub mod app;
pub mod components;
pub mod handlers;
pub mod themes;
pub mod utils;

// Re-exports
pub use app::App;
pub use themes::THEME_REGISTRY;
