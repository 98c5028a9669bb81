//! Color themes

mod registry;

use once_cell::sync::Lazy;
use ratatui::style::Color;

pub use registry::ThemeRegistry;

/// Global registry of built-in themes
pub static THEME_REGISTRY: Lazy<ThemeRegistry> = Lazy::new(ThemeRegistry::new);

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub display_name: String,

    pub bg_color: Color,
    pub text_color: Color,
    pub dim_color: Color,

    /// Lesson screen header bar
    pub header_bg_color: Color,
    pub header_fg_color: Color,

    /// Buttons and selected quiz options
    pub accent_color: Color,
    pub heading_color: Color,
    pub image_color: Color,
    pub score_color: Color,

    pub scrollbar_bg_color: Color,
}

/// Default theme: navy header over a dark slate page
pub fn lectern() -> Theme {
    Theme {
        name: "lectern".to_string(),
        display_name: "Lectern".to_string(),
        bg_color: Color::Rgb(0x0F, 0x17, 0x2A),
        text_color: Color::Rgb(0xE2, 0xE8, 0xF0),
        dim_color: Color::Rgb(0x64, 0x74, 0x8B),
        header_bg_color: Color::Rgb(0x04, 0x19, 0x5F),
        header_fg_color: Color::Rgb(0xFF, 0xFF, 0xFF),
        accent_color: Color::Rgb(0xC6, 0xD6, 0xF8),
        heading_color: Color::Rgb(0x93, 0xC5, 0xFD),
        image_color: Color::Rgb(0x94, 0xA3, 0xB8),
        score_color: Color::Rgb(0x86, 0xEF, 0xAC),
        scrollbar_bg_color: Color::Rgb(0x1E, 0x29, 0x3B),
    }
}

/// Native terminal colors
pub fn terminal() -> Theme {
    Theme {
        name: "terminal".to_string(),
        display_name: "Terminal".to_string(),
        bg_color: Color::Reset,
        text_color: Color::Reset,
        dim_color: Color::DarkGray,
        header_bg_color: Color::Blue,
        header_fg_color: Color::White,
        accent_color: Color::Cyan,
        heading_color: Color::Yellow,
        image_color: Color::DarkGray,
        score_color: Color::Green,
        scrollbar_bg_color: Color::DarkGray,
    }
}
