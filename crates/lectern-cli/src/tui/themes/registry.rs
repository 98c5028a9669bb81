//! Theme registry for discovering and accessing themes

use std::collections::HashMap;

use lectern_core::constants::ui::DEFAULT_THEME;

use super::{lectern, terminal, Theme};

/// Registry of all available themes
pub struct ThemeRegistry {
    themes: HashMap<String, Theme>,
    ordered_names: Vec<String>,
    default: Theme,
}

impl ThemeRegistry {
    /// Create a new registry with all built-in themes
    pub fn new() -> Self {
        let default = lectern();
        let mut registry = Self {
            themes: HashMap::new(),
            ordered_names: Vec::new(),
            default: default.clone(),
        };
        registry.register(default);
        registry.register(terminal());
        registry
    }

    fn register(&mut self, theme: Theme) {
        self.ordered_names.push(theme.name.clone());
        self.themes.insert(theme.name.clone(), theme);
    }

    pub fn get(&self, name: &str) -> Option<&Theme> {
        self.themes.get(name)
    }

    /// Get a theme by name, or the default theme
    pub fn get_or_default(&self, name: &str) -> &Theme {
        self.get(name).unwrap_or_else(|| {
            tracing::warn!(theme = name, fallback = DEFAULT_THEME, "Unknown theme");
            &self.default
        })
    }

    /// List all themes in registration order
    pub fn list(&self) -> Vec<(&String, &Theme)> {
        self.ordered_names
            .iter()
            .filter_map(|name| self.themes.get(name).map(|theme| (name, theme)))
            .collect()
    }

    pub fn count(&self) -> usize {
        self.themes.len()
    }
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_themes_registered_in_order() {
        let registry = ThemeRegistry::new();
        let names: Vec<&str> = registry.list().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["lectern", "terminal"]);
        assert_eq!(registry.count(), 2);
    }

    #[test]
    fn test_unknown_theme_falls_back_to_default() {
        let registry = ThemeRegistry::new();
        assert_eq!(registry.get_or_default("terminal").name, "terminal");
        assert_eq!(registry.get_or_default("nope").name, DEFAULT_THEME);
        assert!(registry.get("nope").is_none());
    }
}
