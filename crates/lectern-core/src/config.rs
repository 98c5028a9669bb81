//! User configuration
//!
//! Read from `config.toml` in the platform config dir. Every field has a
//! default, so a missing file or a partial file is fine.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{layout, scroll, ui};
use crate::paths;

/// Layout metrics, in terminal cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Text never wraps wider than this
    pub max_wrap_width: u16,
    pub image_width: u16,
    pub image_height: usize,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            max_wrap_width: layout::DEFAULT_MAX_WRAP_WIDTH,
            image_width: layout::DEFAULT_IMAGE_WIDTH,
            image_height: layout::DEFAULT_IMAGE_HEIGHT,
        }
    }
}

/// Scroll step sizes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollSettings {
    /// Units per wheel notch
    pub wheel_step: usize,
    /// Rows per unit
    pub unit_rows: usize,
    /// Units per PageUp/PageDown
    pub page_units: usize,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            wheel_step: scroll::DEFAULT_WHEEL_STEP,
            unit_rows: scroll::DEFAULT_UNIT_ROWS,
            page_units: scroll::DEFAULT_PAGE_UNITS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: String,
    pub layout: LayoutSettings,
    pub scroll: ScrollSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: ui::DEFAULT_THEME.to_string(),
            layout: LayoutSettings::default(),
            scroll: ScrollSettings::default(),
        }
    }
}

impl Config {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Config = toml::from_str(source).context("Invalid configuration")?;
        Ok(config.normalized())
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml_str(&source)
            .with_context(|| format!("Failed to load config file {}", path.display()))?;
        debug!(path = %path.display(), ?config, "Loaded config");
        Ok(config)
    }

    /// Load from the platform config dir
    pub fn load_default() -> Result<Self> {
        Self::load(&paths::config_file())
    }

    /// Zero sizes would make scrolling or wrapping impossible
    fn normalized(mut self) -> Self {
        self.layout.max_wrap_width = self.layout.max_wrap_width.max(1);
        self.layout.image_width = self.layout.image_width.max(1);
        self.layout.image_height = self.layout.image_height.max(1);
        self.scroll.wheel_step = self.scroll.wheel_step.max(1);
        self.scroll.unit_rows = self.scroll.unit_rows.max(1);
        self.scroll.page_units = self.scroll.page_units.max(1);
        self
    }
}
