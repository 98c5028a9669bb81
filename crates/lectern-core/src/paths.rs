//! Platform directories for config, data and logs

use std::path::PathBuf;

use crate::constants::ui::{APP_DIR_NAME, CONFIG_FILE_NAME};

fn base(dir: Option<PathBuf>) -> PathBuf {
    dir.unwrap_or_else(|| PathBuf::from("."))
}

/// `<config dir>/lectern`
pub fn config_dir() -> PathBuf {
    base(dirs::config_dir()).join(APP_DIR_NAME)
}

/// `<config dir>/lectern/config.toml`
pub fn config_file() -> PathBuf {
    config_dir().join(CONFIG_FILE_NAME)
}

/// `<data dir>/lectern`
pub fn data_dir() -> PathBuf {
    base(dirs::data_dir()).join(APP_DIR_NAME)
}

/// `<data dir>/lectern/logs`
pub fn logs_dir() -> PathBuf {
    data_dir().join("logs")
}
