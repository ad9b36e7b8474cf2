//! Path resolution for configuration and logs
//!
//! Home resolution order:
//! 1. PROMPTER_HOME environment variable (if set)
//! 2. ~/.config/prompter (default)

use std::path::PathBuf;

use crate::constants::paths::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, HOME_ENV};

/// Returns the prompter home directory
pub fn prompter_home() -> PathBuf {
    if let Ok(home) = std::env::var(HOME_ENV) {
        return PathBuf::from(home);
    }

    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join(CONFIG_DIR_NAME)
}

/// Returns the path to config.toml
pub fn config_path() -> PathBuf {
    prompter_home().join(CONFIG_FILE_NAME)
}

/// Returns the directory log files are written to
pub fn logs_dir() -> PathBuf {
    prompter_home().join("logs")
}
