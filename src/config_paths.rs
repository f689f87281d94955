//! Where edgedrawer keeps its files
//!
//! One directory per user holds the YAML config, the saved drawer state and
//! the rolling logs. On Windows it sits under `%APPDATA%`; elsewhere under
//! `$XDG_CONFIG_HOME` or `~/.config`.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DrawerError, Result};

const APP_DIR: &str = "edgedrawer";

/// The per-user edgedrawer directory, if a home can be found
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var_os("APPDATA").map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .map(|base| base.join(APP_DIR))
    }
}

/// Motion constants, colors and shadow strategy
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

/// Open drawer and lock modes from the last session
pub fn state_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("state.json"))
}

pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

fn create(path: &Path) -> Result<PathBuf> {
    fs::create_dir_all(path)?;
    Ok(path.to_path_buf())
}

/// Create the logs directory for the file appender
pub fn ensure_logs_dir() -> Result<PathBuf> {
    let logs = logs_dir()
        .ok_or_else(|| DrawerError::Config("no home directory for log files".into()))?;
    create(&logs)
}
