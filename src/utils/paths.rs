//! Cross-Platform Path Utilities
//!
//! Functions for resolving the workbench's directories under the user's
//! home.

use std::path::PathBuf;

use crate::utils::error::{AppError, AppResult};

/// Get the user's home directory
pub fn home_dir() -> AppResult<PathBuf> {
    dirs::home_dir().ok_or_else(|| AppError::config("Could not determine home directory"))
}

/// Get the workbench directory (~/.mcp-workbench/)
pub fn workbench_dir() -> AppResult<PathBuf> {
    Ok(home_dir()?.join(".mcp-workbench"))
}

/// Get the config file path (~/.mcp-workbench/config.json)
pub fn config_path() -> AppResult<PathBuf> {
    Ok(workbench_dir()?.join("config.json"))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &PathBuf) -> AppResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Get the workbench directory, creating if it doesn't exist
pub fn ensure_workbench_dir() -> AppResult<PathBuf> {
    let path = workbench_dir()?;
    ensure_dir(&path)?;
    Ok(path)
}
