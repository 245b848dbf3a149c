mod database;
mod theme;
mod token;

pub use database::Database;
pub use theme::ThemeMode;
pub use token::{Token, TokenStore};

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns `~/.config/qralarm[-dev]/` based on QRALARM_ENV.
///
/// Set QRALARM_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("QRALARM_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("qralarm-dev")
    } else {
        base_dir.join("qralarm")
    };

    std::fs::create_dir_all(&dir).map_err(|e| StorageError::DataDirUnavailable(e.to_string()))?;
    Ok(dir)
}
