//! Theme preference.
//!
//! Stored as a kv entry; an absent key means "follow the system scheme",
//! not an error.

use serde::{Deserialize, Serialize};

use super::Database;
use crate::error::StorageError;

const THEME_KEY: &str = "theme_mode";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    /// Load the saved preference, falling back to the system scheme when
    /// nothing is stored or the stored value is unrecognized.
    pub fn load(db: &Database, system: ThemeMode) -> Result<ThemeMode, StorageError> {
        Ok(match db.kv_get(THEME_KEY)?.as_deref() {
            Some("light") => ThemeMode::Light,
            Some("dark") => ThemeMode::Dark,
            _ => system,
        })
    }

    pub fn save(self, db: &Database) -> Result<(), StorageError> {
        let value = match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        };
        db.kv_set(THEME_KEY, value)
    }

    pub fn toggled(self) -> ThemeMode {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}
