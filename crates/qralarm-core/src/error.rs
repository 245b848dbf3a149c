//! Core error types for qralarm-core.
//!
//! One top-level enum with `#[from]` conversions from the component error
//! enums, mirroring the propagation policy: storage failures are fatal,
//! permission refusals abort the operation, audio problems stay recoverable.

use std::path::PathBuf;
use thiserror::Error;

use crate::permission::PermissionKind;

/// Core error type for qralarm-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors (token store, theme, pending alarm)
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Permission-related errors
    #[error("Permission error: {0}")]
    Permission(#[from] PermissionError),

    /// Scheduling errors
    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    /// Command channel errors
    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Storage-specific errors. The token store cannot function without its
/// backing database, so these are fatal at startup.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the database file
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Could not resolve the data directory
    #[error("Data directory unavailable: {0}")]
    DataDirUnavailable(String),
}

/// Permission-specific errors. Each carries the kind so callers can redirect
/// the user to the right system settings screen.
#[derive(Error, Debug)]
pub enum PermissionError {
    /// The user (or platform) refused the permission
    #[error("Permission denied: {0}")]
    Denied(PermissionKind),

    /// The privilege is absent and the settings screen was opened; the
    /// caller must retry after the user grants it
    #[error("Permission pending user action in settings: {0}")]
    PendingSettings(PermissionKind),
}

/// Scheduling errors.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// Out-of-range alarm request
    #[error("Invalid alarm time {hour:02}:{minute:02}")]
    InvalidTime { hour: u32, minute: u32 },

    /// The requested wall-clock time does not exist in the local timezone
    /// (e.g. skipped by a DST transition)
    #[error("Unrepresentable local time {hour:02}:{minute:02}")]
    UnrepresentableTime { hour: u32, minute: u32 },

    /// The OS registration call failed after permission was granted.
    /// There is no retry; the failure is surfaced to the user.
    #[error("Wake event registration failed: {0}")]
    RegistrationFailed(String),
}

/// Command channel errors.
#[derive(Error, Debug)]
pub enum ChannelError {
    /// The detached ringer unit is gone (receiver dropped)
    #[error("Ringer unit unreachable")]
    Disconnected,
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::QueryFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
