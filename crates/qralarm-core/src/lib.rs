//! # QR Alarm Core Library
//!
//! Core lifecycle logic for a single-purpose QR-silenced wake-up alarm:
//! the user schedules an alarm, it fires as a full-screen ringing session
//! with looping audio, and the only way to silence it is scanning a QR code
//! whose payload matches this install's stop-key token.
//!
//! The library is platform-agnostic. Everything OS-specific -- permission
//! prompts, exact-alarm registration, foreground promotion, audio output,
//! app visibility -- sits behind small traits, so the whole lifecycle is
//! testable without a device:
//!
//! ```text
//! UI -> PermissionGate -> AlarmScheduler -> (OS wake) -> RingerService
//!                                                            ^
//!                              VerificationGate -- stop -----'
//! ```
//!
//! ## Key Components
//!
//! - [`TokenStore`]: mints and persists the per-install stop-key
//! - [`PermissionGate`]: sequences notification / full-screen / exact-alarm
//!   gates before anything is registered
//! - [`AlarmScheduler`]: next-trigger computation plus exact wake
//!   registration (at most one pending)
//! - [`RingerService`]: the detached ringing unit, a pure
//!   `Idle -> Ringing -> Idle` machine driven over a command channel
//! - [`VerificationGate`]: byte-exact QR payload comparison gating the stop

pub mod alarm;
pub mod error;
pub mod events;
pub mod permission;
pub mod share;
pub mod storage;
pub mod verify;

pub use alarm::{
    compute_trigger, AlarmRequest, AlarmRinger, AlarmScheduler, AlarmSession, CommandChannel,
    MpscCommandChannel, RingerCommand, RingerService, RingerState, Scheduled, WakeRegistrar,
};
pub use error::{ChannelError, CoreError, PermissionError, Result, ScheduleError, StorageError};
pub use events::Event;
pub use permission::{
    PermissionGate, PermissionHost, PermissionKind, PermissionState, ScheduleClearance,
};
pub use share::{share_when_foreground, ShareStatus, Visibility, VisibilityProbe};
pub use storage::{Database, ThemeMode, Token, TokenStore};
pub use verify::{ScanOutcome, VerificationGate};
