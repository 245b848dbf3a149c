use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::alarm::RingerState;
use crate::permission::PermissionKind;

/// Every state change in the alarm lifecycle produces an Event.
/// The CLI prints them; a GUI layer would poll for them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A wake event was registered with the OS.
    AlarmScheduled {
        trigger_epoch_ms: i64,
        /// Human-readable local trigger time for confirmation dialogs.
        trigger_local: String,
        at: DateTime<Utc>,
    },
    /// A pending wake event was cancelled before firing.
    AlarmCancelled {
        at: DateTime<Utc>,
    },
    /// The OS delivered the wake event and the ringer session began.
    RingingStarted {
        /// False when the audio resource failed to load (silent alarm).
        audio_live: bool,
        fullscreen_launched: bool,
        at: DateTime<Utc>,
    },
    /// A start command arrived while already ringing; absorbed.
    RingingAlreadyActive {
        at: DateTime<Utc>,
    },
    /// The ringer session was torn down.
    RingingStopped {
        /// How long the alarm rang, in milliseconds.
        rang_for_ms: u64,
        at: DateTime<Utc>,
    },
    /// A scanned payload matched the stored token.
    VerificationSucceeded {
        at: DateTime<Utc>,
    },
    /// A scanned payload did not match; the alarm keeps ringing.
    VerificationFailed {
        at: DateTime<Utc>,
    },
    /// A required permission was refused; the operation was aborted.
    PermissionRefused {
        kind: PermissionKind,
        at: DateTime<Utc>,
    },
    /// Full state snapshot of the ringer.
    StateSnapshot {
        state: RingerState,
        pending_trigger_epoch_ms: Option<i64>,
        at: DateTime<Utc>,
    },
}
