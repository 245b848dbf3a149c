//! Desktop host implementations of the core's platform seams.
//!
//! The CLI has no OS permission prompts, alarm manager, or media player;
//! permissions are always granted, the wake registration is a kv entry the
//! `run` loop sleeps on, and the ringing session is a terminal bell plus
//! log lines.

use qralarm_core::alarm::{AudioError, AudioSink, ForegroundHost, RingNotice, WakeRegistrar};
use qralarm_core::permission::{PermissionHost, PermissionKind, PermissionState};
use qralarm_core::storage::Database;
use qralarm_core::ScheduleError;
use tracing::info;

/// kv key holding the pending trigger (epoch millis) between invocations.
pub const PENDING_TRIGGER_KEY: &str = "pending_trigger_ms";

/// Desktop permissions: everything is granted and notification display
/// never needs a runtime grant.
pub struct DesktopPermissionHost;

impl PermissionHost for DesktopPermissionHost {
    fn check(&self, _kind: PermissionKind) -> PermissionState {
        PermissionState::Granted
    }

    fn request(&mut self, _kind: PermissionKind) -> PermissionState {
        PermissionState::Granted
    }

    fn open_settings(&mut self, kind: PermissionKind) {
        eprintln!("open system settings for {kind} permission");
    }

    fn requires_notification_grant(&self) -> bool {
        false
    }
}

/// Wake registration persisted in the kv table; `run` sleeps until it.
/// Re-registering replaces the stored trigger.
pub struct KvWakeRegistrar<'a> {
    db: &'a Database,
}

impl<'a> KvWakeRegistrar<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub fn pending(&self) -> Result<Option<i64>, Box<dyn std::error::Error>> {
        match self.db.kv_get(PENDING_TRIGGER_KEY)? {
            Some(raw) => Ok(Some(raw.parse::<i64>()?)),
            None => Ok(None),
        }
    }
}

impl WakeRegistrar for KvWakeRegistrar<'_> {
    fn register(&mut self, trigger_epoch_ms: i64) -> Result<(), ScheduleError> {
        self.db
            .kv_set(PENDING_TRIGGER_KEY, &trigger_epoch_ms.to_string())
            .map_err(|e| ScheduleError::RegistrationFailed(e.to_string()))
    }

    fn cancel(&mut self) -> Result<(), ScheduleError> {
        self.db
            .kv_delete(PENDING_TRIGGER_KEY)
            .map_err(|e| ScheduleError::RegistrationFailed(e.to_string()))
    }
}

/// Terminal-bell audio: rings the bell once on start; the "looping" part is
/// the log line reminding where the loop would be on a device.
#[derive(Default)]
pub struct BellSink {
    playing: bool,
}

impl AudioSink for BellSink {
    fn start_looping(&mut self) -> Result<(), AudioError> {
        print!("\x07");
        info!("alarm audio loop started");
        self.playing = true;
        Ok(())
    }

    fn stop(&mut self) {
        if self.playing {
            info!("alarm audio stopped");
        }
        self.playing = false;
    }
}

/// Foreground promotion rendered as log lines.
#[derive(Default)]
pub struct ConsoleForeground;

impl ForegroundHost for ConsoleForeground {
    fn enter_foreground(&mut self, notice: &RingNotice) {
        info!("{} -- {}", notice.title, notice.body);
    }

    fn launch_fullscreen(&mut self) -> bool {
        // A terminal has no lock screen to bypass.
        true
    }

    fn exit_foreground(&mut self) {
        info!("ringing session torn down");
    }
}
