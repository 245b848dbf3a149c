//! Ringer service: the detached background execution unit.
//!
//! Wraps the pure [`AlarmRinger`] machine and executes its transitions
//! against the platform seams: an [`AudioSink`] for the looping alarm audio
//! and a [`ForegroundHost`] for foreground promotion, the undismissable
//! notification, and the full-screen ringing view.
//!
//! The unit is independently startable by the OS with no UI alive, so it is
//! driven exclusively through [`RingerCommand`]s received over a channel --
//! never by direct in-process calls from the UI side.

use chrono::Utc;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, warn};

use super::ringer::{AlarmRinger, RingerCommand, RingerState, Transition};
use crate::events::Event;

/// Audio failures are recoverable: the alarm degrades to a silent
/// (visual-only) one rather than crashing. This error never converts
/// into `CoreError`; it is logged and dropped.
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("audio resource failed to load: {0}")]
    LoadFailed(String),
    #[error("playback failed: {0}")]
    PlaybackFailed(String),
}

/// Platform seam for the single audio-output claim.
///
/// While Ringing, the sink is exclusively owned by the ringer; no other
/// component plays audio. `stop` must be safe to call even if playback
/// never started.
pub trait AudioSink {
    /// Begin looped playback at alarm-category volume semantics, audible
    /// regardless of the device silent/DND profile.
    fn start_looping(&mut self) -> Result<(), AudioError>;
    fn stop(&mut self);
}

/// Content of the persistent ringing notification.
#[derive(Debug, Clone)]
pub struct RingNotice {
    pub title: String,
    pub body: String,
}

impl Default for RingNotice {
    fn default() -> Self {
        Self {
            title: "QR Alarm Ringing".into(),
            body: "Scan QR to stop".into(),
        }
    }
}

/// Platform seam for foreground/keep-alive promotion and the screen takeover.
pub trait ForegroundHost {
    /// Promote to foreground priority and post the ongoing, maximum-priority
    /// notification that cannot be dismissed by a normal swipe.
    fn enter_foreground(&mut self, notice: &RingNotice);

    /// Force the display on, bypass the lock screen, and launch the
    /// full-screen ringing view. Returns false when the display state does
    /// not permit it (the notification's full-screen intent still stands).
    fn launch_fullscreen(&mut self) -> bool;

    /// Tear down foreground priority and clear the notification.
    fn exit_foreground(&mut self);
}

/// The detached ringer unit: pure machine plus platform effects.
pub struct RingerService<A: AudioSink, F: ForegroundHost> {
    ringer: AlarmRinger,
    audio: A,
    host: F,
    notice: RingNotice,
}

impl<A: AudioSink, F: ForegroundHost> RingerService<A, F> {
    pub fn new(audio: A, host: F) -> Self {
        Self {
            ringer: AlarmRinger::new(),
            audio,
            host,
            notice: RingNotice::default(),
        }
    }

    pub fn with_notice(audio: A, host: F, notice: RingNotice) -> Self {
        Self {
            ringer: AlarmRinger::new(),
            audio,
            host,
            notice,
        }
    }

    pub fn state(&self) -> RingerState {
        self.ringer.state()
    }

    pub fn ringer(&self) -> &AlarmRinger {
        &self.ringer
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn host(&self) -> &F {
        &self.host
    }

    /// Execute one command against the machine and the platform.
    ///
    /// Returns the resulting event, or `None` for a stop that found nothing
    /// ringing.
    pub fn handle(&mut self, command: RingerCommand) -> Option<Event> {
        let now = Utc::now();
        let now_ms = now.timestamp_millis().max(0) as u64;
        match self.ringer.handle(command, now_ms) {
            Transition::Started => {
                self.host.enter_foreground(&self.notice);
                let audio_live = match self.audio.start_looping() {
                    Ok(()) => true,
                    Err(e) => {
                        // Recoverable: the alarm rings silently.
                        warn!("alarm audio unavailable, ringing silently: {e}");
                        false
                    }
                };
                let fullscreen_launched = self.host.launch_fullscreen();
                self.ringer.mark_session(audio_live, fullscreen_launched);
                Some(Event::RingingStarted {
                    audio_live,
                    fullscreen_launched,
                    at: now,
                })
            }
            Transition::AlreadyRinging => {
                debug!("start while ringing; absorbed");
                Some(Event::RingingAlreadyActive { at: now })
            }
            Transition::Stopped { rang_for_ms, .. } => {
                // Safe even if playback never started; foreground and
                // notification teardown always completes.
                self.audio.stop();
                self.host.exit_foreground();
                Some(Event::RingingStopped { rang_for_ms, at: now })
            }
            Transition::AlreadyIdle => None,
        }
    }

    /// Drive the unit from a command channel until all senders are gone.
    pub async fn run(mut self, mut rx: UnboundedReceiver<RingerCommand>, mut on_event: impl FnMut(Event)) {
        while let Some(command) = rx.recv().await {
            if let Some(event) = self.handle(command) {
                on_event(event);
            }
        }
    }
}
