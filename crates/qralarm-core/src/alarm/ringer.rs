//! Ringer state machine.
//!
//! A pure state machine over wall-clock milliseconds -- no platform calls.
//! The service layer ([`super::service::RingerService`]) drives it from the
//! command channel and executes the resulting effects; keeping the machine
//! pure means the lifecycle is testable without an OS service host.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Ringing -> Idle
//! ```
//!
//! Only the OS wake event enters Ringing; only an explicit stop (or forced
//! OS teardown) leaves it. A second start while Ringing is a no-op -- at
//! most one session, at most one audio stream.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RingerState {
    Idle,
    Ringing,
}

/// The two commands deliverable to the detached ringer unit. No payload;
/// the well-known unit name plus the command name is the whole protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RingerCommand {
    Start,
    Stop,
}

/// Live state of a ringing alarm. At most one exists at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmSession {
    /// When the session entered Ringing (ms since epoch).
    pub started_epoch_ms: u64,
    /// False when the audio resource failed to load (silent alarm).
    pub audio_live: bool,
    /// Whether the full-screen ringing view was launched.
    pub fullscreen_launched: bool,
}

/// What a command did to the machine. The service layer maps these to
/// platform effects and events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Idle -> Ringing; the service must bring up foreground, audio,
    /// notification, full-screen view.
    Started,
    /// Start while already Ringing; absorbed without touching the session.
    AlreadyRinging,
    /// Ringing -> Idle; the service must tear everything down.
    Stopped {
        session: AlarmSession,
        rang_for_ms: u64,
    },
    /// Stop while Idle; nothing to do.
    AlreadyIdle,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlarmRinger {
    state: RingerState,
    session: Option<AlarmSession>,
}

impl Default for AlarmRinger {
    fn default() -> Self {
        Self::new()
    }
}

impl AlarmRinger {
    pub fn new() -> Self {
        Self {
            state: RingerState::Idle,
            session: None,
        }
    }

    pub fn state(&self) -> RingerState {
        self.state
    }

    pub fn session(&self) -> Option<&AlarmSession> {
        self.session.as_ref()
    }

    /// Record the outcome of bringing up the session's platform resources.
    /// Only meaningful while Ringing.
    pub fn mark_session(&mut self, audio_live: bool, fullscreen_launched: bool) {
        if let Some(session) = self.session.as_mut() {
            session.audio_live = audio_live;
            session.fullscreen_launched = fullscreen_launched;
        }
    }

    /// Message-handling entry point; the only way state changes.
    pub fn handle(&mut self, command: RingerCommand, now_ms: u64) -> Transition {
        match (self.state, command) {
            (RingerState::Idle, RingerCommand::Start) => {
                self.state = RingerState::Ringing;
                self.session = Some(AlarmSession {
                    started_epoch_ms: now_ms,
                    audio_live: false,
                    fullscreen_launched: false,
                });
                Transition::Started
            }
            (RingerState::Ringing, RingerCommand::Start) => Transition::AlreadyRinging,
            (RingerState::Ringing, RingerCommand::Stop) => {
                self.state = RingerState::Idle;
                // The session always exists while Ringing.
                let session = self.session.take().unwrap_or(AlarmSession {
                    started_epoch_ms: now_ms,
                    audio_live: false,
                    fullscreen_launched: false,
                });
                let rang_for_ms = now_ms.saturating_sub(session.started_epoch_ms);
                Transition::Stopped {
                    session,
                    rang_for_ms,
                }
            }
            (RingerState::Idle, RingerCommand::Stop) => Transition::AlreadyIdle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_enters_ringing_with_session() {
        let mut ringer = AlarmRinger::new();
        assert_eq!(ringer.handle(RingerCommand::Start, 1_000), Transition::Started);
        assert_eq!(ringer.state(), RingerState::Ringing);
        assert_eq!(ringer.session().unwrap().started_epoch_ms, 1_000);
    }

    #[test]
    fn second_start_is_absorbed() {
        let mut ringer = AlarmRinger::new();
        ringer.handle(RingerCommand::Start, 1_000);
        assert_eq!(
            ringer.handle(RingerCommand::Start, 2_000),
            Transition::AlreadyRinging
        );
        // The original session is untouched.
        assert_eq!(ringer.session().unwrap().started_epoch_ms, 1_000);
    }

    #[test]
    fn stop_returns_to_idle_and_reports_duration() {
        let mut ringer = AlarmRinger::new();
        ringer.handle(RingerCommand::Start, 1_000);
        match ringer.handle(RingerCommand::Stop, 61_000) {
            Transition::Stopped { rang_for_ms, .. } => assert_eq!(rang_for_ms, 60_000),
            other => panic!("expected Stopped, got {other:?}"),
        }
        assert_eq!(ringer.state(), RingerState::Idle);
        assert!(ringer.session().is_none());
    }

    #[test]
    fn stop_while_idle_is_a_no_op() {
        let mut ringer = AlarmRinger::new();
        assert_eq!(
            ringer.handle(RingerCommand::Stop, 1_000),
            Transition::AlreadyIdle
        );
        assert_eq!(ringer.state(), RingerState::Idle);
    }

    #[test]
    fn mark_session_records_resource_outcome() {
        let mut ringer = AlarmRinger::new();
        ringer.handle(RingerCommand::Start, 1_000);
        ringer.mark_session(false, true);
        let session = ringer.session().unwrap();
        assert!(!session.audio_live);
        assert!(session.fullscreen_launched);
    }
}
