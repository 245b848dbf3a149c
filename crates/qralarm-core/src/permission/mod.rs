//! Permission gate.
//!
//! Sequences the OS permissions an alarm needs before it can be trusted to
//! ring and be dismissed: notification display, exact-alarm scheduling, and
//! camera access for the stop scan. The platform side lives behind
//! [`PermissionHost`]; the gate only owns the sequencing, the one-shot
//! full-screen advisory flag, and the no-double-prompt guard.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PermissionError;

/// The permission kinds the alarm lifecycle depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionKind {
    ExactAlarm,
    Notification,
    Camera,
}

impl fmt::Display for PermissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PermissionKind::ExactAlarm => "exact-alarm",
            PermissionKind::Notification => "notification",
            PermissionKind::Camera => "camera",
        };
        f.write_str(name)
    }
}

/// Tri-state permission status, re-checked lazily before each operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    Unknown,
    Granted,
    Denied,
}

/// Platform seam for permission checks and prompts.
///
/// `check` must be side-effect free. `request` may show an OS prompt and
/// returns the state known once the prompt has been issued; a platform whose
/// prompt resolves asynchronously returns `Unknown` until the user acts.
/// `open_settings` redirects the user to the relevant system settings
/// screen.
pub trait PermissionHost {
    fn check(&self, kind: PermissionKind) -> PermissionState;
    fn request(&mut self, kind: PermissionKind) -> PermissionState;
    fn open_settings(&mut self, kind: PermissionKind);

    /// Whether this platform version requires a runtime grant for
    /// notification display at all. Older versions grant it at install time.
    fn requires_notification_grant(&self) -> bool {
        true
    }
}

/// Outcome of a passed pre-schedule permission sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleClearance {
    /// True exactly once per process lifetime: the one-shot advisory about
    /// enabling full-screen display privileges should be surfaced alongside
    /// this (already cleared) attempt.
    pub show_fullscreen_hint: bool,
}

/// Permission gate with process-lifetime session state.
///
/// The full-screen hint flag is injectable so tests can simulate
/// "already shown" and "fresh process" without restarting anything.
pub struct PermissionGate<H: PermissionHost> {
    host: H,
    fullscreen_hint_shown: bool,
    /// Kinds with an OS prompt outstanding. While a kind is in here,
    /// further `ensure` calls re-check state but never re-prompt.
    prompting: HashSet<PermissionKind>,
}

impl<H: PermissionHost> PermissionGate<H> {
    pub fn new(host: H) -> Self {
        Self::with_hint_shown(host, false)
    }

    pub fn with_hint_shown(host: H, fullscreen_hint_shown: bool) -> Self {
        Self {
            host,
            fullscreen_hint_shown,
            prompting: HashSet::new(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Check a permission, prompting at most once while unresolved.
    ///
    /// A second call while a prompt for the same kind is outstanding reuses
    /// the pending check instead of prompting again.
    pub fn ensure(&mut self, kind: PermissionKind) -> PermissionState {
        let state = self.host.check(kind);
        match state {
            PermissionState::Granted | PermissionState::Denied => {
                // Prompt resolved (or never needed); clear the guard.
                self.prompting.remove(&kind);
                state
            }
            PermissionState::Unknown => {
                if self.prompting.contains(&kind) {
                    return PermissionState::Unknown;
                }
                self.prompting.insert(kind);
                let result = self.host.request(kind);
                if result != PermissionState::Unknown {
                    self.prompting.remove(&kind);
                }
                result
            }
        }
    }

    /// Whether the one-shot full-screen advisory has been shown this
    /// process lifetime.
    pub fn fullscreen_hint_shown(&self) -> bool {
        self.fullscreen_hint_shown
    }

    /// Run the pre-schedule sequence:
    ///
    /// 1. Notification permission must be granted where the platform
    ///    requires a runtime grant; denial aborts and opens settings.
    /// 2. The full-screen advisory is marked shown once per process
    ///    lifetime; it accompanies the attempt rather than blocking it.
    /// 3. Exact-alarm privilege is requested if absent; if still absent the
    ///    settings screen is opened and the attempt is deferred -- nothing
    ///    gets registered.
    pub fn prepare_schedule(&mut self) -> Result<ScheduleClearance, PermissionError> {
        if self.host.requires_notification_grant() {
            match self.ensure(PermissionKind::Notification) {
                PermissionState::Granted => {}
                PermissionState::Denied => {
                    self.host.open_settings(PermissionKind::Notification);
                    return Err(PermissionError::Denied(PermissionKind::Notification));
                }
                PermissionState::Unknown => {
                    // Prompt outstanding; treat as not yet granted.
                    return Err(PermissionError::PendingSettings(
                        PermissionKind::Notification,
                    ));
                }
            }
        }

        match self.ensure(PermissionKind::ExactAlarm) {
            PermissionState::Granted => {
                // Consumed only when the clearance reaches the caller, so a
                // deferred attempt does not swallow the advisory.
                let show_fullscreen_hint = !self.fullscreen_hint_shown;
                self.fullscreen_hint_shown = true;
                Ok(ScheduleClearance {
                    show_fullscreen_hint,
                })
            }
            PermissionState::Denied | PermissionState::Unknown => {
                self.host.open_settings(PermissionKind::ExactAlarm);
                Err(PermissionError::PendingSettings(PermissionKind::ExactAlarm))
            }
        }
    }

    /// Camera access for the stop scan; denial redirects to settings.
    pub fn prepare_scan(&mut self) -> Result<(), PermissionError> {
        match self.ensure(PermissionKind::Camera) {
            PermissionState::Granted => Ok(()),
            PermissionState::Denied => {
                self.host.open_settings(PermissionKind::Camera);
                Err(PermissionError::Denied(PermissionKind::Camera))
            }
            PermissionState::Unknown => Err(PermissionError::PendingSettings(
                PermissionKind::Camera,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct FakeHost {
        states: HashMap<PermissionKind, PermissionState>,
        grant_on_request: bool,
        request_counts: HashMap<PermissionKind, u32>,
        settings_opened: Vec<PermissionKind>,
        runtime_notification: bool,
    }

    impl FakeHost {
        fn granted_all() -> Self {
            let mut host = Self::default();
            for kind in [
                PermissionKind::ExactAlarm,
                PermissionKind::Notification,
                PermissionKind::Camera,
            ] {
                host.states.insert(kind, PermissionState::Granted);
            }
            host
        }
    }

    impl PermissionHost for FakeHost {
        fn check(&self, kind: PermissionKind) -> PermissionState {
            *self.states.get(&kind).unwrap_or(&PermissionState::Unknown)
        }

        fn request(&mut self, kind: PermissionKind) -> PermissionState {
            *self.request_counts.entry(kind).or_insert(0) += 1;
            if self.grant_on_request {
                self.states.insert(kind, PermissionState::Granted);
                PermissionState::Granted
            } else {
                PermissionState::Unknown
            }
        }

        fn open_settings(&mut self, kind: PermissionKind) {
            self.settings_opened.push(kind);
        }

        fn requires_notification_grant(&self) -> bool {
            self.runtime_notification
        }
    }

    #[test]
    fn unresolved_prompt_is_not_repeated() {
        let mut gate = PermissionGate::new(FakeHost::default());
        assert_eq!(
            gate.ensure(PermissionKind::Camera),
            PermissionState::Unknown
        );
        assert_eq!(
            gate.ensure(PermissionKind::Camera),
            PermissionState::Unknown
        );
        assert_eq!(gate.host().request_counts[&PermissionKind::Camera], 1);
    }

    #[test]
    fn resolved_prompt_clears_guard() {
        let mut host = FakeHost::default();
        host.grant_on_request = true;
        let mut gate = PermissionGate::new(host);
        assert_eq!(
            gate.ensure(PermissionKind::Camera),
            PermissionState::Granted
        );
        // Granted now; no further prompting.
        assert_eq!(
            gate.ensure(PermissionKind::Camera),
            PermissionState::Granted
        );
        assert_eq!(gate.host().request_counts[&PermissionKind::Camera], 1);
    }

    #[test]
    fn denied_notification_aborts_and_opens_settings() {
        let mut host = FakeHost::granted_all();
        host.runtime_notification = true;
        host.states
            .insert(PermissionKind::Notification, PermissionState::Denied);
        let mut gate = PermissionGate::with_hint_shown(host, true);
        let err = gate.prepare_schedule().unwrap_err();
        assert!(matches!(
            err,
            PermissionError::Denied(PermissionKind::Notification)
        ));
        assert_eq!(
            gate.host().settings_opened,
            vec![PermissionKind::Notification]
        );
    }

    #[test]
    fn notification_gate_skipped_where_not_required() {
        let mut host = FakeHost::default();
        host.runtime_notification = false;
        host.states
            .insert(PermissionKind::ExactAlarm, PermissionState::Granted);
        let mut gate = PermissionGate::with_hint_shown(host, true);
        assert!(!gate.prepare_schedule().unwrap().show_fullscreen_hint);
    }

    #[test]
    fn fullscreen_hint_shown_exactly_once() {
        let host = FakeHost::granted_all();
        let mut gate = PermissionGate::new(host);
        assert!(gate.prepare_schedule().unwrap().show_fullscreen_hint);
        assert!(gate.fullscreen_hint_shown());
        assert!(!gate.prepare_schedule().unwrap().show_fullscreen_hint);
    }

    #[test]
    fn hint_preseeded_for_already_shown_session() {
        let host = FakeHost::granted_all();
        let mut gate = PermissionGate::with_hint_shown(host, true);
        assert!(!gate.prepare_schedule().unwrap().show_fullscreen_hint);
    }

    #[test]
    fn deferred_exact_alarm_does_not_swallow_hint() {
        let mut host = FakeHost::granted_all();
        host.states
            .insert(PermissionKind::ExactAlarm, PermissionState::Denied);
        let mut gate = PermissionGate::new(host);
        assert!(gate.prepare_schedule().is_err());
        assert!(!gate.fullscreen_hint_shown());
        // After the privilege is granted, the first cleared attempt still
        // carries the advisory.
        gate.host_mut()
            .states
            .insert(PermissionKind::ExactAlarm, PermissionState::Granted);
        assert!(gate.prepare_schedule().unwrap().show_fullscreen_hint);
    }

    #[test]
    fn missing_exact_alarm_defers_to_settings() {
        let mut host = FakeHost::granted_all();
        host.states
            .insert(PermissionKind::ExactAlarm, PermissionState::Denied);
        let mut gate = PermissionGate::with_hint_shown(host, true);
        let err = gate.prepare_schedule().unwrap_err();
        assert!(matches!(
            err,
            PermissionError::PendingSettings(PermissionKind::ExactAlarm)
        ));
        assert_eq!(
            gate.host().settings_opened,
            vec![PermissionKind::ExactAlarm]
        );
    }

    #[test]
    fn camera_denial_redirects_to_settings() {
        let mut host = FakeHost::granted_all();
        host.states
            .insert(PermissionKind::Camera, PermissionState::Denied);
        let mut gate = PermissionGate::new(host);
        assert!(gate.prepare_scan().is_err());
        assert_eq!(gate.host().settings_opened, vec![PermissionKind::Camera]);
    }
}
