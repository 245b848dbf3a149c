//! Alarm scheduler.
//!
//! Computes the next trigger and registers exactly one exact, wake-capable,
//! one-shot timer with the OS. A new registration replaces any pending one;
//! at most one wake event exists per app instance.

use chrono::{DateTime, TimeZone};

use super::trigger::{compute_trigger, AlarmRequest};
use crate::error::{CoreError, ScheduleError};
use crate::permission::{PermissionGate, PermissionHost};

/// Platform seam for the OS exact-alarm facility.
///
/// `register` must replace any previously registered wake event. Inexact or
/// batched alarms are not acceptable here; firing at the precise requested
/// time is a correctness requirement.
pub trait WakeRegistrar {
    fn register(&mut self, trigger_epoch_ms: i64) -> Result<(), ScheduleError>;
    fn cancel(&mut self) -> Result<(), ScheduleError>;
}

/// Result of a successful `schedule` call.
#[derive(Debug, Clone)]
pub struct Scheduled<Tz: TimeZone> {
    pub trigger: DateTime<Tz>,
    /// Surface the one-shot full-screen advisory alongside this attempt.
    pub show_fullscreen_hint: bool,
}

pub struct AlarmScheduler<W: WakeRegistrar> {
    registrar: W,
}

impl<W: WakeRegistrar> AlarmScheduler<W> {
    pub fn new(registrar: W) -> Self {
        Self { registrar }
    }

    pub fn registrar(&self) -> &W {
        &self.registrar
    }

    /// Schedule the alarm, guarded by the permission gate.
    ///
    /// On any gate failure nothing is registered. A registration failure
    /// after the gate has passed is surfaced as an error; there is no retry.
    pub fn schedule<H: PermissionHost, Tz: TimeZone>(
        &mut self,
        gate: &mut PermissionGate<H>,
        request: AlarmRequest,
        now: &DateTime<Tz>,
    ) -> Result<Scheduled<Tz>, CoreError> {
        let clearance = gate.prepare_schedule()?;
        let trigger = compute_trigger(request, now)?;
        self.registrar.register(trigger.timestamp_millis())?;
        Ok(Scheduled {
            trigger,
            show_fullscreen_hint: clearance.show_fullscreen_hint,
        })
    }

    /// Drop the pending wake event, if any.
    pub fn cancel(&mut self) -> Result<(), CoreError> {
        self.registrar.cancel()?;
        Ok(())
    }
}
