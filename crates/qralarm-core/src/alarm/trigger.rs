//! Trigger time computation.
//!
//! An alarm request is a wall-clock time of day; the trigger is the next
//! absolute instant that time of day occurs. If today's occurrence has
//! already passed, the trigger rolls to the same time tomorrow.

use chrono::{DateTime, Duration, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// User-chosen wake-up time of day. Ephemeral; held only until
/// "Set Alarm" is invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmRequest {
    pub hour: u32,
    pub minute: u32,
}

impl AlarmRequest {
    /// # Errors
    /// Returns `InvalidTime` when hour or minute is out of range.
    pub fn new(hour: u32, minute: u32) -> Result<Self, ScheduleError> {
        if hour > 23 || minute > 59 {
            return Err(ScheduleError::InvalidTime { hour, minute });
        }
        Ok(Self { hour, minute })
    }
}

/// Compute the next trigger for `request`, strictly after `now`.
///
/// Seconds are zeroed. If today's {hour, minute} is at or before `now`,
/// the result is exactly one calendar day later with time-of-day unchanged.
///
/// Generic over the timezone so callers pass local time and tests pass a
/// fixed instant.
///
/// # Errors
/// Returns `UnrepresentableTime` when the wall-clock time does not exist in
/// the given timezone (skipped by a DST transition).
pub fn compute_trigger<Tz: TimeZone>(
    request: AlarmRequest,
    now: &DateTime<Tz>,
) -> Result<DateTime<Tz>, ScheduleError> {
    let tz = now.timezone();
    let unrepresentable = || ScheduleError::UnrepresentableTime {
        hour: request.hour,
        minute: request.minute,
    };

    let naive_today = now
        .date_naive()
        .and_hms_opt(request.hour, request.minute, 0)
        .ok_or_else(unrepresentable)?;

    let candidate = tz
        .from_local_datetime(&naive_today)
        .earliest()
        .ok_or_else(unrepresentable)?;

    if candidate > *now {
        return Ok(candidate);
    }

    let naive_tomorrow = naive_today + Duration::days(1);
    tz.from_local_datetime(&naive_tomorrow)
        .earliest()
        .ok_or_else(unrepresentable)
}
