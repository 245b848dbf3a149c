use chrono::{Local, TimeZone, Utc};
use clap::Subcommand;

use qralarm_core::alarm::{AlarmRequest, AlarmScheduler, RingerState};
use qralarm_core::permission::PermissionGate;
use qralarm_core::storage::Database;
use qralarm_core::{CoreError, Event, PermissionError};

use crate::common::{DesktopPermissionHost, KvWakeRegistrar};

#[derive(Subcommand)]
pub enum AlarmAction {
    /// Set the wake-up alarm (replaces any pending one)
    Set {
        /// Hour of day (0-23)
        #[arg(long)]
        hour: u32,
        /// Minute (0-59)
        #[arg(long)]
        minute: u32,
    },
    /// Cancel the pending alarm
    Cancel,
    /// Print the pending alarm as JSON
    Status,
}

pub fn run(action: AlarmAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        AlarmAction::Set { hour, minute } => {
            let request = AlarmRequest::new(hour, minute)?;
            let mut gate = PermissionGate::new(DesktopPermissionHost);
            let mut scheduler = AlarmScheduler::new(KvWakeRegistrar::new(&db));
            let now = Local::now();
            let scheduled = match scheduler.schedule(&mut gate, request, &now) {
                Ok(scheduled) => scheduled,
                Err(CoreError::Permission(e)) => {
                    let (PermissionError::Denied(kind)
                    | PermissionError::PendingSettings(kind)) = e;
                    let event = Event::PermissionRefused {
                        kind,
                        at: Utc::now(),
                    };
                    println!("{}", serde_json::to_string_pretty(&event)?);
                    return Err(e.into());
                }
                Err(e) => return Err(e.into()),
            };

            if scheduled.show_fullscreen_hint {
                eprintln!(
                    "hint: enable full-screen notifications so the alarm can take over the lock screen"
                );
            }

            let event = Event::AlarmScheduled {
                trigger_epoch_ms: scheduled.trigger.timestamp_millis(),
                trigger_local: scheduled.trigger.format("%Y-%m-%d %H:%M").to_string(),
                at: Utc::now(),
            };
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        AlarmAction::Cancel => {
            let mut scheduler = AlarmScheduler::new(KvWakeRegistrar::new(&db));
            scheduler.cancel()?;
            let event = Event::AlarmCancelled { at: Utc::now() };
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        AlarmAction::Status => {
            let registrar = KvWakeRegistrar::new(&db);
            let pending = registrar.pending()?;
            if let Some(ms) = pending {
                if let Some(local) = Local.timestamp_millis_opt(ms).single() {
                    eprintln!("pending alarm at {}", local.format("%Y-%m-%d %H:%M"));
                }
            }
            let event = Event::StateSnapshot {
                state: RingerState::Idle,
                pending_trigger_epoch_ms: pending,
                at: Utc::now(),
            };
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
    }

    Ok(())
}
