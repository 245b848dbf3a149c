mod channel;
mod ringer;
mod scheduler;
mod service;
mod trigger;

pub use channel::{CommandChannel, MpscCommandChannel};
pub use ringer::{AlarmRinger, AlarmSession, RingerCommand, RingerState, Transition};
pub use scheduler::{AlarmScheduler, Scheduled, WakeRegistrar};
pub use service::{AudioError, AudioSink, ForegroundHost, RingNotice, RingerService};
pub use trigger::{compute_trigger, AlarmRequest};
