//! Command channel to the detached ringer unit.
//!
//! The UI side and the ringer unit may not share a process lifetime, so
//! commands travel over an asynchronous channel addressed by a well-known
//! name rather than direct calls. In-process (CLI, tests) the channel is a
//! tokio unbounded mpsc; a platform build would back the same trait with
//! the OS broadcast/service-intent mechanism.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use super::ringer::RingerCommand;
use crate::error::ChannelError;

/// Dispatch an asynchronous command to the ringer unit.
pub trait CommandChannel {
    fn dispatch(&self, command: RingerCommand) -> Result<(), ChannelError>;
}

/// In-process channel implementation over tokio mpsc.
#[derive(Clone)]
pub struct MpscCommandChannel {
    tx: UnboundedSender<RingerCommand>,
}

impl MpscCommandChannel {
    /// Create the channel pair: the dispatcher for the UI side and the
    /// receiver the ringer service loop consumes.
    pub fn new() -> (Self, UnboundedReceiver<RingerCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl CommandChannel for MpscCommandChannel {
    fn dispatch(&self, command: RingerCommand) -> Result<(), ChannelError> {
        self.tx
            .send(command)
            .map_err(|_| ChannelError::Disconnected)
    }
}
