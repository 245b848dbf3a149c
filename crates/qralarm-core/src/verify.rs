//! Verification gate.
//!
//! Silencing the alarm requires scanning a QR code whose decoded payload
//! equals the stored token byte-for-byte. No normalization, trimming, or
//! case-folding -- the payload is opaque on both sides. A mismatch leaves
//! the ringer untouched and the user may retry indefinitely.

use crate::alarm::{CommandChannel, RingerCommand};
use crate::error::ChannelError;
use crate::storage::Token;

/// Outcome of handling one decoded scanner frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Payload matched; the stop command was dispatched.
    Matched,
    /// Payload did not match; retryable, non-fatal.
    Mismatch,
    /// The scanner re-delivered the frame it just delivered; suppressed so
    /// one held-up wrong code does not spam mismatch alerts.
    DuplicateFrame,
}

pub struct VerificationGate {
    token: Token,
    last_payload: Option<String>,
}

impl VerificationGate {
    pub fn new(token: Token) -> Self {
        Self {
            token,
            last_payload: None,
        }
    }

    /// Pure comparison: exact byte equality against the stored token.
    pub fn verify(&self, payload: &str) -> bool {
        payload.as_bytes() == self.token.as_bytes()
    }

    /// Handle one decoded frame: dedupe, compare, and on match dispatch the
    /// stop command to the ringer unit.
    ///
    /// # Errors
    /// Only channel failures propagate; a mismatch is an outcome, not an
    /// error.
    pub fn handle_scan(
        &mut self,
        payload: &str,
        channel: &dyn CommandChannel,
    ) -> Result<ScanOutcome, ChannelError> {
        if self.last_payload.as_deref() == Some(payload) {
            return Ok(ScanOutcome::DuplicateFrame);
        }
        self.last_payload = Some(payload.to_string());

        if self.verify(payload) {
            channel.dispatch(RingerCommand::Stop)?;
            Ok(ScanOutcome::Matched)
        } else {
            Ok(ScanOutcome::Mismatch)
        }
    }

    /// Forget the last frame, e.g. when the scanner view is reopened.
    pub fn reset_dedupe(&mut self) {
        self.last_payload = None;
    }
}
