//! Foreground guard for export/share actions.
//!
//! Sharing the QR image only makes sense with an active screen; invoked
//! while the app is backgrounded (a race that genuinely happens around the
//! share sheet), the action is silently aborted -- no user-facing error.
//! The flow is two-phase because the app can lose the foreground between
//! capturing the image and opening the share sheet.

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Foreground,
    Background,
}

/// Platform seam reporting whether the app currently has an active screen.
pub trait VisibilityProbe {
    fn visibility(&self) -> Visibility;
}

/// How a guarded share attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareStatus {
    Completed,
    /// Not in the foreground at the start; nothing was captured.
    SkippedBackground,
    /// Lost the foreground after capture; the share sheet was not opened.
    CancelledBackground,
}

/// Run `capture` then `share`, re-checking visibility between the phases.
///
/// Background skips/cancels are logged and reported in the status; only the
/// closures' own errors propagate.
pub fn share_when_foreground<P, T, E>(
    probe: &P,
    capture: impl FnOnce() -> Result<T, E>,
    share: impl FnOnce(T) -> Result<(), E>,
) -> Result<ShareStatus, E>
where
    P: VisibilityProbe + ?Sized,
{
    if probe.visibility() != Visibility::Foreground {
        debug!("share blocked: app not active");
        return Ok(ShareStatus::SkippedBackground);
    }

    let captured = capture()?;

    if probe.visibility() != Visibility::Foreground {
        debug!("share cancelled: app became inactive");
        return Ok(ShareStatus::CancelledBackground);
    }

    share(captured)?;
    Ok(ShareStatus::Completed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Probe that replays a scripted visibility sequence.
    struct ScriptedProbe {
        sequence: RefCell<Vec<Visibility>>,
    }

    impl ScriptedProbe {
        fn new(sequence: Vec<Visibility>) -> Self {
            Self {
                sequence: RefCell::new(sequence),
            }
        }
    }

    impl VisibilityProbe for ScriptedProbe {
        fn visibility(&self) -> Visibility {
            let mut seq = self.sequence.borrow_mut();
            if seq.len() > 1 {
                seq.remove(0)
            } else {
                seq[0]
            }
        }
    }

    #[test]
    fn foreground_flow_completes() {
        let probe = ScriptedProbe::new(vec![Visibility::Foreground]);
        let status = share_when_foreground(
            &probe,
            || Ok::<_, std::io::Error>("png-bytes"),
            |_| Ok(()),
        )
        .unwrap();
        assert_eq!(status, ShareStatus::Completed);
    }

    #[test]
    fn background_at_start_skips_without_capturing() {
        let probe = ScriptedProbe::new(vec![Visibility::Background]);
        let captured = RefCell::new(false);
        let status = share_when_foreground(
            &probe,
            || {
                *captured.borrow_mut() = true;
                Ok::<_, std::io::Error>(())
            },
            |_| Ok(()),
        )
        .unwrap();
        assert_eq!(status, ShareStatus::SkippedBackground);
        assert!(!*captured.borrow());
    }

    #[test]
    fn losing_foreground_after_capture_cancels_share() {
        let probe = ScriptedProbe::new(vec![Visibility::Foreground, Visibility::Background]);
        let shared = RefCell::new(false);
        let status = share_when_foreground(
            &probe,
            || Ok::<_, std::io::Error>(()),
            |_| {
                *shared.borrow_mut() = true;
                Ok(())
            },
        )
        .unwrap();
        assert_eq!(status, ShareStatus::CancelledBackground);
        assert!(!*shared.borrow());
    }

    #[test]
    fn capture_errors_propagate() {
        let probe = ScriptedProbe::new(vec![Visibility::Foreground]);
        let result = share_when_foreground(
            &probe,
            || Err::<(), _>(std::io::Error::other("capture failed")),
            |_| Ok(()),
        );
        assert!(result.is_err());
    }
}
