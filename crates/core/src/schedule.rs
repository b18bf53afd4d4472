//! The "next frame" primitive that drives the animation.
//!
//! A scheduler arms exactly one future callback per request and hands back
//! a handle. Whoever holds the handle owns the pending frame and must
//! cancel it before discarding the engine it would call into.

use crate::error::FieldError;

/// Schedule-once, re-arm-on-completion frame source.
pub trait FrameScheduler {
    /// Opaque identifier of one pending frame.
    type Handle;

    /// Arms the next frame callback.
    fn request_frame(&mut self) -> Result<Self::Handle, FieldError>;

    /// Cancels a pending frame. Cancelling an already fired frame is a no-op.
    fn cancel_frame(&mut self, handle: Self::Handle);
}

/// Deterministic scheduler for tests and tooling.
///
/// Frames never fire on their own: the caller pops them with
/// [`ManualScheduler::fire`] and then invokes the frame callback itself.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_handle: u64,
    pending: Vec<u64>,
    cancelled: Vec<u64>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pops the oldest pending frame, if any.
    pub fn fire(&mut self) -> Option<u64> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }

    /// Frames requested and neither fired nor cancelled.
    pub fn pending(&self) -> &[u64] {
        &self.pending
    }

    /// Every handle cancelled so far, in cancellation order.
    pub fn cancelled(&self) -> &[u64] {
        &self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    type Handle = u64;

    fn request_frame(&mut self) -> Result<u64, FieldError> {
        self.next_handle += 1;
        self.pending.push(self.next_handle);
        Ok(self.next_handle)
    }

    fn cancel_frame(&mut self, handle: u64) {
        if let Some(idx) = self.pending.iter().position(|&h| h == handle) {
            self.pending.remove(idx);
            log::trace!("cancelled frame {handle}");
        }
        self.cancelled.push(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_unique_and_increasing() {
        let mut s = ManualScheduler::new();
        let a = s.request_frame().unwrap();
        let b = s.request_frame().unwrap();
        assert!(b > a);
        assert_eq!(s.pending(), &[a, b]);
    }

    #[test]
    fn fire_pops_oldest_first() {
        let mut s = ManualScheduler::new();
        let a = s.request_frame().unwrap();
        let b = s.request_frame().unwrap();
        assert_eq!(s.fire(), Some(a));
        assert_eq!(s.fire(), Some(b));
        assert_eq!(s.fire(), None);
    }

    #[test]
    fn cancelled_frame_never_fires() {
        let mut s = ManualScheduler::new();
        let a = s.request_frame().unwrap();
        s.cancel_frame(a);
        assert_eq!(s.fire(), None);
        assert_eq!(s.cancelled(), &[a]);
    }

    #[test]
    fn cancel_after_fire_is_noop_on_pending() {
        let mut s = ManualScheduler::new();
        let a = s.request_frame().unwrap();
        assert_eq!(s.fire(), Some(a));
        s.cancel_frame(a);
        assert!(s.pending().is_empty());
    }
}
