//! Owns the running engine and its pending frame.
//!
//! The session is the only holder of the scheduled-frame handle. Resizing
//! cancels that handle before the old engine is dropped, so a stale frame
//! can never call into a torn-down engine.

use flowfield_core::{Engine, FieldError, FrameScheduler, PointerTracker, Surface};

use crate::FlowField;

pub struct Session<S: Surface, F: FrameScheduler> {
    engine: FlowField<S>,
    scheduler: F,
    pointer: PointerTracker,
    pending: Option<F::Handle>,
}

impl<S: Surface, F: FrameScheduler> Session<S, F> {
    /// Builds the first engine. Nothing is scheduled until [`Session::start`].
    pub fn new(surface: S, width: u32, height: u32, scheduler: F) -> Result<Self, FieldError> {
        let pointer = PointerTracker::new();
        let engine = FlowField::with_pointer(surface, width, height, pointer.clone())?;
        Ok(Self {
            engine,
            scheduler,
            pointer,
            pending: None,
        })
    }

    /// Arms the first frame. A no-op if a frame is already pending.
    pub fn start(&mut self) -> Result<(), FieldError> {
        if self.pending.is_none() {
            self.pending = Some(self.scheduler.request_frame()?);
        }
        Ok(())
    }

    /// Handles a fired frame: steps the engine and re-arms.
    ///
    /// A frame arriving while nothing is pending is stale and ignored.
    /// Returns whether the engine redrew.
    pub fn on_frame(&mut self, timestamp: f64) -> bool {
        if self.pending.take().is_none() {
            log::debug!("ignoring stale frame at {timestamp}");
            return false;
        }
        let redrew = self.engine.step(timestamp);
        match self.scheduler.request_frame() {
            Ok(handle) => self.pending = Some(handle),
            Err(e) => log::warn!("animation stopped: {e}"),
        }
        redrew
    }

    /// Replaces the engine for a new surface size.
    ///
    /// Cancels the pending frame, builds a fresh engine with default
    /// tunables on `surface`, and re-arms. The pointer tracker carries over.
    /// Returns the retired engine's surface.
    pub fn resize(&mut self, surface: S, width: u32, height: u32) -> Result<S, FieldError> {
        self.stop();
        let engine = FlowField::with_pointer(surface, width, height, self.pointer.clone())?;
        let old = std::mem::replace(&mut self.engine, engine);
        log::debug!(
            "resized {}x{} -> {width}x{height}",
            old.width(),
            old.height()
        );
        self.start()?;
        Ok(old.into_surface())
    }

    /// Cancels the pending frame, if any.
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    pub fn engine(&self) -> &FlowField<S> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut FlowField<S> {
        &mut self.engine
    }

    /// Handle for input handlers; shared with every engine this session builds.
    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowfield_core::{DrawCommand, ManualScheduler, RecordingSurface};
    use serde_json::json;

    type TestSession = Session<RecordingSurface, ManualScheduler>;

    fn session(width: u32, height: u32) -> TestSession {
        Session::new(RecordingSurface::new(), width, height, ManualScheduler::new()).unwrap()
    }

    /// Fires pending frames `tick_ms` apart, `n` times.
    fn pump(s: &mut TestSession, start: f64, tick_ms: f64, n: usize) -> f64 {
        let mut now = start;
        for _ in 0..n {
            if s.scheduler_mut().fire().is_none() {
                break;
            }
            now += tick_ms;
            s.on_frame(now);
        }
        now
    }

    #[test]
    fn new_session_is_idle_until_started() {
        let mut s = session(100, 100);
        assert!(!s.is_running());
        assert!(s.scheduler().pending().is_empty());
        s.start().unwrap();
        assert!(s.is_running());
        assert_eq!(s.scheduler().pending().len(), 1);
    }

    #[test]
    fn start_twice_keeps_one_pending_frame() {
        let mut s = session(100, 100);
        s.start().unwrap();
        s.start().unwrap();
        assert_eq!(s.scheduler().pending().len(), 1);
    }

    #[test]
    fn each_frame_rearms_exactly_once() {
        let mut s = session(100, 100);
        s.start().unwrap();
        pump(&mut s, 0.0, 16.0, 10);
        assert_eq!(s.scheduler().pending().len(), 1);
        assert!(s.engine().surface().clear_count() > 0);
    }

    #[test]
    fn stale_frame_is_ignored() {
        let mut s = session(100, 100);
        assert!(!s.on_frame(1000.0));
        assert!(s.scheduler().pending().is_empty());
    }

    #[test]
    fn stop_cancels_pending_frame() {
        let mut s = session(100, 100);
        s.start().unwrap();
        let handle = s.scheduler().pending()[0];
        s.stop();
        assert!(!s.is_running());
        assert_eq!(s.scheduler().cancelled(), &[handle]);
        assert_eq!(s.scheduler_mut().fire(), None);
    }

    #[test]
    fn resize_rebuilds_engine_and_cancels_old_frame() {
        let mut s = session(800, 600);
        s.engine_mut().params_mut().cell_size = 20;
        s.start().unwrap();
        let now = pump(&mut s, 0.0, 4.0, 30);
        assert!(s.engine().surface().clear_count() > 0);
        assert_eq!(s.engine().surface().lines_since_clear(), 40 * 30);

        let old_handle = s.scheduler().pending()[0];
        let old_surface = s.resize(RecordingSurface::new(), 400, 300).unwrap();
        assert!(s.scheduler().cancelled().contains(&old_handle));
        assert!(!s.scheduler().pending().contains(&old_handle));

        // Tunables are not preserved across resize.
        assert_eq!(s.engine().params().cell_size, 15);
        assert_eq!(s.engine().width(), 400);
        assert_eq!(s.engine().height(), 300);
        assert_eq!(s.engine().gradient().end(), (400.0, 300.0));

        s.engine_mut().params_mut().cell_size = 20;
        pump(&mut s, now, 4.0, 30);
        let new_surface = s.engine().surface();
        assert!(new_surface.clear_count() > 0);
        assert_eq!(new_surface.lines_since_clear(), 20 * 15);
        for cmd in new_surface.commands() {
            if let DrawCommand::Clear { w, h, .. } = cmd {
                assert_eq!((*w, *h), (400.0, 300.0));
            }
        }

        // Nothing reached the retired surface after the resize.
        let old_clears = old_surface.clear_count();
        pump(&mut s, now + 1000.0, 4.0, 30);
        assert_eq!(old_surface.clear_count(), old_clears);
    }

    #[test]
    fn resize_keeps_pointer_tracker() {
        let mut s = session(200, 200);
        let handle = s.pointer().clone();
        s.resize(RecordingSurface::new(), 100, 100).unwrap();
        handle.set_position(12.0, 34.0);
        assert_eq!(s.engine().pointer().position(), glam::DVec2::new(12.0, 34.0));
    }

    #[test]
    fn resize_restarts_a_stopped_session() {
        let mut s = session(200, 200);
        s.resize(RecordingSurface::new(), 100, 100).unwrap();
        assert!(s.is_running());
    }

    #[test]
    fn resize_to_zero_fails_and_leaves_loop_stopped() {
        let mut s = session(200, 200);
        s.start().unwrap();
        let result = s.resize(RecordingSurface::new(), 0, 100);
        assert!(matches!(result, Err(FieldError::InvalidDimensions)));
        assert!(!s.is_running());
        assert_eq!(s.engine().width(), 200);
    }

    #[test]
    fn binding_writes_between_frames_apply_at_next_redraw() {
        let mut s = session(100, 100);
        s.start().unwrap();
        let now = pump(&mut s, 0.0, 20.0, 4);
        s.engine_mut().set_param("cellSize", &json!(50)).unwrap();
        pump(&mut s, now, 20.0, 4);
        assert_eq!(s.engine().surface().lines_since_clear(), 4);
    }
}
