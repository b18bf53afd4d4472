use flowfield_core::{FieldError, FrameScheduler};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Shared slot for the frame callback, filled once the session exists.
pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// `requestAnimationFrame` as a [`FrameScheduler`]; handles are rAF ids.
pub struct AnimationFrames {
    window: web::Window,
    callback: FrameCallback,
}

impl AnimationFrames {
    pub fn new(window: web::Window, callback: FrameCallback) -> Self {
        Self { window, callback }
    }
}

impl FrameScheduler for AnimationFrames {
    type Handle = i32;

    fn request_frame(&mut self) -> Result<i32, FieldError> {
        let slot = self.callback.borrow();
        let cb = slot
            .as_ref()
            .ok_or_else(|| FieldError::Scheduler("frame callback not installed".into()))?;
        self.window
            .request_animation_frame(cb.as_ref().unchecked_ref())
            .map_err(|e| FieldError::Scheduler(format!("{e:?}")))
    }

    fn cancel_frame(&mut self, handle: i32) {
        if let Err(e) = self.window.cancel_animation_frame(handle) {
            log::warn!("cancelAnimationFrame({handle}) failed: {e:?}");
        }
    }
}
