//! Last known pointer/touch position, shared between input handlers and
//! the render loop.
//!
//! Input events write and the engine reads, both on the single rendering
//! thread, so a shared [`Cell`] is enough: last write wins, no history.

use glam::DVec2;
use std::cell::Cell;
use std::rc::Rc;

/// Shared handle to the most recent pointer position in surface space.
///
/// Cloning yields another handle to the same position.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    position: Rc<Cell<DVec2>>,
}

impl PointerTracker {
    /// Creates a tracker at `(0, 0)`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the position. No validation: coordinates may be negative
    /// or beyond the surface bounds.
    pub fn set_position(&self, x: f64, y: f64) {
        self.position.set(DVec2::new(x, y));
    }

    /// The last set position, or `(0, 0)` if never set.
    pub fn position(&self) -> DVec2 {
        self.position.get()
    }

    /// Records the first touch point, if any. Returns whether it updated.
    pub fn set_from_touches(&self, touches: &[(f64, f64)]) -> bool {
        match first_touch(touches) {
            Some(p) => {
                self.position.set(p);
                true
            }
            None => false,
        }
    }
}

/// The first touch point of a touch list, if the list is non-empty.
pub fn first_touch(touches: &[(f64, f64)]) -> Option<DVec2> {
    touches.first().map(|&(x, y)| DVec2::new(x, y))
}
