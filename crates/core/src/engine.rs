//! The core `Engine` trait that an animated field implements.
//!
//! The trait is object-safe so a control panel can bind to `&mut dyn Engine`
//! without knowing which surface the engine draws on.

use crate::error::FieldError;
use serde_json::Value;

/// An animation driven by host frame timestamps with a live parameter surface.
pub trait Engine {
    /// Handles one scheduler tick at `timestamp` (milliseconds).
    ///
    /// Returns `true` if the tick performed a full redraw.
    fn step(&mut self, timestamp: f64) -> bool;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing all tunable parameters, their types, ranges, and defaults.
    fn param_schema(&self) -> Value;

    /// Writes one parameter through the binding surface, enforcing its range.
    fn set_param(&mut self, name: &str, value: &Value) -> Result<(), FieldError>;

    /// Whether amplitude evolution is running (not paused).
    fn started(&self) -> bool;

    fn set_started(&mut self, started: bool);

    /// Flips pause/resume and returns the new `started` value.
    fn toggle_pause(&mut self) -> bool {
        let next = !self.started();
        self.set_started(next);
        next
    }
}
