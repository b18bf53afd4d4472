#![deny(unsafe_code)]
//! Pointer-reactive flow field engine.
//!
//! Draws a grid of short segments whose direction is a closed-form function
//! of position and a slowly breathing amplitude, and whose length grows with
//! squared distance from the pointer. Redraws are gated to a fixed 60 Hz
//! cadence regardless of how often the host ticks.
//!
//! [`FlowField`] is the engine; [`Session`] owns it together with the
//! pending frame handle and rebuilds it on resize.

pub mod field;
pub mod oscillator;
pub mod session;
pub mod timestep;

use flowfield_core::params::{json_type_name, DEFAULT_STARTED};
use flowfield_core::{Engine, FieldError, FlowParams, LinearGradient, PointerTracker, Surface};
use glam::DVec2;
use serde_json::{json, Value};

use field::{segment_at, FieldSample, Segment, MINIMUM_LINE_LENGTH};
use oscillator::Oscillator;
use timestep::FixedTimestep;

pub use session::Session;

/// The flow field engine bound to one surface of fixed size.
///
/// Dimensions and the color ramp are captured at construction; a resize
/// means building a new engine. Tunables in [`FlowParams`] may be changed
/// at any time between steps and take effect at the next redraw.
pub struct FlowField<S: Surface> {
    surface: S,
    width: u32,
    height: u32,
    gradient: LinearGradient,
    params: FlowParams,
    minimum_line_length: f64,
    oscillator: Oscillator,
    clock: FixedTimestep,
    pointer: PointerTracker,
}

impl<S: Surface> FlowField<S> {
    /// Creates an engine with its own pointer tracker.
    ///
    /// Returns `FieldError::InvalidDimensions` if width or height is zero,
    /// or the surface's error if it cannot install the gradient.
    pub fn new(surface: S, width: u32, height: u32) -> Result<Self, FieldError> {
        Self::with_pointer(surface, width, height, PointerTracker::new())
    }

    /// Creates an engine reading from an existing pointer tracker.
    pub fn with_pointer(
        mut surface: S,
        width: u32,
        height: u32,
        pointer: PointerTracker,
    ) -> Result<Self, FieldError> {
        if width == 0 || height == 0 {
            return Err(FieldError::InvalidDimensions);
        }
        let gradient = LinearGradient::flow_ramp(width, height)?;
        surface.set_stroke_gradient(&gradient)?;
        log::debug!("flow field {width}x{height} constructed");
        Ok(Self {
            surface,
            width,
            height,
            gradient,
            params: FlowParams::default(),
            minimum_line_length: MINIMUM_LINE_LENGTH,
            oscillator: Oscillator::new(),
            clock: FixedTimestep::default(),
            pointer,
        })
    }

    /// Creates an engine from a JSON params object.
    ///
    /// Missing keys keep their defaults. Every present key goes through
    /// [`Engine::set_param`], so unknown names, wrong types and
    /// out-of-range values are errors rather than silent fallbacks.
    pub fn from_json(
        surface: S,
        width: u32,
        height: u32,
        pointer: PointerTracker,
        params: &Value,
    ) -> Result<Self, FieldError> {
        let entries = params
            .as_object()
            .ok_or_else(|| FieldError::ParamTypeMismatch {
                name: "params".to_string(),
                expected: "object".to_string(),
                got: json_type_name(params).to_string(),
            })?;
        let mut engine = Self::with_pointer(surface, width, height, pointer)?;
        for (name, value) in entries {
            engine.set_param(name, value)?;
        }
        Ok(engine)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The color ramp installed as stroke style at construction.
    pub fn gradient(&self) -> &LinearGradient {
        &self.gradient
    }

    pub fn params(&self) -> &FlowParams {
        &self.params
    }

    /// Unvalidated access to the tunables. Out-of-range values (e.g. a zero
    /// `cell_size`) are a caller contract violation.
    pub fn params_mut(&mut self) -> &mut FlowParams {
        &mut self.params
    }

    pub fn oscillator(&self) -> &Oscillator {
        &self.oscillator
    }

    pub fn minimum_line_length(&self) -> f64 {
        self.minimum_line_length
    }

    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Tears the engine down, handing back its surface.
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Grid sample points, row by row, at `cell_size` stride.
    ///
    /// # Panics
    ///
    /// Panics if `cell_size` is zero.
    pub fn grid_points(&self) -> impl Iterator<Item = DVec2> {
        let stride = self.params.cell_size as usize;
        let width = self.width;
        (0..self.height).step_by(stride).flat_map(move |y| {
            (0..width)
                .step_by(stride)
                .map(move |x| DVec2::new(x as f64, y as f64))
        })
    }

    /// The segment at `point` for the current amplitude and pointer.
    pub fn segment(&self, point: DVec2) -> Segment {
        segment_at(point, self.pointer.position(), &self.sample())
    }

    /// Clears the surface and draws every grid cell.
    ///
    /// The amplitude advances (unless paused) before the grid is drawn.
    pub fn redraw(&mut self) {
        let (w, h) = (self.width as f64, self.height as f64);
        self.surface.clear_rect(0.0, 0.0, w, h);
        self.surface.set_line_width(self.params.line_width);
        self.oscillator.advance();

        let stride = self.params.cell_size as usize;
        for y in (0..self.height).step_by(stride) {
            for x in (0..self.width).step_by(stride) {
                let seg = self.segment(DVec2::new(x as f64, y as f64));
                self.surface.stroke_line(seg.from, seg.to);
            }
        }
    }

    fn sample(&self) -> FieldSample {
        FieldSample {
            radius: self.oscillator.radius(),
            zoom: self.params.zoom,
            minimum_line_length: self.minimum_line_length,
            maximum_line_length: self.params.maximum_line_length,
        }
    }
}

impl<S: Surface> Engine for FlowField<S> {
    fn step(&mut self, timestamp: f64) -> bool {
        let due = self.clock.tick(timestamp);
        if due {
            self.redraw();
        }
        due
    }

    fn params(&self) -> Value {
        let mut values = self.params.to_json();
        values["started"] = json!(self.oscillator.started());
        values
    }

    fn param_schema(&self) -> Value {
        let mut schema = FlowParams::schema();
        schema["started"] = json!({
            "type": "boolean",
            "default": DEFAULT_STARTED,
            "description": "Whether the amplitude keeps breathing (pause/resume)"
        });
        schema
    }

    fn set_param(&mut self, name: &str, value: &Value) -> Result<(), FieldError> {
        if name == "started" {
            let started = value.as_bool().ok_or_else(|| FieldError::ParamTypeMismatch {
                name: name.to_string(),
                expected: "boolean".to_string(),
                got: json_type_name(value).to_string(),
            })?;
            self.oscillator.set_started(started);
            return Ok(());
        }
        self.params.set(name, value)
    }

    fn started(&self) -> bool {
        self.oscillator.started()
    }

    fn set_started(&mut self, started: bool) {
        self.oscillator.set_started(started);
    }
}
