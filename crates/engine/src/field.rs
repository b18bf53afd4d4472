//! The closed-form field: per-cell angle and pointer-reactive segment length.
//!
//! Everything here is pure. The engine calls [`segment_at`] once per grid
//! cell per redraw.

use glam::DVec2;

/// Floor on squared pointer distance before scaling.
pub const MINIMUM_LINE_LENGTH: f64 = 10_000.0;
/// Converts the user-facing `maximumLineLength` into squared-distance units.
pub const MAXIMUM_LENGTH_SCALE: f64 = 10_000.0;
/// Converts clamped squared distance into segment length.
pub const LENGTH_SCALE: f64 = 0.0001;

/// Field direction at `(x, y)` for the current amplitude.
///
/// Independent of the pointer; zero everywhere when `radius` is zero.
#[inline]
pub fn angle(x: f64, y: f64, radius: f64, zoom: f64) -> f64 {
    ((x * zoom).cos() + (y * zoom).sin()) * radius
}

/// Segment length for a squared pointer distance `d2`.
///
/// `d2` is capped at `maximum_line_length * 10000` and floored at
/// `minimum_line_length`, upper bound checked first. Unlike `f64::clamp`
/// this never panics when the bounds cross: the cap wins unless `d2` is
/// below both bounds.
#[inline]
pub fn segment_length(d2: f64, minimum_line_length: f64, maximum_line_length: f64) -> f64 {
    let cap = maximum_line_length * MAXIMUM_LENGTH_SCALE;
    let d = if d2 > cap {
        cap
    } else if d2 < minimum_line_length {
        minimum_line_length
    } else {
        d2
    };
    d * LENGTH_SCALE
}

/// End point of a segment of `length` leaving `origin` at `angle` radians.
#[inline]
pub fn segment_end(origin: DVec2, angle: f64, length: f64) -> DVec2 {
    origin + DVec2::new(angle.cos(), angle.sin()) * length
}

/// One drawn segment with the quantities that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: DVec2,
    pub to: DVec2,
    pub angle: f64,
    pub length: f64,
}

/// Inputs to the per-cell evaluation that stay fixed across one redraw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSample {
    pub radius: f64,
    pub zoom: f64,
    pub minimum_line_length: f64,
    pub maximum_line_length: f64,
}

/// Evaluates the segment drawn at grid point `point` with the pointer at `pointer`.
pub fn segment_at(point: DVec2, pointer: DVec2, sample: &FieldSample) -> Segment {
    let angle = angle(point.x, point.y, sample.radius, sample.zoom);
    let d2 = pointer.distance_squared(point);
    let length = segment_length(d2, sample.minimum_line_length, sample.maximum_line_length);
    Segment {
        from: point,
        to: segment_end(point, angle, length),
        angle,
        length,
    }
}
