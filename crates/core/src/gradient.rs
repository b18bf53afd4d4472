//! Linear color gradient used as the stroke style of every segment.
//!
//! The ramp is pure data: endpoints plus ordered color stops. A [`Surface`]
//! turns it into whatever native gradient object it draws with.
//!
//! [`Surface`]: crate::surface::Surface

use serde::{Deserialize, Serialize};

use crate::color::Srgb;
use crate::error::FieldError;

/// The fixed flow-field ramp: `(offset, hex color)` pairs.
pub const FLOW_RAMP: &[(f64, &str)] = &[
    (0.1, "#ff5c33"),
    (0.2, "#ff66b3"),
    (0.4, "#ccccff"),
    (0.6, "#b3ffff"),
    (0.8, "#80ff80"),
    (0.9, "#ffff33"),
];

/// A single color stop at `offset` in [0, 1] along the gradient axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub offset: f64,
    pub color: Srgb,
}

/// A linear gradient from `(x0, y0)` to `(x1, y1)` in surface coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearGradient {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    stops: Vec<ColorStop>,
}

impl LinearGradient {
    /// Creates a gradient along the given axis.
    ///
    /// Every stop offset must be a finite value in [0, 1] and offsets must be
    /// non-decreasing. Returns `FieldError::InvalidGradient` otherwise.
    pub fn new(
        from: (f64, f64),
        to: (f64, f64),
        stops: Vec<ColorStop>,
    ) -> Result<Self, FieldError> {
        if let Some(bad) = stops
            .iter()
            .find(|s| !s.offset.is_finite() || !(0.0..=1.0).contains(&s.offset))
        {
            return Err(FieldError::InvalidGradient(format!(
                "stop offset {} outside [0, 1]",
                bad.offset
            )));
        }
        if stops.windows(2).any(|w| w[1].offset < w[0].offset) {
            return Err(FieldError::InvalidGradient(
                "stop offsets must be non-decreasing".to_string(),
            ));
        }
        Ok(Self {
            x0: from.0,
            y0: from.1,
            x1: to.0,
            y1: to.1,
            stops,
        })
    }

    /// The flow-field ramp spanning the surface diagonal `(0,0)` to
    /// `(width, height)`.
    pub fn flow_ramp(width: u32, height: u32) -> Result<Self, FieldError> {
        let stops = FLOW_RAMP
            .iter()
            .map(|&(offset, hex)| Srgb::from_hex(hex).map(|color| ColorStop { offset, color }))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new((0.0, 0.0), (width as f64, height as f64), stops)
    }

    /// Start point of the gradient axis.
    pub fn start(&self) -> (f64, f64) {
        (self.x0, self.y0)
    }

    /// End point of the gradient axis.
    pub fn end(&self) -> (f64, f64) {
        (self.x1, self.y1)
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(offset: f64) -> ColorStop {
        ColorStop {
            offset,
            color: Srgb {
                r: 0.0,
                g: 0.0,
                b: 0.0,
            },
        }
    }

    #[test]
    fn flow_ramp_spans_surface_diagonal() {
        let g = LinearGradient::flow_ramp(800, 600).unwrap();
        assert_eq!(g.start(), (0.0, 0.0));
        assert_eq!(g.end(), (800.0, 600.0));
    }

    #[test]
    fn flow_ramp_reproduces_stops_exactly() {
        let g = LinearGradient::flow_ramp(10, 10).unwrap();
        let got: Vec<(f64, String)> = g
            .stops()
            .iter()
            .map(|s| (s.offset, s.color.to_hex()))
            .collect();
        let want: Vec<(f64, String)> = FLOW_RAMP
            .iter()
            .map(|&(o, h)| (o, h.to_string()))
            .collect();
        assert_eq!(got, want);
    }

    #[test]
    fn new_rejects_offset_above_one() {
        let result = LinearGradient::new((0.0, 0.0), (1.0, 1.0), vec![stop(1.5)]);
        assert!(matches!(result, Err(FieldError::InvalidGradient(_))));
    }

    #[test]
    fn new_rejects_nan_offset() {
        let result = LinearGradient::new((0.0, 0.0), (1.0, 1.0), vec![stop(f64::NAN)]);
        assert!(matches!(result, Err(FieldError::InvalidGradient(_))));
    }

    #[test]
    fn new_rejects_unsorted_stops() {
        let result = LinearGradient::new((0.0, 0.0), (1.0, 1.0), vec![stop(0.6), stop(0.2)]);
        assert!(matches!(result, Err(FieldError::InvalidGradient(_))));
    }

    #[test]
    fn new_accepts_empty_and_repeated_offsets() {
        assert!(LinearGradient::new((0.0, 0.0), (1.0, 1.0), vec![]).is_ok());
        assert!(LinearGradient::new((0.0, 0.0), (1.0, 1.0), vec![stop(0.5), stop(0.5)]).is_ok());
    }

    #[test]
    fn serde_round_trip_keeps_hex_colors() {
        let g = LinearGradient::flow_ramp(300, 200).unwrap();
        let json = serde_json::to_value(&g).unwrap();
        assert_eq!(json["stops"][0]["color"], "#ff5c33");
        assert_eq!(json["x1"], 300.0);
        let back: LinearGradient = serde_json::from_value(json).unwrap();
        assert_eq!(back, g);
    }
}
