//! The breathing amplitude applied to the angle function.
//!
//! `radius` moves by `vr` per redraw and `vr` reverses once `radius` leaves
//! `[-5, 5]`. There is no hard clamp, so `radius` may overshoot the bound
//! by at most one step before turning back.

/// Amplitude bound at which velocity reverses.
pub const AMPLITUDE_BOUND: f64 = 5.0;
pub const DEFAULT_RADIUS: f64 = 0.0;
pub const DEFAULT_VR: f64 = 0.03;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillator {
    pub(crate) radius: f64,
    pub(crate) vr: f64,
    pub(crate) started: bool,
}

impl Default for Oscillator {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            vr: DEFAULT_VR,
            started: true,
        }
    }
}

impl Oscillator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current amplitude.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Current signed velocity of the amplitude.
    pub fn vr(&self) -> f64 {
        self.vr
    }

    pub fn started(&self) -> bool {
        self.started
    }

    /// Pausing freezes `radius` and `vr`; it never touches them.
    pub fn set_started(&mut self, started: bool) {
        self.started = started;
    }

    /// Advances one redraw. Returns `false` without changes when paused.
    pub fn advance(&mut self) -> bool {
        if !self.started {
            return false;
        }
        self.radius += self.vr;
        if self.radius > AMPLITUDE_BOUND || self.radius < -AMPLITUDE_BOUND {
            self.vr = -self.vr;
        }
        true
    }
}
