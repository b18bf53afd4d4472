//! Fixed-timestep gate decoupling redraw cadence from the host's tick rate.

/// Target redraw interval in milliseconds (60 Hz).
pub const DEFAULT_INTERVAL_MS: f64 = 1000.0 / 60.0;

/// Accumulates elapsed time between ticks and opens once it exceeds the interval.
///
/// The tick that opens the gate resets the accumulator to zero and does
/// not add its own delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedTimestep {
    last_time: f64,
    timer: f64,
    interval: f64,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL_MS)
    }
}

impl FixedTimestep {
    pub fn new(interval: f64) -> Self {
        Self {
            last_time: 0.0,
            timer: 0.0,
            interval,
        }
    }

    /// Feeds one host timestamp (ms). Returns `true` if a redraw is due.
    pub fn tick(&mut self, timestamp: f64) -> bool {
        let delta = timestamp - self.last_time;
        self.last_time = timestamp;
        if self.timer > self.interval {
            self.timer = 0.0;
            true
        } else {
            self.timer += delta;
            false
        }
    }

    /// Time accumulated since the last redraw.
    pub fn timer(&self) -> f64 {
        self.timer
    }

    pub fn last_time(&self) -> f64 {
        self.last_time
    }
}
