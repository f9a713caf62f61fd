//! Clamped incremental speed accumulator for the belt.
//!
//! The target speed moves in whole increments and saturates at
//! `±max_speed`.  The position on the increment grid is tracked as an
//! integer step count so that any sequence of presses that returns to the
//! same step yields bit-identical speeds; summing floats would drift
//! (`0.2 + 0.1 - 0.1 != 0.2`).
//!
//! The limit is expected to be a whole multiple of the increment (the
//! controller config enforces it).  Otherwise the top step is the largest
//! multiple below the limit, so no press is ever absorbed past it.

/// Tolerance used when sizing the step range from a float ratio.
pub const STEP_EPSILON: f64 = 1e-9;

/// Belt target speed in m/s, always within `[-max_speed, max_speed]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedAccumulator {
    steps: i32,
    max_steps: i32,
    increment: f64,
    max_speed: f64,
}

impl SpeedAccumulator {
    /// `increment` and `max_speed` must be positive and finite.
    pub fn new(increment: f64, max_speed: f64) -> Self {
        let max_steps = ((max_speed / increment) + STEP_EPSILON).floor().max(0.0) as i32;
        Self {
            steps: 0,
            max_steps,
            increment,
            max_speed,
        }
    }

    /// Move one increment in the direction of `sign` and return the new
    /// speed.  A zero sign leaves the speed unchanged.
    pub fn step(&mut self, sign: i32) -> f64 {
        self.steps = (self.steps + sign.signum()).clamp(-self.max_steps, self.max_steps);
        self.speed()
    }

    /// Force the speed to exactly zero.
    pub fn stop(&mut self) -> f64 {
        self.steps = 0;
        self.speed()
    }

    /// Current target speed (m/s).
    pub fn speed(&self) -> f64 {
        (f64::from(self.steps) * self.increment).clamp(-self.max_speed, self.max_speed)
    }

}
