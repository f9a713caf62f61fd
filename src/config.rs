//! Controller configuration parameters
//!
//! All tunable parameters for the belt controller.  The values are
//! compiled-in defaults; there is no file, environment or CLI override.

use serde::{Deserialize, Serialize};

use crate::control::accumulator::STEP_EPSILON;
use crate::error::{Error, Result};

/// Core controller configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerConfig {
    // --- Timing ---
    /// Host step length (milliseconds of simulated time per tick)
    pub time_step_ms: u32,
    /// Keyboard sampling period (milliseconds)
    pub keyboard_sample_period_ms: u32,
    /// Ticks to ignore input after an accepted key
    pub debounce_ticks: u32,

    // --- Belt ---
    /// Speed change per Page Up / Page Down press (m/s)
    pub speed_increment: f64,
    /// Absolute speed limit in either direction (m/s)
    pub max_speed: f64,
    /// Device name of the belt motor on the host
    pub motor_device: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            // Timing
            time_step_ms: 32,
            keyboard_sample_period_ms: 32,
            debounce_ticks: 10, // ~320 ms at the default step

            // Belt
            speed_increment: 0.1,
            max_speed: 0.6,
            motor_device: String::from("belt_motor"),
        }
    }
}

impl ControllerConfig {
    /// Reject values the controller cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.time_step_ms == 0 {
            return Err(Error::Config("time_step_ms must be positive"));
        }
        if self.keyboard_sample_period_ms == 0 {
            return Err(Error::Config("keyboard_sample_period_ms must be positive"));
        }
        if !(self.speed_increment.is_finite() && self.speed_increment > 0.0) {
            return Err(Error::Config("speed_increment must be a positive number"));
        }
        if !(self.max_speed.is_finite() && self.max_speed > 0.0) {
            return Err(Error::Config("max_speed must be a positive number"));
        }
        if self.speed_increment > self.max_speed {
            return Err(Error::Config("speed_increment exceeds max_speed"));
        }
        let ratio = self.max_speed / self.speed_increment;
        if (ratio - ratio.round()).abs() > STEP_EPSILON {
            return Err(Error::Config("max_speed must be a whole multiple of speed_increment"));
        }
        if self.motor_device.is_empty() {
            return Err(Error::Config("motor_device must be named"));
        }
        Ok(())
    }
}
