//! Hardware adapter: bridges the device drivers to domain port traits.
//!
//! Owns a keyboard driver and the [`BeltMotorDriver`], exposing them
//! through [`KeyboardPort`] and [`MotorPort`] so the controller can take
//! both as a single `hw` argument.

use crate::app::ports::{KeyboardPort, MotorPort};
use crate::drivers::belt_motor::BeltMotorDriver;
use crate::keys::KeyCode;

/// Concrete adapter that combines the keyboard and motor behind port traits.
pub struct HardwareAdapter<K> {
    keyboard: K,
    motor: BeltMotorDriver,
}

impl<K: KeyboardPort> HardwareAdapter<K> {
    pub fn new(keyboard: K, motor: BeltMotorDriver) -> Self {
        Self { keyboard, motor }
    }

    pub fn motor(&self) -> &BeltMotorDriver {
        &self.motor
    }

    pub fn keyboard(&self) -> &K {
        &self.keyboard
    }
}

// ── KeyboardPort implementation ───────────────────────────────

impl<K: KeyboardPort> KeyboardPort for HardwareAdapter<K> {
    fn enable(&mut self, sample_period_ms: u32) {
        self.keyboard.enable(sample_period_ms);
    }

    fn disable(&mut self) {
        self.keyboard.disable();
    }

    fn poll(&mut self) -> Option<KeyCode> {
        self.keyboard.poll()
    }
}

// ── MotorPort implementation ──────────────────────────────────

impl<K> MotorPort for HardwareAdapter<K> {
    fn set_position(&mut self, position: f64) {
        self.motor.set_position(position);
    }

    fn set_velocity(&mut self, velocity: f64) {
        self.motor.set_velocity(velocity);
    }
}
