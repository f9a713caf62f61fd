//! Conveyor belt motor driver.
//!
//! Mirrors the host's rotational motor device: a position target selects
//! position control, an infinite target selects velocity control, and
//! velocity commands are limited to the motor's rated maximum.
//!
//! ## Dual-mode design
//!
//! In position mode the velocity command is the speed limit used to reach
//! the target.  In velocity mode it is the belt speed itself.  The driver
//! only records the commanded state; the host owns the physics.

use log::warn;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotorMode {
    /// Servo to a finite position target (metres of belt travel).
    Position { target: f64 },
    /// Run continuously at the commanded velocity.
    Velocity,
}

pub struct BeltMotorDriver {
    name: String,
    mode: MotorMode,
    velocity: f64,
    max_velocity: f64,
    commands: u64,
}

impl BeltMotorDriver {
    pub fn new(name: impl Into<String>, max_velocity: f64) -> Self {
        Self {
            name: name.into(),
            mode: MotorMode::Position { target: 0.0 },
            velocity: 0.0,
            max_velocity: max_velocity.abs(),
            commands: 0,
        }
    }

    pub fn set_position(&mut self, position: f64) {
        self.mode = if position.is_infinite() {
            MotorMode::Velocity
        } else {
            MotorMode::Position { target: position }
        };
        self.commands += 1;
    }

    pub fn set_velocity(&mut self, velocity: f64) {
        let limited = velocity.clamp(-self.max_velocity, self.max_velocity);
        if limited != velocity {
            warn!(
                "{}: requested velocity {:.3} exceeds max_velocity {:.3}, clamped",
                self.name, velocity, self.max_velocity
            );
        }
        self.velocity = limited;
        self.commands += 1;
    }

    pub fn mode(&self) -> MotorMode {
        self.mode
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Whether the belt is commanded to move in velocity mode.
    pub fn is_running(&self) -> bool {
        self.mode == MotorMode::Velocity && self.velocity != 0.0
    }

    /// Number of position and velocity commands received.
    pub fn command_count(&self) -> u64 {
        self.commands
    }
}
