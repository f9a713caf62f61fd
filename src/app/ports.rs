//! Port traits: the hexagonal boundary between the controller and the host.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ BeltSpeedController (domain)
//! ```
//!
//! Driven adapters (host clock, keyboard, motor, event sinks) implement
//! these traits.  The [`BeltSpeedController`](super::service::BeltSpeedController)
//! consumes them via generics, so the domain core never touches a
//! terminal, simulator or motor directly.
//!
//! None of the ports return errors: the controller has no recovery path,
//! so adapters log and absorb their own failures.

use crate::keys::KeyCode;

use super::events::AppEvent;

// ───────────────────────────────────────────────────────────────
// Host port (simulation clock and lifecycle)
// ───────────────────────────────────────────────────────────────

/// Result of advancing the host by one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The step ran; the controller should tick.
    Continue,
    /// The host is terminating; no further commands may be issued.
    Stop,
}

/// The simulation host that drives the fixed-step loop.
pub trait HostPort {
    /// Advance by `time_step_ms`.  Blocks until the step has elapsed.
    fn step(&mut self, time_step_ms: u32) -> StepOutcome;

    /// Release the connection to the host.  Must tolerate repeat calls.
    fn cleanup(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Keyboard port (driven adapter: keyboard → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the controller polls key codes through this.
pub trait KeyboardPort {
    /// Start sampling the keyboard every `sample_period_ms`.
    fn enable(&mut self, sample_period_ms: u32);

    /// Stop sampling and release the keyboard.
    fn disable(&mut self);

    /// Next pressed key, or `None` when nothing is pressed.
    fn poll(&mut self) -> Option<KeyCode>;
}

// ───────────────────────────────────────────────────────────────
// Motor port (driven adapter: domain → actuator)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the controller commands the belt motor through this.
pub trait MotorPort {
    /// Position target in metres.  `f64::INFINITY` selects velocity control.
    fn set_position(&mut self, position: f64);

    /// Velocity command in m/s.
    fn set_velocity(&mut self, velocity: f64);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → stdout / logging)
// ───────────────────────────────────────────────────────────────

/// The controller emits structured [`AppEvent`]s through this port.
/// Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}
