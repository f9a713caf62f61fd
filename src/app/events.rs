//! Outbound application events.
//!
//! The [`BeltSpeedController`](super::service::BeltSpeedController) emits
//! these through the [`EventSink`](super::ports::EventSink) port.  Adapters
//! on the other side decide what to do with them.

use serde::Serialize;

use super::commands::KeyCommand;

/// Structured events emitted by the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppEvent {
    /// The controller configured its devices and entered the step loop.
    Started { time_step_ms: u32 },

    /// A key was accepted and a new target speed commanded.
    SpeedChanged { command: KeyCommand, speed: f64 },

    /// The host ended the run.
    Stopped { ticks: u64 },
}

/// Point-in-time controller snapshot for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BeltStatus {
    pub target_speed: f64,
    pub debounce_remaining: u32,
    pub ticks: u64,
    pub accepted: u64,
}
