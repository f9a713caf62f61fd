//! Belt speed controller, the hexagonal core.
//!
//! [`BeltSpeedController`] owns the target speed and the debounce
//! countdown.  All I/O flows through port traits injected at call sites,
//! making the controller testable with mock adapters.
//!
//! ```text
//!  KeyboardPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                   │  BeltSpeedController   │
//!     MotorPort ◀── │ debounce · accumulator │
//!                   └────────────────────────┘
//!                             ▲
//!                         HostPort (step)
//! ```

use log::{debug, info, trace};

use crate::config::ControllerConfig;
use crate::control::accumulator::SpeedAccumulator;
use crate::control::debounce::DebounceCounter;
use crate::error::Result;

use super::commands::KeyCommand;
use super::events::{AppEvent, BeltStatus};
use super::ports::{EventSink, HostPort, KeyboardPort, MotorPort, StepOutcome};

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Input was held off; `remaining` ticks are left afterwards.
    Debouncing { remaining: u32 },
    /// The keyboard was polled but nothing actionable was pressed.
    Idle,
    /// A key was accepted and `speed` commanded to the motor.
    Accepted { command: KeyCommand, speed: f64 },
}

// ───────────────────────────────────────────────────────────────
// BeltSpeedController
// ───────────────────────────────────────────────────────────────

/// Maps keyboard presses to a belt velocity, one host step at a time.
pub struct BeltSpeedController {
    config: ControllerConfig,
    speed: SpeedAccumulator,
    debounce: DebounceCounter,
    tick_count: u64,
    accepted_count: u64,
    running: bool,
}

impl BeltSpeedController {
    /// Construct the controller from a validated configuration.
    ///
    /// Does **not** touch any device; call [`start`](Self::start) or
    /// [`run`](Self::run) next.
    pub fn new(config: ControllerConfig) -> Result<Self> {
        config.validate()?;
        let speed = SpeedAccumulator::new(config.speed_increment, config.max_speed);
        let debounce = DebounceCounter::new(config.debounce_ticks);
        Ok(Self {
            config,
            speed,
            debounce,
            tick_count: 0,
            accepted_count: 0,
            running: false,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Put the motor in velocity mode at rest and start the keyboard.
    pub fn start(&mut self, hw: &mut (impl KeyboardPort + MotorPort), sink: &mut impl EventSink) {
        hw.set_position(f64::INFINITY);
        hw.set_velocity(self.speed.speed());
        hw.enable(self.config.keyboard_sample_period_ms);
        self.running = true;

        sink.emit(&AppEvent::Started {
            time_step_ms: self.config.time_step_ms,
        });
        info!(
            "Belt controller started on '{}' (step={}ms, debounce={} ticks)",
            self.config.motor_device, self.config.time_step_ms, self.config.debounce_ticks
        );
    }

    /// Release the keyboard and the host.  No motor command is issued.
    pub fn shutdown(
        &mut self,
        host: &mut impl HostPort,
        hw: &mut impl KeyboardPort,
        sink: &mut impl EventSink,
    ) {
        hw.disable();
        host.cleanup();
        self.running = false;

        sink.emit(&AppEvent::Stopped {
            ticks: self.tick_count,
        });
        match serde_json::to_string(&self.status()) {
            Ok(json) => info!("Belt controller stopped: {}", json),
            Err(e) => info!("Belt controller stopped after {} ticks ({})", self.tick_count, e),
        }
    }

    /// Drive the full lifecycle: start, tick once per host step until the
    /// host signals termination, then shut down.  Returns the tick count.
    pub fn run(
        &mut self,
        host: &mut impl HostPort,
        hw: &mut (impl KeyboardPort + MotorPort),
        sink: &mut impl EventSink,
    ) -> u64 {
        self.start(hw, sink);

        while host.step(self.config.time_step_ms) == StepOutcome::Continue {
            self.tick(hw, sink);
        }

        self.shutdown(host, hw, sink);
        self.tick_count
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one control cycle: debounce gate → poll → classify → command.
    pub fn tick(
        &mut self,
        hw: &mut (impl KeyboardPort + MotorPort),
        sink: &mut impl EventSink,
    ) -> TickOutcome {
        self.tick_count += 1;

        if !self.debounce.tick() {
            return TickOutcome::Debouncing {
                remaining: self.debounce.remaining(),
            };
        }

        let key = hw.poll();
        let command = KeyCommand::classify(key);
        let Some(sign) = command.sign() else {
            if let Some(key) = key {
                trace!("Ignoring key {}", key);
            }
            return TickOutcome::Idle;
        };
        let speed = if command == KeyCommand::Stop {
            self.speed.stop()
        } else {
            self.speed.step(sign)
        };

        // Stop at standstill still re-arms, logs and re-commands.
        sink.emit(&AppEvent::SpeedChanged { command, speed });
        self.debounce.arm();
        self.accepted_count += 1;
        hw.set_velocity(speed);

        debug!("{:?} -> target {:.1} m/s (tick {})", command, speed, self.tick_count);
        TickOutcome::Accepted { command, speed }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current target belt speed (m/s).
    pub fn target_speed(&self) -> f64 {
        self.speed.speed()
    }

    /// Ticks left before the keyboard is read again.
    pub fn debounce_remaining(&self) -> u32 {
        self.debounce.remaining()
    }

    /// Total ticks executed since construction.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Keys accepted since construction.
    pub fn accepted_count(&self) -> u64 {
        self.accepted_count
    }

    /// Whether [`start`](Self::start) ran without a matching shutdown.
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Snapshot for diagnostics.
    pub fn status(&self) -> BeltStatus {
        BeltStatus {
            target_speed: self.target_speed(),
            debounce_remaining: self.debounce_remaining(),
            ticks: self.tick_count,
            accepted: self.accepted_count,
        }
    }
}
