//! Beltctl: keyboard belt control entry point.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                   │
//! │                                                           │
//! │  FixedStepHost   HardwareAdapter             LineEventSink│
//! │  (HostPort)      (TerminalKeyboard +         (EventSink,  │
//! │                   BeltMotorDriver)            stdout)     │
//! │                                                           │
//! │  ──────────────── Port Trait Boundary ─────────────────   │
//! │                                                           │
//! │  ┌─────────────────────────────────────────────────────┐  │
//! │  │        BeltSpeedController (pure logic)             │  │
//! │  │        debounce · clamped accumulator               │  │
//! │  └─────────────────────────────────────────────────────┘  │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! stdout carries only `vbelt:` lines; diagnostics go to stderr through
//! the logger (`RUST_LOG=debug` for per-key detail).  Piped stdout gets
//! `\n` line endings; a terminal gets `\r\n` since raw mode is on.

use std::io::IsTerminal;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use log::info;

use beltctl::adapters::hardware::HardwareAdapter;
use beltctl::adapters::host::FixedStepHost;
use beltctl::adapters::log_sink::LineEventSink;
use beltctl::app::service::BeltSpeedController;
use beltctl::config::ControllerConfig;
use beltctl::drivers::belt_motor::BeltMotorDriver;
use beltctl::drivers::terminal_keyboard::TerminalKeyboard;

/// Rated speed of the conveyor motor (m/s); the controller stays below it.
const BELT_MOTOR_MAX_VELOCITY: f64 = 1.0;

fn main() -> Result<()> {
    // ── 1. Logging (stderr) ───────────────────────────────────
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    info!("beltctl v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    let config = ControllerConfig::default();
    let mut controller =
        BeltSpeedController::new(config.clone()).context("invalid controller configuration")?;

    // ── 3. Termination signal ─────────────────────────────────
    let running = Arc::new(AtomicBool::new(true));
    {
        let running = Arc::clone(&running);
        ctrlc::set_handler(move || running.store(false, Ordering::Release))
            .context("installing Ctrl-C handler")?;
    }

    // ── 4. Adapters ───────────────────────────────────────────
    let keyboard = TerminalKeyboard::new(Arc::clone(&running));
    let motor = BeltMotorDriver::new(config.motor_device.as_str(), BELT_MOTOR_MAX_VELOCITY);
    let mut hw = HardwareAdapter::new(keyboard, motor);
    let mut host = FixedStepHost::new(running);
    let stdout = std::io::stdout();
    let mut sink = if stdout.is_terminal() {
        LineEventSink::new(stdout).raw_terminal()
    } else {
        LineEventSink::new(stdout)
    };

    // ── 5. Step loop ──────────────────────────────────────────
    let ticks = controller.run(&mut host, &mut hw, &mut sink);

    info!(
        "Exited after {} ticks; belt left at {:.1} m/s",
        ticks,
        hw.motor().velocity()
    );
    Ok(())
}
