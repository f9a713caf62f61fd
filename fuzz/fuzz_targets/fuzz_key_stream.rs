//! Fuzz target: `BeltSpeedController::tick`
//!
//! Interprets the input as a stream of little-endian `i32` key codes (one
//! offered per tick) and asserts the controller never panics, never leaves
//! the speed range and never lets the debounce counter exceed its reload.
//!
//! cargo fuzz run fuzz_key_stream

#![no_main]

use beltctl::app::events::AppEvent;
use beltctl::app::ports::{EventSink, KeyboardPort, MotorPort};
use beltctl::app::service::BeltSpeedController;
use beltctl::config::ControllerConfig;
use beltctl::keys::KeyCode;
use libfuzzer_sys::fuzz_target;

struct Keys {
    next: Option<KeyCode>,
    last_velocity: f64,
}

impl KeyboardPort for Keys {
    fn enable(&mut self, _sample_period_ms: u32) {}
    fn disable(&mut self) {}
    fn poll(&mut self) -> Option<KeyCode> {
        self.next.take()
    }
}

impl MotorPort for Keys {
    fn set_position(&mut self, _position: f64) {}
    fn set_velocity(&mut self, velocity: f64) {
        self.last_velocity = velocity;
    }
}

struct Discard;

impl EventSink for Discard {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let config = ControllerConfig::default();
    let limit = config.max_speed;
    let reload = config.debounce_ticks;
    let Ok(mut ctl) = BeltSpeedController::new(config) else {
        return;
    };
    let mut hw = Keys {
        next: None,
        last_velocity: 0.0,
    };

    for chunk in data.chunks_exact(4) {
        let raw = i32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        hw.next = Some(KeyCode::new(raw));
        ctl.tick(&mut hw, &mut Discard);

        assert!(ctl.target_speed().abs() <= limit, "speed left the belt range");
        assert!(hw.last_velocity.abs() <= limit, "motor commanded out of range");
        assert!(ctl.debounce_remaining() <= reload, "debounce exceeded reload");
    }
});
