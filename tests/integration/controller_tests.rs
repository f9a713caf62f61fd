//! BeltSpeedController → motor / sink behaviour per tick.

use beltctl::app::commands::KeyCommand;
use beltctl::app::events::AppEvent;
use beltctl::app::service::{BeltSpeedController, TickOutcome};
use beltctl::config::ControllerConfig;
use beltctl::keys::{self, KeyCode};

use crate::mock_hw::{MockHardware, MockHost, MotorCall, RecordingSink};

fn controller() -> BeltSpeedController {
    BeltSpeedController::new(ControllerConfig::default()).unwrap()
}

/// Tick once with `key` pressed, then wait out the debounce period.
fn press(
    ctl: &mut BeltSpeedController,
    hw: &mut MockHardware,
    sink: &mut RecordingSink,
    key: KeyCode,
) -> TickOutcome {
    hw.queue(Some(key));
    let outcome = ctl.tick(hw, sink);
    for _ in 0..10 {
        ctl.tick(hw, sink);
    }
    outcome
}

// ── Start-up ──────────────────────────────────────────────────

#[test]
fn start_selects_velocity_mode_at_rest() {
    let mut ctl = controller();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    ctl.start(&mut hw, &mut sink);

    assert_eq!(
        hw.calls,
        vec![MotorCall::SetPosition(f64::INFINITY), MotorCall::SetVelocity(0.0)]
    );
    assert_eq!(hw.enabled_period, Some(32));
    assert_eq!(sink.events, vec![AppEvent::Started { time_step_ms: 32 }]);
    assert!(ctl.is_running());
    assert_eq!(ctl.target_speed(), 0.0);
}

// ── Clamping ──────────────────────────────────────────────────

#[test]
fn six_increases_reach_limit_and_seventh_holds() {
    let mut ctl = controller();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    for _ in 0..6 {
        press(&mut ctl, &mut hw, &mut sink, KeyCode::PAGE_UP);
    }
    assert_eq!(ctl.target_speed(), 0.6);

    let outcome = press(&mut ctl, &mut hw, &mut sink, KeyCode::PAGE_UP);
    assert_eq!(
        outcome,
        TickOutcome::Accepted {
            command: KeyCommand::Increase,
            speed: 0.6
        }
    );
    assert_eq!(hw.last_velocity(), Some(0.6));
}

#[test]
fn decreases_saturate_at_negative_limit() {
    let mut ctl = controller();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    for _ in 0..9 {
        press(&mut ctl, &mut hw, &mut sink, KeyCode::PAGE_DOWN);
    }
    assert_eq!(ctl.target_speed(), -0.6);
    assert_eq!(sink.speeds().last(), Some(&-0.6));
}

#[test]
fn decrease_from_limit_steps_one_increment_down() {
    let config = ControllerConfig {
        speed_increment: 0.05,
        max_speed: 0.25,
        ..ControllerConfig::default()
    };
    let mut ctl = BeltSpeedController::new(config).unwrap();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    for _ in 0..7 {
        press(&mut ctl, &mut hw, &mut sink, KeyCode::PAGE_UP);
    }
    assert_eq!(ctl.target_speed(), 0.25);

    press(&mut ctl, &mut hw, &mut sink, KeyCode::PAGE_DOWN);
    assert!((ctl.target_speed() - 0.2).abs() < 1e-12);
}

#[test]
fn off_grid_limit_is_rejected() {
    let config = ControllerConfig {
        max_speed: 0.65,
        ..ControllerConfig::default()
    };
    assert!(BeltSpeedController::new(config).is_err());
}

#[test]
fn increase_then_decrease_round_trips_exactly() {
    let mut ctl = controller();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    for _ in 0..2 {
        press(&mut ctl, &mut hw, &mut sink, KeyCode::PAGE_UP);
    }
    let before = ctl.target_speed();
    press(&mut ctl, &mut hw, &mut sink, KeyCode::PAGE_UP);
    press(&mut ctl, &mut hw, &mut sink, KeyCode::PAGE_DOWN);
    assert_eq!(ctl.target_speed(), before);
}

// ── Stop ──────────────────────────────────────────────────────

#[test]
fn stop_forces_zero_from_reverse() {
    let mut ctl = controller();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    for _ in 0..3 {
        press(&mut ctl, &mut hw, &mut sink, KeyCode::PAGE_DOWN);
    }
    let outcome = press(&mut ctl, &mut hw, &mut sink, KeyCode::STOP);

    assert_eq!(
        outcome,
        TickOutcome::Accepted {
            command: KeyCommand::Stop,
            speed: 0.0
        }
    );
    assert_eq!(ctl.target_speed(), 0.0);
    assert_eq!(hw.last_velocity(), Some(0.0));
}

#[test]
fn stop_at_standstill_still_logs_rearms_and_commands() {
    let mut ctl = controller();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    hw.queue(Some(KeyCode::STOP));
    ctl.tick(&mut hw, &mut sink);

    assert_eq!(ctl.debounce_remaining(), 10);
    assert_eq!(sink.speeds(), vec![0.0]);
    assert_eq!(hw.calls, vec![MotorCall::SetVelocity(0.0)]);
}

// ── Debounce ──────────────────────────────────────────────────

#[test]
fn ten_ticks_after_accept_ignore_every_key() {
    let mut ctl = controller();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    hw.queue(Some(KeyCode::PAGE_UP));
    ctl.tick(&mut hw, &mut sink);
    let polls = hw.polls;
    hw.held = Some(KeyCode::PAGE_DOWN);

    for expected in (0..10).rev() {
        assert_eq!(
            ctl.tick(&mut hw, &mut sink),
            TickOutcome::Debouncing {
                remaining: expected
            }
        );
    }
    assert_eq!(hw.polls, polls, "keyboard is not read while debouncing");
    assert_eq!(sink.speeds().len(), 1);

    let outcome = ctl.tick(&mut hw, &mut sink);
    assert!(matches!(
        outcome,
        TickOutcome::Accepted {
            command: KeyCommand::Decrease,
            ..
        }
    ));
    assert_eq!(ctl.target_speed(), 0.0);
}

// ── Ignored keys ──────────────────────────────────────────────

#[test]
fn unknown_keys_change_nothing() {
    let mut ctl = controller();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    let ignored = [
        None,
        KeyCode::from_char('a'),
        Some(KeyCode::new(keys::UP)),
        Some(KeyCode::PAGE_UP.with_modifiers(keys::SHIFT)),
        Some(KeyCode::STOP.with_modifiers(keys::CONTROL)),
        Some(KeyCode::new(-1)),
    ];
    for key in ignored {
        hw.queue(key);
        assert_eq!(ctl.tick(&mut hw, &mut sink), TickOutcome::Idle);
        assert_eq!(ctl.debounce_remaining(), 0);
    }

    assert_eq!(hw.polls, ignored.len(), "polled once per ready tick");
    assert!(sink.events.is_empty());
    assert!(hw.calls.is_empty());
    assert_eq!(ctl.accepted_count(), 0);
}

#[test]
fn unknown_key_does_not_reset_running_debounce() {
    let mut ctl = controller();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    hw.queue(Some(KeyCode::PAGE_UP));
    ctl.tick(&mut hw, &mut sink);
    for _ in 0..10 {
        ctl.tick(&mut hw, &mut sink);
    }
    hw.queue(KeyCode::from_char('x'));
    ctl.tick(&mut hw, &mut sink);
    hw.queue(Some(KeyCode::PAGE_UP));
    assert!(matches!(ctl.tick(&mut hw, &mut sink), TickOutcome::Accepted { .. }));
}

// ── Lifecycle ─────────────────────────────────────────────────

#[test]
fn run_ticks_until_host_stops_then_releases() {
    let mut ctl = controller();
    let mut hw = MockHardware::new();
    hw.held = Some(KeyCode::PAGE_UP);
    let mut host = MockHost::new(25);
    let mut sink = RecordingSink::new();

    let ticks = ctl.run(&mut host, &mut hw, &mut sink);

    assert_eq!(ticks, 25);
    assert!(host.step_sizes.iter().all(|&s| s == 32));
    assert_eq!(host.step_sizes.len(), 26, "25 steps plus the terminating one");
    assert_eq!(host.cleanups, 1);
    assert!(hw.disabled);
    assert!(!ctl.is_running());

    // Accepted on ticks 1, 12 and 23.
    assert_eq!(sink.speeds().len(), 3);
    assert_eq!(hw.velocity_commands(), 1 + 3);
    assert_eq!(sink.events.last(), Some(&AppEvent::Stopped { ticks: 25 }));
}

#[test]
fn host_stopping_immediately_issues_only_startup_commands() {
    let mut ctl = controller();
    let mut hw = MockHardware::new();
    hw.held = Some(KeyCode::PAGE_UP);
    let mut host = MockHost::new(0);
    let mut sink = RecordingSink::new();

    assert_eq!(ctl.run(&mut host, &mut hw, &mut sink), 0);
    assert_eq!(
        hw.calls,
        vec![MotorCall::SetPosition(f64::INFINITY), MotorCall::SetVelocity(0.0)]
    );
    assert_eq!(hw.polls, 0);
    assert_eq!(host.cleanups, 1);
}

#[test]
fn custom_debounce_period_is_honoured() {
    let config = ControllerConfig {
        debounce_ticks: 3,
        ..ControllerConfig::default()
    };
    let mut ctl = BeltSpeedController::new(config).unwrap();
    let mut hw = MockHardware::new();
    hw.held = Some(KeyCode::PAGE_UP);
    let mut sink = RecordingSink::new();

    let accepted = (0..8)
        .filter(|_| matches!(ctl.tick(&mut hw, &mut sink), TickOutcome::Accepted { .. }))
        .count();
    assert_eq!(accepted, 2, "ticks 1 and 5");
}
