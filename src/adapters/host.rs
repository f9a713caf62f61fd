//! Fixed-step host adapter.
//!
//! Stands in for the simulator's step call on a plain host.  Each
//! [`step`](HostPort::step) blocks until the next step deadline on the
//! wall clock, so one tick spans `time_step_ms` of real time.  The run
//! ends when the shared run flag is cleared (Ctrl-C, Esc) or an optional
//! step limit is reached.
//!
//! - **realtime**: sleeps to the next deadline; used by the binary.
//! - **unpaced**: returns immediately; used for batch runs and tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use log::info;

use crate::app::ports::{HostPort, StepOutcome};

pub struct FixedStepHost {
    running: Arc<AtomicBool>,
    realtime: bool,
    step_limit: Option<u64>,
    next_deadline: Option<Instant>,
    steps: u64,
    sim_time_ms: u64,
    released: bool,
}

impl FixedStepHost {
    /// Wall-clock paced host.
    pub fn new(running: Arc<AtomicBool>) -> Self {
        Self {
            running,
            realtime: true,
            step_limit: None,
            next_deadline: None,
            steps: 0,
            sim_time_ms: 0,
            released: false,
        }
    }

    /// Host that advances simulated time without sleeping.
    pub fn unpaced(running: Arc<AtomicBool>) -> Self {
        Self {
            realtime: false,
            ..Self::new(running)
        }
    }

    /// Stop after `steps` steps even if the run flag stays set.
    #[must_use]
    pub fn with_step_limit(mut self, steps: u64) -> Self {
        self.step_limit = Some(steps);
        self
    }

    /// Steps completed so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Simulated time elapsed (milliseconds).
    pub fn sim_time_ms(&self) -> u64 {
        self.sim_time_ms
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    fn should_stop(&self) -> bool {
        self.released
            || !self.running.load(Ordering::Acquire)
            || self.step_limit.is_some_and(|limit| self.steps >= limit)
    }

    fn wait_for_deadline(&mut self, period: Duration) {
        let now = Instant::now();
        let deadline = match self.next_deadline {
            // Fell more than a step behind: resync instead of bursting.
            Some(d) if now > d + period => now,
            Some(d) => d,
            None => now + period,
        };
        std::thread::sleep(deadline.saturating_duration_since(now));
        self.next_deadline = Some(deadline + period);
    }
}

impl HostPort for FixedStepHost {
    fn step(&mut self, time_step_ms: u32) -> StepOutcome {
        if self.should_stop() {
            return StepOutcome::Stop;
        }

        if self.realtime {
            self.wait_for_deadline(Duration::from_millis(u64::from(time_step_ms)));
            // The flag may have been cleared while sleeping.
            if !self.running.load(Ordering::Acquire) {
                return StepOutcome::Stop;
            }
        }

        self.steps += 1;
        self.sim_time_ms += u64::from(time_step_ms);
        StepOutcome::Continue
    }

    fn cleanup(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        info!(
            "Host released after {} steps ({:.1}s simulated)",
            self.steps,
            self.sim_time_ms as f64 / 1000.0
        );
    }
}
