//! Tick-based input hold-off.
//!
//! After an accepted key the controller ignores the keyboard for a fixed
//! number of ticks so a long press does not register as a burst of
//! presses.  The counter only counts down while armed; it never goes
//! below zero.

/// Countdown gating keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceCounter {
    remaining: u32,
    reload: u32,
}

impl DebounceCounter {
    /// Counter that starts ready and re-arms to `reload` ticks.
    pub const fn new(reload: u32) -> Self {
        Self {
            remaining: 0,
            reload,
        }
    }

    /// Advance one tick.
    ///
    /// Returns `true` when input may be read this tick.  While armed the
    /// counter is decremented instead and `false` is returned.
    pub fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return true;
        }
        self.remaining -= 1;
        false
    }

    /// Start a fresh hold-off period.
    pub fn arm(&mut self) {
        self.remaining = self.reload;
    }

    /// Ticks left before input is read again.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}
