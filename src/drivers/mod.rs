//! Device drivers behind the hardware adapter.

pub mod belt_motor;
#[cfg(feature = "terminal")]
pub mod terminal_keyboard;
