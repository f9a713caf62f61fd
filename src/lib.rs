//! Beltctl library.
//!
//! Keyboard-driven speed control for a conveyor belt on a fixed-step
//! simulation host.  The pure controller lives in [`app`] and [`control`];
//! everything that touches a terminal or the clock sits behind the port
//! traits and is implemented in [`adapters`] and [`drivers`].

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod control;
pub mod keys;

mod error;

pub mod adapters;
pub mod drivers;

pub use error::{Error, Result};
