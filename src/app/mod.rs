//! Application core: the belt speed controller, zero I/O.
//!
//! This module contains the controller's rules: key classification, the
//! debounce gate and the clamped speed accumulator.  All interaction with
//! the simulation host happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without a simulator.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
