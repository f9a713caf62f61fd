//! Control primitives driven once per host tick.

pub mod accumulator;
pub mod debounce;
