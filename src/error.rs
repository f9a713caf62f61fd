//! Unified error types for the belt controller.
//!
//! The control algorithm itself cannot fail; errors only appear at the
//! edges (adapter bring-up and configuration validation).  Every edge
//! funnels into the single [`Error`] enum so `main` handles them uniformly.

use core::fmt;

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A device or adapter could not be brought up.
    Init(&'static str),
    /// Configuration failed range validation.
    Config(&'static str),
    /// An OS-level I/O call failed (terminal mode, thread spawn, stdout).
    Io(std::io::ErrorKind),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Io(kind) => write!(f, "io: {kind}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.kind())
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
