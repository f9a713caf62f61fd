//! Key classification.
//!
//! Each polled key code is mapped to exactly one [`KeyCommand`].  The
//! mapping is a pure function so it can be tested apart from the state
//! it later drives.

use crate::keys::KeyCode;

/// What a polled key asks the belt to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Page Up: one increment forward.
    Increase,
    /// Page Down: one increment backward.
    Decrease,
    /// `S`: halt the belt.
    Stop,
    /// Any other code, or no key at all.
    None,
}

impl KeyCommand {
    /// Classify a polled code.  Matching is exact, so a key held with a
    /// modifier does not count.
    pub fn classify(key: Option<KeyCode>) -> Self {
        match key {
            Some(KeyCode::PAGE_UP) => Self::Increase,
            Some(KeyCode::PAGE_DOWN) => Self::Decrease,
            Some(KeyCode::STOP) => Self::Stop,
            _ => Self::None,
        }
    }

    /// Direction of the speed change; `None` for the ignore branch.
    pub fn sign(self) -> Option<i32> {
        match self {
            Self::Increase => Some(1),
            Self::Decrease => Some(-1),
            Self::Stop => Some(0),
            Self::None => None,
        }
    }
}
