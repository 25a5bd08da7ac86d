//! Error types for the PS/2 receive path.
//!
//! None of these reach the application: a failed frame or a full queue only
//! means a byte is lost. They exist for diagnostics and logging.

use core::fmt;

/// Reasons a received frame is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FrameError {
    /// Data bits plus parity bit did not contain an odd number of ones
    Parity,
    /// Stop bit sampled low
    MissingStop,
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::Parity => write!(f, "odd parity check failed"),
            FrameError::MissingStop => write!(f, "stop bit missing"),
        }
    }
}

/// A push was rejected because the queue was full. Carries the lost byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueueFull(pub u8);

impl fmt::Display for QueueFull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scan code queue full, dropped {:#04x}", self.0)
    }
}
