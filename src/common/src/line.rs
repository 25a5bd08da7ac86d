//! GPIO line identifiers and logic levels.

/// Logic level of a digital line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Level {
    /// Logic 0.
    Low,
    /// Logic 1.
    High,
}

impl Level {
    /// Returns 0 for `Low` and 1 for `High`.
    pub const fn as_bit(self) -> u8 {
        match self {
            Level::Low => 0,
            Level::High => 1,
        }
    }

    /// Builds a level from the lowest bit of `bit`.
    pub const fn from_bit(bit: u8) -> Self {
        if bit & 1 == 0 {
            Level::Low
        } else {
            Level::High
        }
    }

    /// Returns true for `High`.
    pub const fn is_high(self) -> bool {
        matches!(self, Level::High)
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// A GPIO line, addressed by port and pin number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    /// Port number.
    pub port: u8,
    /// Pin number within the port.
    pub pin: u8,
}

impl Line {
    /// Create a new line identifier.
    pub const fn new(port: u8, pin: u8) -> Self {
        Line { port, pin }
    }
}

/// Edge polarity for edge-triggered interrupts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Edge {
    /// High to low transition.
    Falling,
    /// Low to high transition.
    Rising,
}
