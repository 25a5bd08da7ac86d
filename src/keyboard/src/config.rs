//! Board wiring and timing defaults.
//!
//! The defaults match the reference board: clock on P3.3, data on P3.2,
//! a 16x2 LCD and a 50 ms polling cadence.

use ps2_common::{Edge, Line};

/// Default scan code queue capacity.
pub const SCAN_CODE_QUEUE_CAPACITY: usize = 20;

/// Which lines the keyboard is wired to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardConfig {
    /// Clock line; its edge interrupt drives the frame receiver.
    pub clock: Line,
    /// Data line, sampled once per clock edge.
    pub data: Line,
    /// Clock edge on which the data line is valid.
    pub clock_edge: Edge,
}

impl KeyboardConfig {
    /// Reference board wiring.
    pub const DEFAULT: KeyboardConfig = KeyboardConfig {
        clock: Line::new(3, 3),
        data: Line::new(3, 2),
        clock_edge: Edge::Falling,
    };
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Settings for [`crate::echo::KeyEcho`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EchoConfig {
    /// Minimum time between keyboard polls.
    pub poll_interval_ms: u64,
    /// Characters per display row before the display is cleared.
    pub columns: usize,
    /// Idle time after which the backlight is switched off.
    pub backlight_timeout_ms: u64,
    /// Text shown by [`crate::echo::KeyEcho::start`].
    pub banner: &'static str,
}

impl EchoConfig {
    /// 16x2 LCD defaults.
    pub const DEFAULT: EchoConfig = EchoConfig {
        poll_interval_ms: 50,
        columns: 16,
        backlight_timeout_ms: 10_000,
        banner: "PS2 Board Example",
    };
}

impl Default for EchoConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
