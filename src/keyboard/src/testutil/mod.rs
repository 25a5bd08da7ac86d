//! Host-side test doubles for the PS/2 keyboard.
//!
//! These stand in for the board so the receive path can be driven bit by bit
//! from ordinary `#[test]` functions.
//!
//! # Usage
//!
//! ```rust,ignore
//! use core::cell::Cell;
//! use ps2_keyboard::testutil::{clock_in_byte, TestInterrupts, TestLines};
//!
//! let data = Cell::new(Level::High);
//! let pending = Cell::new(false);
//! let masked = Cell::new(0);
//! let kbd: Keyboard<_, _, 20> = Keyboard::new(
//!     TestLines::new(&data, &pending),
//!     TestInterrupts::new(&masked),
//!     KeyboardConfig::DEFAULT,
//! );
//! kbd.initialize();
//! clock_in_byte(&kbd, &data, &pending, 0x1C);
//! assert_eq!(kbd.get_key(), Some('a'));
//! ```

use crate::keyboard::Keyboard;
use core::cell::Cell;
use ps2_common::{Edge, Level, Line};
use ps2_hal::{
    CharacterDisplay, DigitalInput, DisplayCommand, EdgeInterrupt, InterruptController, Timer,
};

/// Line levels for one frame carrying `byte`: start, eight data bits LSB
/// first, odd parity, stop.
pub fn frame_levels(byte: u8) -> [Level; 11] {
    let mut levels = [Level::High; 11];
    levels[0] = Level::Low;
    for bit in 0..8 {
        levels[1 + bit] = Level::from_bit(byte >> bit);
    }
    levels[9] = Level::from(byte.count_ones() % 2 == 0);
    levels[10] = Level::High;
    levels
}

/// Clocks the frame for `byte` into `keyboard`, one interrupt per bit.
pub fn clock_in_byte<P, C, const N: usize>(
    keyboard: &Keyboard<P, C, N>,
    data: &Cell<Level>,
    pending: &Cell<bool>,
    byte: u8,
) where
    P: DigitalInput + EdgeInterrupt,
    C: InterruptController,
{
    for level in frame_levels(byte) {
        data.set(level);
        pending.set(true);
        keyboard.on_clock_edge();
    }
}

/// GPIO double: the data level and the clock's pending flag are set by the
/// test through shared cells.
#[derive(Debug)]
pub struct TestLines<'a> {
    data: &'a Cell<Level>,
    pending: &'a Cell<bool>,
    configured: Option<(Line, Edge)>,
    enabled: bool,
}

impl<'a> TestLines<'a> {
    /// Create lines backed by the given cells.
    pub fn new(data: &'a Cell<Level>, pending: &'a Cell<bool>) -> Self {
        TestLines {
            data,
            pending,
            configured: None,
            enabled: false,
        }
    }

    /// Line and edge passed to the last `configure_edge_interrupt`.
    pub fn configured(&self) -> Option<(Line, Edge)> {
        self.configured
    }

    /// Returns true once `enable_interrupt` was called.
    pub fn enabled(&self) -> bool {
        self.enabled
    }
}

impl DigitalInput for TestLines<'_> {
    fn read_line_level(&mut self, _line: Line) -> Level {
        self.data.get()
    }
}

impl EdgeInterrupt for TestLines<'_> {
    fn configure_edge_interrupt(&mut self, line: Line, edge: Edge) {
        self.configured = Some((line, edge));
    }

    fn enable_interrupt(&mut self, _line: Line) {
        self.enabled = true;
    }

    fn is_interrupt_pending(&mut self, _line: Line) -> bool {
        self.pending.get()
    }

    fn acknowledge_interrupt(&mut self, _line: Line) {
        self.pending.set(false);
    }
}

/// Interrupt controller double that counts masked sections.
#[derive(Debug)]
pub struct TestInterrupts<'a> {
    masked_sections: &'a Cell<u32>,
    enabled: bool,
}

impl<'a> TestInterrupts<'a> {
    /// Create a controller with interrupts enabled.
    pub fn new(masked_sections: &'a Cell<u32>) -> Self {
        TestInterrupts {
            masked_sections,
            enabled: true,
        }
    }
}

impl InterruptController for TestInterrupts<'_> {
    fn enable(&mut self) {
        self.enabled = true;
    }

    fn disable(&mut self) {
        assert!(self.enabled, "interrupts masked twice");
        self.enabled = false;
        self.masked_sections.set(self.masked_sections.get() + 1);
    }

    fn are_enabled(&self) -> bool {
        self.enabled
    }
}

const ROWS: usize = 2;
const COLUMNS: usize = 16;

/// A 16x2 character display that keeps its contents in memory.
#[derive(Debug)]
pub struct RecordingDisplay {
    cells: [char; ROWS * COLUMNS],
    cursor: usize,
    clears: u32,
    backlight: bool,
}

impl Default for RecordingDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingDisplay {
    /// Create a blank display with the backlight off.
    pub fn new() -> Self {
        RecordingDisplay {
            cells: [' '; ROWS * COLUMNS],
            cursor: 0,
            clears: 0,
            backlight: false,
        }
    }

    /// Characters of `row`, space padded.
    pub fn row(&self, row: usize) -> &[char] {
        &self.cells[row * COLUMNS..(row + 1) * COLUMNS]
    }

    /// Number of `Clear` commands received.
    pub fn clears(&self) -> u32 {
        self.clears
    }

    /// Backlight state.
    pub fn backlight(&self) -> bool {
        self.backlight
    }
}

impl CharacterDisplay for RecordingDisplay {
    fn write_char(&mut self, c: char) {
        self.cells[self.cursor] = c;
        self.cursor = (self.cursor + 1) % self.cells.len();
    }

    fn write_command(&mut self, command: DisplayCommand) {
        match command {
            DisplayCommand::Clear => {
                self.cells = [' '; ROWS * COLUMNS];
                self.cursor = 0;
                self.clears += 1;
            }
            DisplayCommand::FirstRow => self.cursor = 0,
            DisplayCommand::SecondRow => self.cursor = COLUMNS,
            DisplayCommand::BacklightOn => self.backlight = true,
            DisplayCommand::BacklightOff => self.backlight = false,
        }
    }
}

/// Millisecond timer the test advances by hand.
#[derive(Debug, Clone, Copy)]
pub struct ManualTimer<'a> {
    now: &'a Cell<u64>,
}

impl<'a> ManualTimer<'a> {
    /// Create a timer reading `now`.
    pub fn new(now: &'a Cell<u64>) -> Self {
        ManualTimer { now }
    }
}

impl Timer for ManualTimer<'_> {
    fn current_ticks(&self) -> u64 {
        self.now.get()
    }
}
