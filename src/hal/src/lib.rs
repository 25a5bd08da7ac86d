//! Hardware abstraction traits for the PS/2 keyboard stack.
//!
//! These traits describe the collaborators the keyboard core needs from the
//! board: GPIO sampling, edge interrupts, interrupt masking, a character
//! display and a millisecond tick source.

#![no_std]

pub use ps2_common::{Edge, Level, Line};

/// Trait for sampling the logic level of an input line.
pub trait DigitalInput {
    /// Reads the current level of `line`. Must not block.
    fn read_line_level(&mut self, line: Line) -> Level;
}

/// Trait for edge-triggered interrupts on a single GPIO line.
pub trait EdgeInterrupt {
    /// Configures `line` as an input that interrupts on `edge`.
    fn configure_edge_interrupt(&mut self, line: Line, edge: Edge);
    /// Unmasks the interrupt for `line`.
    fn enable_interrupt(&mut self, line: Line);
    /// Returns true if an edge event is pending on `line`.
    fn is_interrupt_pending(&mut self, line: Line) -> bool;
    /// Clears the pending edge event on `line`.
    fn acknowledge_interrupt(&mut self, line: Line);
}

/// Trait for controlling interrupts.
pub trait InterruptController {
    /// Globally enables interrupts.
    fn enable(&mut self);
    /// Globally disables interrupts.
    fn disable(&mut self);
    /// Returns true if interrupts are currently enabled.
    fn are_enabled(&self) -> bool;

    /// Runs `f` with interrupts masked, restoring the previous state afterwards.
    fn without_interrupts<R, F>(&mut self, f: F) -> R
    where
        Self: Sized,
        F: FnOnce() -> R,
    {
        let was_enabled = self.are_enabled();
        if was_enabled {
            self.disable();
        }
        let ret = f();
        if was_enabled {
            self.enable();
        }
        ret
    }
}

/// Control codes understood by a character display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayCommand {
    /// Clears the whole display.
    Clear,
    /// Moves the cursor to the start of the first row.
    FirstRow,
    /// Moves the cursor to the start of the second row.
    SecondRow,
    /// Turns the backlight on.
    BacklightOn,
    /// Turns the backlight off.
    BacklightOff,
}

/// Trait for a character display such as a 16x2 LCD.
pub trait CharacterDisplay {
    /// Writes one character at the cursor.
    fn write_char(&mut self, c: char);
    /// Sends a control command.
    fn write_command(&mut self, command: DisplayCommand);

    /// Writes a string, one character at a time.
    fn write_str(&mut self, s: &str) {
        for c in s.chars() {
            self.write_char(c);
        }
    }
}

/// Trait for a system timer.
pub trait Timer {
    /// Returns the number of milliseconds since the system started.
    fn current_ticks(&self) -> u64;
}
