//! Echoes typed characters to a character display.
//!
//! Call [`KeyEcho::poll`] from the main loop as often as convenient; it
//! rate-limits keyboard polls itself and manages the display backlight.

use crate::config::EchoConfig;
use crate::keyboard::Keyboard;
use ps2_hal::{
    CharacterDisplay, DigitalInput, DisplayCommand, EdgeInterrupt, InterruptController, Timer,
};

/// Main-loop driver that forwards keys to a display.
pub struct KeyEcho<D, T> {
    display: D,
    timer: T,
    config: EchoConfig,
    /// Characters written on the current row.
    column: usize,
    started: bool,
    last_poll: u64,
    last_activity: u64,
}

impl<D, T> KeyEcho<D, T>
where
    D: CharacterDisplay,
    T: Timer,
{
    /// Create an echo loop. Call [`start`](Self::start) before polling.
    pub fn new(display: D, timer: T, config: EchoConfig) -> Self {
        let now = timer.current_ticks();
        KeyEcho {
            display,
            timer,
            config,
            column: 0,
            started: false,
            last_poll: now,
            last_activity: now,
        }
    }

    /// Shows the banner and parks the cursor on the first row.
    pub fn start(&mut self) {
        self.display.write_command(DisplayCommand::BacklightOn);
        self.display.write_str(self.config.banner);
        self.display.write_command(DisplayCommand::FirstRow);
        self.last_activity = self.timer.current_ticks();
    }

    /// Runs one main loop iteration. Returns the character echoed, if any.
    pub fn poll<P, C, const N: usize>(&mut self, keyboard: &Keyboard<P, C, N>) -> Option<char>
    where
        P: DigitalInput + EdgeInterrupt,
        C: InterruptController,
    {
        let mut echoed = None;
        let now = self.timer.current_ticks();

        if now.wrapping_sub(self.last_poll) > self.config.poll_interval_ms {
            self.last_poll = now;
            if !keyboard.is_busy() {
                if let Some(c) = keyboard.get_key() {
                    self.echo(c, now);
                    echoed = Some(c);
                }
            }
        }

        if now.wrapping_sub(self.last_activity) > self.config.backlight_timeout_ms {
            self.last_activity = now;
            self.display.write_command(DisplayCommand::BacklightOff);
        }

        echoed
    }

    /// Borrow the display.
    pub fn display(&self) -> &D {
        &self.display
    }

    fn echo(&mut self, c: char, now: u64) {
        self.column += 1;
        if self.column >= self.config.columns || !self.started {
            self.column = 0;
            self.display.write_command(DisplayCommand::Clear);
            self.display.write_command(DisplayCommand::FirstRow);
        }
        self.started = true;
        self.display.write_char(c);
        self.display.write_command(DisplayCommand::BacklightOn);
        self.last_activity = now;
    }
}
