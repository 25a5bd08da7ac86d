//! Scan code to character translation with shift and caps lock tracking.
//!
//! Runs only in the polling context. Each call to
//! [`ScanCodeDecoder::decode_next`] consumes one make code, or a break
//! prefix together with the released code, and yields at most one character.

use crate::keymap::{self, Layer, BREAK_PREFIX, CAPS_LOCK};
use crate::queue::ScanCodeSource;
use ps2_common::Modifiers;

/// Decoder state: modifiers plus an unfinished release sequence.
#[derive(Debug, Clone, Default)]
pub struct ScanCodeDecoder {
    modifiers: Modifiers,
    /// A break prefix was consumed but its key code had not arrived yet.
    pending_break: bool,
}

impl ScanCodeDecoder {
    /// Create a decoder with no modifiers active.
    pub const fn new() -> Self {
        ScanCodeDecoder {
            modifiers: Modifiers::empty(),
            pending_break: false,
        }
    }

    /// Current modifier state.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Clears modifiers and any half-read release sequence.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Pulls scan codes from `source` and returns the next character, if the
    /// consumed bytes produce one.
    pub fn decode_next<S: ScanCodeSource + ?Sized>(&mut self, source: &mut S) -> Option<char> {
        let code = source.next_scan_code()?;

        if self.pending_break {
            self.pending_break = false;
            self.release(code);
            return None;
        }

        if code == BREAK_PREFIX {
            match source.next_scan_code() {
                Some(released) => self.release(released),
                None => self.pending_break = true,
            }
            return None;
        }

        self.press(code)
    }

    fn release(&mut self, code: u8) {
        if keymap::is_shift(code) {
            self.modifiers.remove(Modifiers::SHIFT);
        }
    }

    fn press(&mut self, code: u8) -> Option<char> {
        if keymap::is_shift(code) {
            self.modifiers.insert(Modifiers::SHIFT);
            return None;
        }
        if code == CAPS_LOCK {
            self.modifiers.toggle(Modifiers::CAPS_LOCK);
            log::debug!("ps2: caps lock {}", self.modifiers.contains(Modifiers::CAPS_LOCK));
            return None;
        }
        let layer = if self.modifiers.selects_shifted() {
            Layer::Shifted
        } else {
            Layer::Unshifted
        };
        layer.lookup(code)
    }
}
