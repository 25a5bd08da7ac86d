//! Keyboard modifier state.

use bitflags::bitflags;

bitflags! {
    /// Modifier keys tracked by the scan-code decoder.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Modifiers: u8 {
        /// A shift key is held down.
        const SHIFT     = 1 << 0;
        /// Caps lock is latched on.
        const CAPS_LOCK = 1 << 1;
    }
}

impl Modifiers {
    /// Returns true if the shifted layout applies.
    ///
    /// Caps lock inverts shift for every key, not only letters.
    pub const fn selects_shifted(self) -> bool {
        self.contains(Modifiers::SHIFT) != self.contains(Modifiers::CAPS_LOCK)
    }
}
