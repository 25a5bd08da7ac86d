//! Scan code set 2 translation tables (US layout).
//!
//! Reference: <http://www.computer-engineering.org/ps2keyboard/scancodes2.html>
//!
//! Entries hold ASCII; [`NO_MAPPING`] marks keys that produce no character
//! (function keys, ctrl, the modifier keys themselves).

/// Prefix byte announcing that the next code is a key release.
pub const BREAK_PREFIX: u8 = 0xF0;
/// Left shift make code.
pub const LEFT_SHIFT: u8 = 0x12;
/// Right shift make code.
pub const RIGHT_SHIFT: u8 = 0x59;
/// Caps lock make code.
pub const CAPS_LOCK: u8 = 0x58;

/// Placeholder for "no character".
pub const NO_MAPPING: u8 = 0;

const TAB: u8 = 0x09;
const BKSP: u8 = 0x08;
const ENTER: u8 = 0x0D;
const ESC: u8 = 0x1B;
const __: u8 = NO_MAPPING;

/// Returns true for either shift key.
pub const fn is_shift(code: u8) -> bool {
    code == LEFT_SHIFT || code == RIGHT_SHIFT
}

/// Which of the two tables to consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// Plain layout.
    Unshifted,
    /// Layout with shift applied.
    Shifted,
}

impl Layer {
    /// The table backing this layer.
    pub fn table(self) -> &'static [u8; 128] {
        match self {
            Layer::Unshifted => &UNSHIFTED,
            Layer::Shifted => &SHIFTED,
        }
    }

    /// Looks up `code`. Codes outside the table and unmapped entries give `None`.
    pub fn lookup(self, code: u8) -> Option<char> {
        match self.table().get(usize::from(code)) {
            Some(&NO_MAPPING) | None => None,
            Some(&ascii) => Some(char::from(ascii)),
        }
    }
}

#[rustfmt::skip]
static UNSHIFTED: [u8; 128] = [
    __,   __,   __,   __,   __,   __,   __,   __,   // 0x00
    __,   __,   __,   __,   __,   TAB,  b'`', __,   // 0x08
    __,   __,   __,   __,   __,   b'q', b'1', __,   // 0x10
    __,   __,   b'z', b's', b'a', b'w', b'2', __,   // 0x18
    __,   b'c', b'x', b'd', b'e', b'4', b'3', __,   // 0x20
    __,   b' ', b'v', b'f', b't', b'r', b'5', __,   // 0x28
    __,   b'n', b'b', b'h', b'g', b'y', b'6', __,   // 0x30
    __,   __,   b'm', b'j', b'u', b'7', b'8', __,   // 0x38
    __,   b',', b'k', b'i', b'o', b'0', b'9', __,   // 0x40
    __,   b'.', b'/', b'l', b';', b'p', b'-', __,   // 0x48
    __,   __,   b'\'', __,  b'[', b'=', __,   __,   // 0x50
    __,   __,   ENTER, b']', __,  b'\\', __,  __,   // 0x58
    __,   __,   __,   __,   __,   __,   BKSP, __,   // 0x60
    __,   b'1', __,   b'4', b'7', __,   __,   __,   // 0x68
    __,   b'.', b'2', b'5', b'6', b'8', ESC,  __,   // 0x70
    __,   b'+', b'3', b'-', b'*', b'9', __,   __,   // 0x78
];

#[rustfmt::skip]
static SHIFTED: [u8; 128] = [
    __,   __,   __,   __,   __,   __,   __,   __,   // 0x00
    __,   __,   __,   __,   __,   TAB,  b'~', __,   // 0x08
    __,   __,   __,   __,   __,   b'Q', b'!', __,   // 0x10
    __,   __,   b'Z', b'S', b'A', b'W', b'@', __,   // 0x18
    __,   b'C', b'X', b'D', b'E', b'$', b'#', __,   // 0x20
    __,   b' ', b'V', b'F', b'T', b'R', b'%', __,   // 0x28
    __,   b'N', b'B', b'H', b'G', b'Y', b'^', __,   // 0x30
    __,   __,   b'M', b'J', b'U', b'&', b'*', __,   // 0x38
    __,   b'<', b'K', b'I', b'O', b')', b'(', __,   // 0x40
    __,   b'>', b'?', b'L', b':', b'P', b'_', __,   // 0x48
    __,   __,   b'"', __,   b'{', b'+', __,   __,   // 0x50
    __,   __,   ENTER, b'}', __,  b'|', __,   __,   // 0x58
    __,   __,   __,   __,   __,   __,   BKSP, __,   // 0x60
    __,   b'1', __,   b'4', b'7', __,   __,   __,   // 0x68
    __,   b'.', b'2', b'5', b'6', b'8', ESC,  __,   // 0x70
    __,   b'+', b'3', b'-', b'*', b'9', __,   __,   // 0x78
];
