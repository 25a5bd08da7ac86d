//! Drives the whole receive path bit by bit, as the clock interrupt would.

use core::cell::Cell;
use ps2_common::{Level, Modifiers};
use ps2_keyboard::testutil::{
    clock_in_byte, frame_levels, ManualTimer, RecordingDisplay, TestInterrupts, TestLines,
};
use ps2_keyboard::{EchoConfig, FrameEvent, KeyEcho, Keyboard, KeyboardConfig};

struct Rig {
    data: Cell<Level>,
    pending: Cell<bool>,
    masked: Cell<u32>,
}

impl Rig {
    fn new() -> Self {
        Rig {
            data: Cell::new(Level::High),
            pending: Cell::new(false),
            masked: Cell::new(0),
        }
    }

    fn keyboard(&self) -> Keyboard<TestLines<'_>, TestInterrupts<'_>> {
        let kbd = Keyboard::new(
            TestLines::new(&self.data, &self.pending),
            TestInterrupts::new(&self.masked),
            KeyboardConfig::DEFAULT,
        );
        kbd.initialize();
        kbd
    }

    fn send(&self, kbd: &Keyboard<TestLines<'_>, TestInterrupts<'_>>, bytes: &[u8]) {
        for &byte in bytes {
            clock_in_byte(kbd, &self.data, &self.pending, byte);
        }
    }
}

fn drain(kbd: &Keyboard<TestLines<'_>, TestInterrupts<'_>>) -> String {
    let mut typed = String::new();
    while !kbd.is_busy() {
        if let Some(c) = kbd.get_key() {
            typed.push(c);
        }
    }
    typed
}

#[test]
fn test_typing_with_shift_and_release() {
    let rig = Rig::new();
    let kbd = rig.keyboard();

    // "Hi!" as a real keyboard sends it: make and break for every key.
    rig.send(
        &kbd,
        &[
            0x12, 0x33, 0xF0, 0x33, 0xF0, 0x12, // shift, h
            0x43, 0xF0, 0x43, // i
            0x59, 0x16, 0xF0, 0x16, 0xF0, 0x59, // right shift, 1
        ],
    );
    assert_eq!(drain(&kbd), "Hi!");
    assert!(kbd.modifiers().is_empty());
}

#[test]
fn test_caps_lock_session() {
    let rig = Rig::new();
    let kbd = rig.keyboard();

    rig.send(&kbd, &[0x58, 0xF0, 0x58, 0x1C, 0xF0, 0x1C, 0x16, 0xF0, 0x16]);
    assert_eq!(drain(&kbd), "A!");
    assert_eq!(kbd.modifiers(), Modifiers::CAPS_LOCK);

    rig.send(&kbd, &[0x12, 0x1C, 0xF0, 0x1C, 0xF0, 0x12]);
    assert_eq!(drain(&kbd), "a");
}

#[test]
fn test_corrupted_frame_is_invisible() {
    let rig = Rig::new();
    let kbd = rig.keyboard();

    let mut levels = frame_levels(0x2C);
    levels[9] = Level::from(!levels[9].is_high());
    let mut events = Vec::new();
    for level in levels {
        rig.data.set(level);
        rig.pending.set(true);
        events.push(kbd.on_clock_edge());
    }
    assert!(events.contains(&Some(FrameEvent::Rejected(ps2_common::FrameError::Parity))));
    assert!(kbd.is_busy());
    assert_eq!(kbd.stats().parity_errors, 1);

    rig.send(&kbd, &[0x2C]);
    assert_eq!(drain(&kbd), "t");
}

#[test]
fn test_held_key_repeat_filter() {
    let rig = Rig::new();
    let kbd = rig.keyboard();

    // Typematic repeat of 'a' sends the same make code over and over.
    rig.send(&kbd, &[0x1C, 0x1C, 0x1C, 0x1C, 0xF0, 0x1C]);
    assert_eq!(drain(&kbd), "aa");
    assert_eq!(kbd.stats().suppressed, 2);
}

#[test]
fn test_echo_to_display() {
    let rig = Rig::new();
    let kbd = rig.keyboard();
    let now = Cell::new(0);
    let mut echo = KeyEcho::new(RecordingDisplay::new(), ManualTimer::new(&now), EchoConfig::DEFAULT);
    echo.start();

    rig.send(&kbd, &[0x12, 0x33, 0xF0, 0x12, 0x24, 0x4B, 0xF0, 0x4B, 0x4B, 0x44]);
    let mut tick = 0;
    while tick < 2_000 {
        tick += 10;
        now.set(tick);
        echo.poll(&kbd);
    }
    let row: String = echo.display().row(0).iter().collect();
    assert_eq!(row.trim_end(), "Hello");
}
