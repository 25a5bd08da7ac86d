//! PS/2 keyboard receiver and decoder.
//!
//! Turns the clock/data bit stream of a PS/2 keyboard (scan code set 2) into
//! characters for a display.
//!
//! # Architecture
//!
//! - `frame`: per-bit receiver run from the clock-edge interrupt
//! - `queue`: fixed-capacity FIFO handing scan codes to the main loop
//! - `keymap`: US layout translation tables
//! - `decoder`: shift and caps lock tracking, make/break handling
//! - `keyboard`: the facade the interrupt vector and main loop call
//! - `echo`: main-loop driver that shows typed keys on a character display
//!
//! # Safety
//!
//! This crate contains no `unsafe` code. State shared with the interrupt
//! handler sits behind spinlocks that the main loop only takes with
//! interrupts masked.

#![no_std]
#![warn(missing_docs)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod decoder;
pub mod echo;
pub mod frame;
pub mod keyboard;
pub mod keymap;
pub mod queue;
pub mod testutil;

pub use config::{EchoConfig, KeyboardConfig, SCAN_CODE_QUEUE_CAPACITY};
pub use decoder::ScanCodeDecoder;
pub use echo::KeyEcho;
pub use frame::{FrameEvent, FrameReceiver, FrameStats};
pub use keyboard::Keyboard;
pub use queue::{ScanCodeQueue, ScanCodeSource};
