//! Types shared between the PS/2 HAL traits and the keyboard core.

#![no_std]
#![warn(missing_docs)]

pub mod error;
pub mod line;
pub mod modifiers;

pub use error::{FrameError, QueueFull};
pub use line::{Edge, Level, Line};
pub use modifiers::Modifiers;
