//! Bit-level PS/2 frame receiver.
//!
//! A frame is 11 bits sampled on falling clock edges: one start bit (low),
//! eight data bits LSB first, one odd-parity bit and one stop bit (high).
//! [`FrameReceiver::step`] consumes exactly one bit and runs in the clock
//! interrupt, so it never blocks.

use crate::queue::ScanCodeQueue;
use ps2_common::{FrameError, Level};

/// Position within the frame. The partially assembled byte lives in the
/// variant that needs it, so a reset always drops it together with the
/// bit index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameState {
    AwaitStart,
    ReceivingBits { bit_index: u8, byte: u8, ones: u8 },
    AwaitParity { byte: u8, ones: u8 },
    AwaitStop { byte: u8 },
}

/// Result of a single [`FrameReceiver::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameEvent {
    /// Line high while waiting for a start bit.
    Idle,
    /// Start bit accepted.
    Started,
    /// One data bit stored.
    DataBit,
    /// Parity bit valid, waiting for the stop bit.
    ParityOk,
    /// Frame complete and byte queued.
    Queued(u8),
    /// Frame complete but byte equal to both previous bytes; not queued.
    Suppressed(u8),
    /// Frame complete but the queue was full; byte lost.
    Dropped(u8),
    /// Frame discarded.
    Rejected(FrameError),
}

/// Counters for received frames.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Bytes pushed to the queue.
    pub queued: u32,
    /// Bytes skipped by the triple-repeat rule.
    pub suppressed: u32,
    /// Bytes lost to a full queue.
    pub dropped: u32,
    /// Frames with bad parity.
    pub parity_errors: u32,
    /// Frames with a low stop bit.
    pub stop_errors: u32,
}

impl FrameStats {
    const fn new() -> Self {
        FrameStats {
            queued: 0,
            suppressed: 0,
            dropped: 0,
            parity_errors: 0,
            stop_errors: 0,
        }
    }
}

/// Receive context for one PS/2 device.
#[derive(Debug, Clone)]
pub struct FrameReceiver {
    state: FrameState,
    busy: bool,
    last_accepted: u8,
    second_last_accepted: u8,
    stats: FrameStats,
}

impl Default for FrameReceiver {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameReceiver {
    /// Create a receiver waiting for a start bit.
    pub const fn new() -> Self {
        FrameReceiver {
            state: FrameState::AwaitStart,
            busy: false,
            last_accepted: 0,
            second_last_accepted: 0,
            stats: FrameStats::new(),
        }
    }

    /// Returns true while a frame is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Frame counters since creation or the last [`reset`](Self::reset).
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Abandons any partial frame and forgets history and counters.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Consumes one bit sampled on a falling clock edge.
    pub fn step<const N: usize>(
        &mut self,
        level: Level,
        queue: &mut ScanCodeQueue<N>,
    ) -> FrameEvent {
        let bit = level.as_bit();
        match self.state {
            FrameState::AwaitStart => self.on_start(level),
            FrameState::ReceivingBits {
                bit_index,
                byte,
                ones,
            } => {
                let byte = byte | (bit << bit_index);
                let ones = ones + bit;
                let bit_index = bit_index + 1;
                self.state = if bit_index == 8 {
                    FrameState::AwaitParity { byte, ones }
                } else {
                    FrameState::ReceivingBits {
                        bit_index,
                        byte,
                        ones,
                    }
                };
                FrameEvent::DataBit
            }
            FrameState::AwaitParity { byte, ones } => {
                // Odd parity: data ones plus the parity bit must be odd.
                if bit != ones % 2 {
                    self.state = FrameState::AwaitStop { byte };
                    FrameEvent::ParityOk
                } else {
                    self.abort(FrameError::Parity)
                }
            }
            FrameState::AwaitStop { byte } => {
                if level.is_high() {
                    let event = self.accept(byte, queue);
                    self.state = FrameState::AwaitStart;
                    self.busy = false;
                    event
                } else {
                    self.abort(FrameError::MissingStop)
                }
            }
        }
    }

    fn on_start(&mut self, level: Level) -> FrameEvent {
        match level {
            Level::Low => {
                self.state = FrameState::ReceivingBits {
                    bit_index: 0,
                    byte: 0,
                    ones: 0,
                };
                self.busy = true;
                FrameEvent::Started
            }
            Level::High => FrameEvent::Idle,
        }
    }

    fn accept<const N: usize>(&mut self, byte: u8, queue: &mut ScanCodeQueue<N>) -> FrameEvent {
        if byte == self.last_accepted && byte == self.second_last_accepted {
            self.stats.suppressed = self.stats.suppressed.wrapping_add(1);
            log::trace!("ps2: suppressed repeat {:#04x}", byte);
            return FrameEvent::Suppressed(byte);
        }
        self.second_last_accepted = self.last_accepted;
        self.last_accepted = byte;
        match queue.push(byte) {
            Ok(()) => {
                self.stats.queued = self.stats.queued.wrapping_add(1);
                log::trace!("ps2: queued {:#04x}", byte);
                FrameEvent::Queued(byte)
            }
            Err(err) => {
                self.stats.dropped = self.stats.dropped.wrapping_add(1);
                log::warn!("ps2: {}", err);
                FrameEvent::Dropped(byte)
            }
        }
    }

    fn abort(&mut self, error: FrameError) -> FrameEvent {
        match error {
            FrameError::Parity => {
                self.stats.parity_errors = self.stats.parity_errors.wrapping_add(1)
            }
            FrameError::MissingStop => {
                self.stats.stop_errors = self.stats.stop_errors.wrapping_add(1)
            }
        }
        log::debug!("ps2: frame discarded: {}", error);
        self.state = FrameState::AwaitStart;
        self.busy = false;
        FrameEvent::Rejected(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::frame_levels;

    fn feed<const N: usize>(
        rx: &mut FrameReceiver,
        queue: &mut ScanCodeQueue<N>,
        levels: &[Level],
    ) -> FrameEvent {
        let mut last = FrameEvent::Idle;
        for &level in levels {
            last = rx.step(level, queue);
        }
        last
    }

    #[test]
    fn test_valid_frame_queues_byte() {
        let mut rx = FrameReceiver::new();
        let mut queue = ScanCodeQueue::<20>::new();
        for byte in [0x1C, 0x00, 0xFF, 0xF0, 0x5A] {
            let event = feed(&mut rx, &mut queue, &frame_levels(byte));
            assert_eq!(event, FrameEvent::Queued(byte));
            assert_eq!(queue.pop(), Some(byte));
        }
        assert!(!rx.is_busy());
        assert_eq!(rx.stats().queued, 5);
    }

    #[test]
    fn test_busy_during_frame() {
        let mut rx = FrameReceiver::new();
        let mut queue = ScanCodeQueue::<4>::new();
        let levels = frame_levels(0x1C);
        assert!(!rx.is_busy());
        assert_eq!(rx.step(levels[0], &mut queue), FrameEvent::Started);
        for &level in &levels[1..10] {
            rx.step(level, &mut queue);
            assert!(rx.is_busy());
        }
        rx.step(levels[10], &mut queue);
        assert!(!rx.is_busy());
    }

    #[test]
    fn test_idle_line_ignored() {
        let mut rx = FrameReceiver::new();
        let mut queue = ScanCodeQueue::<4>::new();
        for _ in 0..5 {
            assert_eq!(rx.step(Level::High, &mut queue), FrameEvent::Idle);
        }
        assert!(!rx.is_busy());
        assert_eq!(feed(&mut rx, &mut queue, &frame_levels(0x32)), FrameEvent::Queued(0x32));
    }

    #[test]
    fn test_bad_parity_discards_frame() {
        let mut rx = FrameReceiver::new();
        let mut queue = ScanCodeQueue::<4>::new();
        let mut levels = frame_levels(0x1C);
        levels[9] = if levels[9].is_high() { Level::Low } else { Level::High };

        let event = feed(&mut rx, &mut queue, &levels[..10]);
        assert_eq!(event, FrameEvent::Rejected(FrameError::Parity));
        assert!(!rx.is_busy());
        // The stop bit is now sampled as idle line.
        assert_eq!(rx.step(levels[10], &mut queue), FrameEvent::Idle);
        assert!(queue.is_empty());
        assert_eq!(rx.stats().parity_errors, 1);

        // Receiver recovers on the next frame.
        assert_eq!(feed(&mut rx, &mut queue, &frame_levels(0x1C)), FrameEvent::Queued(0x1C));
    }

    #[test]
    fn test_missing_stop_discards_frame() {
        let mut rx = FrameReceiver::new();
        let mut queue = ScanCodeQueue::<4>::new();
        let mut levels = frame_levels(0x2B);
        levels[10] = Level::Low;
        let event = feed(&mut rx, &mut queue, &levels);
        assert_eq!(event, FrameEvent::Rejected(FrameError::MissingStop));
        assert!(queue.is_empty());
        assert!(!rx.is_busy());
        assert_eq!(rx.stats().stop_errors, 1);
    }

    #[test]
    fn test_third_identical_byte_suppressed() {
        let mut rx = FrameReceiver::new();
        let mut queue = ScanCodeQueue::<8>::new();
        let levels = frame_levels(0x1C);
        assert_eq!(feed(&mut rx, &mut queue, &levels), FrameEvent::Queued(0x1C));
        assert_eq!(feed(&mut rx, &mut queue, &levels), FrameEvent::Queued(0x1C));
        assert_eq!(feed(&mut rx, &mut queue, &levels), FrameEvent::Suppressed(0x1C));
        assert_eq!(queue.len(), 2);

        // A different byte breaks the run.
        assert_eq!(feed(&mut rx, &mut queue, &frame_levels(0x32)), FrameEvent::Queued(0x32));
        assert_eq!(feed(&mut rx, &mut queue, &levels), FrameEvent::Queued(0x1C));
        assert_eq!(rx.stats().suppressed, 1);
    }

    #[test]
    fn test_zero_byte_suppressed_after_reset() {
        // History starts at zero, so a fresh receiver treats 0x00 as a repeat.
        let mut rx = FrameReceiver::new();
        let mut queue = ScanCodeQueue::<4>::new();
        assert_eq!(feed(&mut rx, &mut queue, &frame_levels(0x00)), FrameEvent::Suppressed(0x00));
    }

    #[test]
    fn test_full_queue_drops_byte() {
        let mut rx = FrameReceiver::new();
        let mut queue = ScanCodeQueue::<2>::new();
        assert_eq!(feed(&mut rx, &mut queue, &frame_levels(0x15)), FrameEvent::Queued(0x15));
        assert_eq!(feed(&mut rx, &mut queue, &frame_levels(0x1D)), FrameEvent::Queued(0x1D));
        assert_eq!(feed(&mut rx, &mut queue, &frame_levels(0x24)), FrameEvent::Dropped(0x24));
        assert!(!rx.is_busy());
        assert_eq!(queue.pop(), Some(0x15));
        assert_eq!(queue.pop(), Some(0x1D));
        assert_eq!(queue.pop(), None);
        assert_eq!(rx.stats().dropped, 1);
    }
}
