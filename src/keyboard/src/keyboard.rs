//! Keyboard facade shared by the clock interrupt and the polling loop.
//!
//! The interrupt side calls [`Keyboard::on_clock_edge`]; everything else is
//! called from ordinary program flow. Both sides lock the same spinlocks, so
//! every polling-side access to state the interrupt also touches runs with
//! interrupts masked. On a single core that makes the locks uncontended: the
//! handler can never preempt a holder.

use crate::config::{KeyboardConfig, SCAN_CODE_QUEUE_CAPACITY};
use crate::decoder::ScanCodeDecoder;
use crate::frame::{FrameEvent, FrameReceiver, FrameStats};
use crate::queue::{ScanCodeQueue, ScanCodeSource};
use ps2_common::Modifiers;
use ps2_hal::{DigitalInput, EdgeInterrupt, InterruptController};
use spin::Mutex;

/// A PS/2 keyboard attached to GPIO pins `P`, masked through `C`, buffering
/// up to `N` scan codes.
pub struct Keyboard<P, C, const N: usize = SCAN_CODE_QUEUE_CAPACITY> {
    config: KeyboardConfig,
    pins: Mutex<P>,
    interrupts: Mutex<C>,
    receiver: Mutex<FrameReceiver>,
    queue: Mutex<ScanCodeQueue<N>>,
    decoder: Mutex<ScanCodeDecoder>,
}

impl<P, C, const N: usize> Keyboard<P, C, N>
where
    P: DigitalInput + EdgeInterrupt,
    C: InterruptController,
{
    /// Create a keyboard. Nothing touches the hardware until
    /// [`initialize`](Self::initialize).
    pub const fn new(pins: P, interrupts: C, config: KeyboardConfig) -> Self {
        Keyboard {
            config,
            pins: Mutex::new(pins),
            interrupts: Mutex::new(interrupts),
            receiver: Mutex::new(FrameReceiver::new()),
            queue: Mutex::new(ScanCodeQueue::new()),
            decoder: Mutex::new(ScanCodeDecoder::new()),
        }
    }

    /// Pin assignment this keyboard was built with.
    pub fn config(&self) -> &KeyboardConfig {
        &self.config
    }

    /// Resets all receive and decode state and arms the clock interrupt.
    pub fn initialize(&self) {
        let config = self.config;
        self.interrupts.lock().without_interrupts(|| {
            self.receiver.lock().reset();
            self.queue.lock().clear();
            self.decoder.lock().reset();

            let mut pins = self.pins.lock();
            pins.configure_edge_interrupt(config.clock, config.clock_edge);
            pins.acknowledge_interrupt(config.clock);
            pins.enable_interrupt(config.clock);
        });
        log::info!(
            "ps2: keyboard on clock P{}.{} data P{}.{}, queue {}",
            config.clock.port,
            config.clock.pin,
            config.data.port,
            config.data.pin,
            N
        );
    }

    /// Clock edge interrupt entry point. Samples one bit.
    ///
    /// Returns `None` when the interrupt was not raised by the clock line.
    pub fn on_clock_edge(&self) -> Option<FrameEvent> {
        let level = {
            let mut pins = self.pins.lock();
            if !pins.is_interrupt_pending(self.config.clock) {
                return None;
            }
            pins.acknowledge_interrupt(self.config.clock);
            pins.read_line_level(self.config.data)
        };
        let mut receiver = self.receiver.lock();
        let mut queue = self.queue.lock();
        Some(receiver.step(level, &mut *queue))
    }

    /// Returns true while a frame is in flight or no scan code is waiting.
    ///
    /// Callers should not call [`get_key`](Self::get_key) while busy.
    pub fn is_busy(&self) -> bool {
        self.interrupts
            .lock()
            .without_interrupts(|| self.receiver.lock().is_busy() || self.queue.lock().is_empty())
    }

    /// Decodes queued scan codes into at most one character.
    pub fn get_key(&self) -> Option<char> {
        let mut decoder = self.decoder.lock();
        decoder.decode_next(&mut MaskedPop { keyboard: self })
    }

    /// Current shift and caps lock state.
    pub fn modifiers(&self) -> Modifiers {
        self.decoder.lock().modifiers()
    }

    /// Oldest queued scan code, without consuming it.
    pub fn peek(&self) -> Option<u8> {
        self.interrupts
            .lock()
            .without_interrupts(|| self.queue.lock().peek())
    }

    /// Receive counters.
    pub fn stats(&self) -> FrameStats {
        self.interrupts
            .lock()
            .without_interrupts(|| self.receiver.lock().stats())
    }

    fn pop(&self) -> Option<u8> {
        self.interrupts
            .lock()
            .without_interrupts(|| self.queue.lock().pop())
    }
}

/// Pops one byte per call, each inside its own critical section.
struct MaskedPop<'a, P, C, const N: usize> {
    keyboard: &'a Keyboard<P, C, N>,
}

impl<P, C, const N: usize> ScanCodeSource for MaskedPop<'_, P, C, N>
where
    P: DigitalInput + EdgeInterrupt,
    C: InterruptController,
{
    fn next_scan_code(&mut self) -> Option<u8> {
        self.keyboard.pop()
    }
}
