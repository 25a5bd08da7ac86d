//! Fixed-capacity circular queue of raw scan codes.
//!
//! The clock-edge interrupt is the only producer and the polling loop the
//! only consumer. The producer touches `tail` and `storage`; the consumer
//! touches `head`. The `empty` flag disambiguates `head == tail`, which
//! otherwise means either "empty" or "one byte stored", and is the one field
//! both sides write. Callers sharing a queue across contexts must therefore
//! run [`ScanCodeQueue::pop`] with the producer's interrupt masked, see
//! [`crate::Keyboard`].

use ps2_common::QueueFull;

/// Source of raw scan codes for the decoder.
pub trait ScanCodeSource {
    /// Removes and returns the oldest scan code, if any.
    fn next_scan_code(&mut self) -> Option<u8>;
}

/// Bounded FIFO of scan-code bytes with capacity `N`.
#[derive(Debug, Clone)]
pub struct ScanCodeQueue<const N: usize> {
    storage: [u8; N],
    /// Next slot to read.
    head: usize,
    /// Last slot written. Meaningless while `empty`.
    tail: usize,
    empty: bool,
}

impl<const N: usize> Default for ScanCodeQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> ScanCodeQueue<N> {
    /// Create an empty queue.
    ///
    /// # Panics
    ///
    /// Panics (at compile time when used in a `const`) if `N` is zero.
    pub const fn new() -> Self {
        assert!(N > 0, "scan code queue needs a non-zero capacity");
        ScanCodeQueue {
            storage: [0; N],
            head: 0,
            tail: 0,
            empty: true,
        }
    }

    /// Maximum number of unread bytes.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Returns true if no unread byte is stored.
    pub fn is_empty(&self) -> bool {
        self.empty
    }

    /// Returns true if the next push would be rejected.
    pub fn is_full(&self) -> bool {
        !self.empty && Self::advance(self.tail) == self.head
    }

    /// Number of unread bytes.
    pub fn len(&self) -> usize {
        if self.empty {
            0
        } else if self.tail >= self.head {
            self.tail - self.head + 1
        } else {
            N - self.head + self.tail + 1
        }
    }

    /// Stores `byte` at the back of the queue.
    ///
    /// A full queue rejects the byte and stays unchanged.
    pub fn push(&mut self, byte: u8) -> Result<(), QueueFull> {
        if self.empty {
            self.tail = self.head;
        } else {
            let next = Self::advance(self.tail);
            if next == self.head {
                return Err(QueueFull(byte));
            }
            self.tail = next;
        }
        self.storage[self.tail] = byte;
        self.empty = false;
        Ok(())
    }

    /// Removes and returns the oldest byte.
    pub fn pop(&mut self) -> Option<u8> {
        if self.empty {
            return None;
        }
        let byte = self.storage[self.head];
        self.storage[self.head] = 0;
        if self.head == self.tail {
            self.empty = true;
        } else {
            self.head = Self::advance(self.head);
        }
        Some(byte)
    }

    /// Returns the oldest byte without removing it.
    pub fn peek(&self) -> Option<u8> {
        if self.empty {
            None
        } else {
            Some(self.storage[self.head])
        }
    }

    /// Discards every stored byte.
    pub fn clear(&mut self) {
        self.storage = [0; N];
        self.head = 0;
        self.tail = 0;
        self.empty = true;
    }

    fn advance(index: usize) -> usize {
        if index == N - 1 {
            0
        } else {
            index + 1
        }
    }
}

impl<const N: usize> ScanCodeSource for ScanCodeQueue<N> {
    fn next_scan_code(&mut self) -> Option<u8> {
        self.pop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut queue = ScanCodeQueue::<4>::new();
        assert!(queue.is_empty());
        queue.push(0x1C).unwrap();
        queue.push(0x32).unwrap();
        queue.push(0x21).unwrap();
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.pop(), Some(0x1C));
        assert_eq!(queue.pop(), Some(0x32));
        assert_eq!(queue.pop(), Some(0x21));
        assert_eq!(queue.pop(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_pop_empty_leaves_queue_untouched() {
        let mut queue = ScanCodeQueue::<3>::new();
        assert_eq!(queue.pop(), None);
        assert_eq!(queue.peek(), None);
        queue.push(7).unwrap();
        assert_eq!(queue.pop(), Some(7));
        assert_eq!(queue.pop(), None);
        queue.push(8).unwrap();
        assert_eq!(queue.peek(), Some(8));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_full_queue_rejects_push() {
        let mut queue = ScanCodeQueue::<20>::new();
        for byte in 0..20u8 {
            queue.push(byte).unwrap();
        }
        assert!(queue.is_full());
        assert_eq!(queue.push(0xAA), Err(QueueFull(0xAA)));
        assert_eq!(queue.len(), 20);
        assert_eq!(queue.peek(), Some(0));

        assert_eq!(queue.pop(), Some(0));
        assert!(queue.push(0xAA).is_ok());
        assert!(queue.is_full());

        for expected in 1..20u8 {
            assert_eq!(queue.pop(), Some(expected));
        }
        assert_eq!(queue.pop(), Some(0xAA));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_wraparound_interleaved() {
        let mut queue = ScanCodeQueue::<3>::new();
        let mut next_in = 0u8;
        let mut next_out = 0u8;
        // Keep the queue between one and three deep while both indices lap
        // the buffer several times.
        for round in 0..10 {
            let pushes = if round % 2 == 0 { 2 } else { 1 };
            for _ in 0..pushes {
                if queue.push(next_in).is_ok() {
                    next_in += 1;
                }
            }
            assert_eq!(queue.pop(), Some(next_out));
            next_out += 1;
        }
        while let Some(byte) = queue.pop() {
            assert_eq!(byte, next_out);
            next_out += 1;
        }
        assert_eq!(next_in, next_out);
    }

    #[test]
    fn test_single_slot_queue() {
        let mut queue = ScanCodeQueue::<1>::new();
        queue.push(1).unwrap();
        assert!(queue.is_full());
        assert_eq!(queue.push(2), Err(QueueFull(2)));
        assert_eq!(queue.pop(), Some(1));
        queue.push(3).unwrap();
        assert_eq!(queue.pop(), Some(3));
    }

    #[test]
    fn test_clear() {
        let mut queue = ScanCodeQueue::<4>::new();
        queue.push(1).unwrap();
        queue.push(2).unwrap();
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.pop(), None);
    }
}
