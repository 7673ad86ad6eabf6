//! Bounded hand-off queue between the monitor worker and the host.
//!
//! The queue is the only structure shared between the worker thread and the
//! host, and neither side may ever block on it: the worker pushes with a
//! drop-newest overflow policy, the host drains whatever is there.  A host
//! that stops draining loses events, it never stalls input capture.

use std::collections::VecDeque;
use std::sync::Mutex;

use tracing::trace;

use crate::events::InputEvent;

/// Default queue capacity.  Commands arrive at human speed; ten outstanding
/// events already means the host has stopped consuming.
pub const QUEUE_CAPACITY: usize = 10;

/// Fixed-capacity FIFO of input events, safe to share between the worker
/// and the host.
pub struct EventQueue {
    inner: Mutex<VecDeque<InputEvent>>,
    capacity: usize,
}

impl EventQueue {
    /// Creates a queue with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(QUEUE_CAPACITY)
    }

    /// Creates a queue holding at most `capacity` events.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// Appends an event without blocking.
    ///
    /// Returns `false` if the queue is full; the event is discarded and the
    /// operation is not retried.
    pub fn push(&self, event: InputEvent) -> bool {
        let mut queue = self.inner.lock().expect("lock poisoned");
        if queue.len() >= self.capacity {
            trace!(code = event.code, "event queue full, dropping newest event");
            return false;
        }
        queue.push_back(event);
        true
    }

    /// Removes and returns all queued events in FIFO order, leaving the
    /// queue empty.  Never blocks beyond the internal lock.
    pub fn drain(&self) -> Vec<InputEvent> {
        let mut queue = self.inner.lock().expect("lock poisoned");
        queue.drain(..).collect()
    }

    /// Number of currently queued events.
    pub fn len(&self) -> usize {
        self.inner.lock().expect("lock poisoned").len()
    }

    /// `true` if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::KEY_ESC;
    use std::sync::Arc;
    use std::thread;
    use std::time::SystemTime;

    fn event(code: u16) -> InputEvent {
        InputEvent::command(code, SystemTime::UNIX_EPOCH)
    }

    #[test]
    fn test_drain_returns_events_in_fifo_order() {
        // Arrange
        let queue = EventQueue::new();
        for code in 1..=5 {
            assert!(queue.push(event(code)));
        }

        // Act
        let drained = queue.drain();

        // Assert
        let codes: Vec<u16> = drained.iter().map(|e| e.code).collect();
        assert_eq!(codes, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_drain_leaves_queue_empty() {
        // Arrange
        let queue = EventQueue::new();
        queue.push(event(KEY_ESC));

        // Act
        queue.drain();

        // Assert
        assert!(queue.is_empty());
        assert!(queue.drain().is_empty(), "second drain yields nothing");
    }

    #[test]
    fn test_overflow_drops_the_newest_event() {
        // Arrange – fill to capacity
        let queue = EventQueue::new();
        for code in 0..QUEUE_CAPACITY as u16 {
            assert!(queue.push(event(code)));
        }

        // Act – the eleventh event must be rejected
        let accepted = queue.push(event(99));

        // Assert
        assert!(!accepted);
        assert_eq!(queue.len(), QUEUE_CAPACITY);
        let codes: Vec<u16> = queue.drain().iter().map(|e| e.code).collect();
        let expected: Vec<u16> = (0..QUEUE_CAPACITY as u16).collect();
        assert_eq!(codes, expected, "the original ten survive in order");
    }

    #[test]
    fn test_push_accepts_again_after_drain() {
        // Arrange
        let queue = EventQueue::with_capacity(1);
        assert!(queue.push(event(1)));
        assert!(!queue.push(event(2)));

        // Act
        queue.drain();

        // Assert
        assert!(queue.push(event(3)), "capacity frees up after drain");
    }

    #[test]
    fn test_concurrent_push_and_drain_lose_nothing_below_capacity() {
        // Arrange – a producer pushing fewer events than the consumer
        // drains per batch, so nothing is ever dropped
        let queue = Arc::new(EventQueue::with_capacity(1000));
        let producer_queue = Arc::clone(&queue);

        // Act
        let producer = thread::spawn(move || {
            for code in 0..500u16 {
                assert!(producer_queue.push(event(code)));
            }
        });

        let mut seen = Vec::new();
        while seen.len() < 500 {
            seen.extend(queue.drain());
        }
        producer.join().expect("producer panicked");

        // Assert – FIFO order is preserved across drain batches
        let codes: Vec<u16> = seen.iter().map(|e| e.code).collect();
        let expected: Vec<u16> = (0..500).collect();
        assert_eq!(codes, expected);
    }
}
