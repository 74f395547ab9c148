//! Thread-safe FIFO hand-off between the acquire and transmit loops.

use std::collections::VecDeque;

use parking_lot::Mutex;

use framepipe_transport::StreamUnit;

/// Ordered hand-off buffer of ready-to-send units.
///
/// One pusher role (the acquire loop) and one popper role (the transmit
/// loop); neither operation blocks, and an empty queue is a normal, frequent
/// state. The lock covers only the deque mutation; no I/O or encoding work
/// happens under it.
#[derive(Default)]
pub struct FrameQueue {
    inner: Mutex<VecDeque<StreamUnit>>,
}

impl FrameQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a unit at the tail.
    pub fn push(&self, unit: StreamUnit) {
        self.inner.lock().push_back(unit);
    }

    /// Remove and return the head, or `None` when empty.
    pub fn pop(&self) -> Option<StreamUnit> {
        self.inner.lock().pop_front()
    }

    /// Current depth.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use std::sync::Arc;
    use std::thread;

    fn unit(ts: u64) -> StreamUnit {
        StreamUnit::video(Bytes::from_static(&[0x41]), ts, false)
    }

    #[test]
    fn test_fifo_order_single_thread() {
        let queue = FrameQueue::new();
        for ts in 0..5 {
            queue.push(unit(ts));
        }

        for ts in 0..5 {
            assert_eq!(queue.pop().unwrap().timestamp_us, ts);
        }
        assert!(queue.pop().is_none());
    }

    #[test]
    fn test_pop_empty_is_none_not_error() {
        let queue = FrameQueue::new();
        assert!(queue.pop().is_none());
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn test_fifo_order_across_threads() {
        let queue = Arc::new(FrameQueue::new());
        const COUNT: u64 = 1000;

        let producer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                for ts in 0..COUNT {
                    queue.push(unit(ts));
                }
            })
        };

        let consumer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                let mut seen = Vec::with_capacity(COUNT as usize);
                while seen.len() < COUNT as usize {
                    if let Some(unit) = queue.pop() {
                        seen.push(unit.timestamp_us);
                    } else {
                        thread::yield_now();
                    }
                }
                seen
            })
        };

        producer.join().unwrap();
        let seen = consumer.join().unwrap();

        // One producer: pop order is exactly push order.
        let expected: Vec<u64> = (0..COUNT).collect();
        assert_eq!(seen, expected);
        assert!(queue.is_empty());
    }
}
