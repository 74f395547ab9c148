//! Pipeline counters.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Counters shared by both loops, feeding the periodic stats log and the
/// caller-facing snapshot.
#[derive(Debug, Default)]
pub struct PipelineStats {
    samples_acquired: AtomicU64,
    units_enqueued: AtomicU64,
    units_sent: AtomicU64,
    units_dropped: AtomicU64,
    bytes_sent: AtomicU64,
    queue_depth_max: AtomicUsize,
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineSnapshot {
    /// Samples received from the frame source.
    pub samples_acquired: u64,
    /// Units pushed onto the queue (preamble included).
    pub units_enqueued: u64,
    /// Units written to the sink.
    pub units_sent: u64,
    /// Units lost to sink failures.
    pub units_dropped: u64,
    /// Bytes written to the sink, wire headers included.
    pub bytes_sent: u64,
    /// Highest queue depth observed.
    pub queue_depth_max: usize,
}

impl PipelineStats {
    /// Record a sample handed out by the source.
    pub fn record_sample(&self) {
        self.samples_acquired.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a unit pushed onto the queue.
    pub fn record_enqueued(&self) {
        self.units_enqueued.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a unit written to the sink.
    pub fn record_sent(&self, bytes: u64) {
        self.units_sent.fetch_add(1, Ordering::Relaxed);
        self.bytes_sent.fetch_add(bytes, Ordering::Relaxed);
    }

    /// Record a unit lost to a sink failure.
    pub fn record_dropped(&self) {
        self.units_dropped.fetch_add(1, Ordering::Relaxed);
    }

    /// Track the queue depth high-water mark. Returns the previous mark.
    pub fn observe_queue_depth(&self, depth: usize) -> usize {
        self.queue_depth_max.fetch_max(depth, Ordering::Relaxed)
    }

    /// Copy the current counters.
    pub fn snapshot(&self) -> PipelineSnapshot {
        PipelineSnapshot {
            samples_acquired: self.samples_acquired.load(Ordering::Relaxed),
            units_enqueued: self.units_enqueued.load(Ordering::Relaxed),
            units_sent: self.units_sent.load(Ordering::Relaxed),
            units_dropped: self.units_dropped.load(Ordering::Relaxed),
            bytes_sent: self.bytes_sent.load(Ordering::Relaxed),
            queue_depth_max: self.queue_depth_max.load(Ordering::Relaxed),
        }
    }
}
