//! Pipeline driver for live stream sessions.
//!
//! This crate coordinates the two halves of a stream session: an acquire loop
//! that pulls raw samples from a [`framepipe_source::FrameSource`], normalizes
//! them, and queues them, and a transmit loop that drains the queue onto a
//! [`framepipe_transport::Sink`] through the wire framing. The driver owns
//! both worker threads and the Start/Stop state machine.

mod driver;
mod error;
mod queue;
mod state;
mod stats;

pub use driver::{PipelineConfig, PipelineDriver};
pub use error::EngineError;
pub use queue::FrameQueue;
pub use state::{ParameterSetCache, SessionState};
pub use stats::{PipelineSnapshot, PipelineStats};

use std::time::Duration;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Bounded wait for one source acquisition.
pub const ACQUIRE_TIMEOUT: Duration = Duration::from_millis(100);

/// Transmit-loop sleep when the queue is empty.
pub const IDLE_SLEEP: Duration = Duration::from_millis(1);

/// Interval between periodic stats log lines in the acquire loop.
pub const STATS_LOG_INTERVAL: Duration = Duration::from_secs(5);

/// Queue depth past which growth is logged as a warning.
pub const QUEUE_DEPTH_WARN: usize = 120;
