//! Frame source abstraction.
//!
//! A frame source wraps whatever produces raw encoded access units: a screen
//! capture path feeding a hardware encoder, a software encoder, or a scripted
//! test double. The pipeline only sees the [`FrameSource`] trait, so the
//! normalizer, queue, and packetizer carry no compile-time dependency on
//! capture or codec specifics.

mod channel;
mod error;
mod sample;
mod source;

pub use channel::{channel_source, ChannelSource, SampleSender};
pub use error::SourceError;
pub use sample::RawSample;
pub use source::{FrameSource, SourceConfig};

/// Result type for source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Channel capacity for [`ChannelSource`] sample hand-off.
pub const SAMPLE_CHANNEL_CAPACITY: usize = 30;
