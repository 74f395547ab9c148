//! Wire framing for encoded stream units.
//!
//! This crate owns the byte-oriented output side of the pipeline: the
//! [`Sink`] capability trait over the outbound transport (named pipe, socket,
//! file), the [`StreamUnit`] record that travels through the frame queue, and
//! the [`WireWriter`] that serializes units into the self-delimiting wire
//! frame format.

mod error;
mod sink;
mod unit;
mod wire;

pub use error::TransportError;
pub use sink::{IoSink, Sink};
pub use unit::StreamUnit;
pub use wire::WireWriter;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Fixed wire header size: 4-byte length + 8-byte timestamp + 1 flag byte.
pub const WIRE_HEADER_LEN: usize = 13;

/// Flag bit marking a keyframe unit.
pub const FLAG_KEYFRAME: u8 = 0b0000_0001;

/// Flag bit marking an audio unit (reserved, never set by this core).
pub const FLAG_AUDIO: u8 = 0b0000_0010;
