//! Error types for the transport module.

use thiserror::Error;

/// Errors that can occur during transport operations.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The sink accepted fewer bytes than requested.
    #[error("Short write: {written} of {expected} bytes")]
    ShortWrite { expected: usize, written: usize },

    /// Write failed.
    #[error("Write failed: {0}")]
    WriteFailed(String),

    /// Flush failed.
    #[error("Flush failed: {0}")]
    FlushFailed(String),

    /// Sink already closed.
    #[error("Sink closed")]
    Closed,

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
