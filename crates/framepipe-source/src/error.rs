//! Error types for the source module.

use thiserror::Error;

/// Errors that can occur while configuring or acquiring from a frame source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Source initialization failed.
    #[error("Source initialization failed: {0}")]
    InitFailed(String),

    /// Source not configured before use.
    #[error("Source not configured")]
    NotConfigured,

    /// Unsupported configuration.
    #[error("Unsupported configuration: {0}")]
    UnsupportedConfig(String),

    /// Acquisition fault (distinct from a timeout, which is not an error).
    #[error("Acquisition failed: {0}")]
    AcquireFailed(String),

    /// Source already shut down.
    #[error("Source already shut down")]
    ShutDown,
}
