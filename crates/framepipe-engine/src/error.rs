//! Error types for the engine module.

use thiserror::Error;

use framepipe_source::SourceError;

/// Errors that can occur while driving a pipeline session.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Start called while already running.
    #[error("Pipeline already running")]
    AlreadyRunning,

    /// Start called after a completed session; the source and sink are gone.
    #[error("Session already consumed, create a new driver")]
    SessionConsumed,

    /// Source configuration failed at startup.
    #[error("Source startup failed: {0}")]
    SourceStartup(#[from] SourceError),
}
