//! Session state machine and the one-shot parameter-set cache.

use bytes::Bytes;

/// The pipeline session state.
///
/// Transitions only through [`crate::PipelineDriver::start`] and
/// [`crate::PipelineDriver::stop`], never spontaneously.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No loops running.
    Idle,
    /// Both loops running.
    Running,
    /// Stop signalled, loops winding down.
    Stopping,
}

impl SessionState {
    /// Whether the session is idle.
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Whether the session is running.
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }

    /// State name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Stopping => "stopping",
        }
    }
}

/// At most one cached parameter-set preamble per encoder session.
///
/// Created at configuration time when the encoder's output type becomes
/// known, consumed on first use, never regenerated. Owned by the acquire
/// loop, so it needs no lock.
#[derive(Debug, Default)]
pub struct ParameterSetCache {
    preamble: Option<Bytes>,
}

impl ParameterSetCache {
    /// Cache a preamble. An empty blob is treated as no preamble at all.
    pub fn new(preamble: Option<Bytes>) -> Self {
        Self {
            preamble: preamble.filter(|p| !p.is_empty()),
        }
    }

    /// Take the preamble if it has not been sent yet. Subsequent calls
    /// return `None`.
    pub fn take_unsent(&mut self) -> Option<Bytes> {
        self.preamble.take()
    }

    /// Whether an unsent preamble is still cached.
    pub fn has_unsent(&self) -> bool {
        self.preamble.is_some()
    }
}
