//! The frame source capability trait.

use std::time::Duration;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::{RawSample, SourceResult};

/// Capture and encoding configuration for a frame source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Capture width in pixels.
    pub width: u32,

    /// Capture height in pixels.
    pub height: u32,

    /// Target frames per second.
    pub fps: u32,

    /// Target bitrate in kbps.
    pub bitrate_kbps: u32,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            fps: 60,
            bitrate_kbps: 5000,
        }
    }
}

/// Trait for producers of raw encoded samples.
///
/// Implementations own their capture/encoder lifecycle. The pipeline calls
/// `configure` once before streaming, `acquire` once per cycle, and
/// `shutdown` when the session ends.
pub trait FrameSource: Send {
    /// Apply capture/encoder settings. Called once, before any `acquire`.
    fn configure(&mut self, config: &SourceConfig) -> SourceResult<()>;

    /// The out-of-band parameter-set blob, if the encoder produced one.
    ///
    /// Available after `configure`; at most one blob per session.
    fn decoder_config(&mut self) -> Option<Bytes>;

    /// Wait up to `timeout` for the next encoded sample.
    ///
    /// `Ok(None)` means nothing new was produced within the bound (a desktop
    /// that did not change, an encoder still buffering) and is a normal,
    /// frequent outcome. `Err` is a source fault.
    fn acquire(&mut self, timeout: Duration) -> SourceResult<Option<RawSample>>;

    /// Release capture/encoder resources. Idempotent.
    fn shutdown(&mut self);

    /// Source name for diagnostics.
    fn name(&self) -> &'static str;
}
