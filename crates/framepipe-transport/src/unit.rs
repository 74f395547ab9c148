//! The stream unit record.

use bytes::Bytes;

use crate::{FLAG_AUDIO, FLAG_KEYFRAME};

/// One ready-to-send access unit, immutable once constructed.
///
/// `payload` is already normalized to start-code-delimited form and is never
/// empty when a unit is enqueued. Timestamps are microseconds since session
/// start and non-decreasing in transmission order.
#[derive(Debug, Clone)]
pub struct StreamUnit {
    /// Exactly the bytes to transmit.
    pub payload: Bytes,

    /// Capture/encode time, microseconds since session start.
    pub timestamp_us: u64,

    /// True iff the payload contains at least one IDR access unit.
    pub is_keyframe: bool,

    /// Reserved discriminator for a future audio unit type.
    pub is_audio: bool,
}

impl StreamUnit {
    /// Create a video unit.
    pub fn video(payload: Bytes, timestamp_us: u64, is_keyframe: bool) -> Self {
        Self {
            payload,
            timestamp_us,
            is_keyframe,
            is_audio: false,
        }
    }

    /// The wire flag byte: bit 0 keyframe, bit 1 audio, rest zero.
    pub fn flags(&self) -> u8 {
        let mut flags = 0u8;
        if self.is_keyframe {
            flags |= FLAG_KEYFRAME;
        }
        if self.is_audio {
            flags |= FLAG_AUDIO;
        }
        flags
    }
}
