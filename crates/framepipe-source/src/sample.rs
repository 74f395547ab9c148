//! Raw sample types.

use bytes::Bytes;

use framepipe_bitstream::PayloadFraming;

/// One raw encoded payload handed out by a frame source.
#[derive(Debug, Clone)]
pub struct RawSample {
    /// Encoded bytes in the source's declared framing.
    pub data: Bytes,

    /// Framing convention of `data`.
    pub framing: PayloadFraming,

    /// Capture/encode timestamp in microseconds since session start.
    pub timestamp_us: u64,

    /// Optional keyframe hint from the encoder, when it knows.
    pub keyframe_hint: Option<bool>,
}

impl RawSample {
    /// Create a sample with no keyframe hint.
    pub fn new(data: Bytes, framing: PayloadFraming, timestamp_us: u64) -> Self {
        Self {
            data,
            framing,
            timestamp_us,
            keyframe_hint: None,
        }
    }

    /// Attach a keyframe hint.
    pub fn with_keyframe_hint(mut self, keyframe: bool) -> Self {
        self.keyframe_hint = Some(keyframe);
        self
    }
}
