//! Payload normalization to Annex B form.

use bytes::{BufMut, Bytes, BytesMut};
use tracing::debug;

use crate::nal::{contains_idr, starts_with_start_code};
use crate::START_CODE;

/// The framing convention a raw payload arrives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadFraming {
    /// Already start-code delimited; passed through unchanged.
    AnnexB,
    /// 4-byte big-endian length before each NAL unit.
    LengthPrefixed,
}

/// A payload converted to canonical Annex B form.
#[derive(Debug, Clone)]
pub struct NormalizedPayload {
    /// Start-code-delimited bytes, ready to transmit.
    pub data: Bytes,
    /// True iff the payload contains an IDR NAL unit.
    pub is_keyframe: bool,
}

/// Normalize a raw encoder payload into start-code-delimited form.
///
/// Returns `None` when the input yields no delimited unit (empty payload, or
/// length-prefixed data without a single whole record); the caller enqueues
/// nothing for that cycle. Never fails on malformed input.
pub fn normalize(data: Bytes, framing: PayloadFraming) -> Option<NormalizedPayload> {
    if data.is_empty() {
        return None;
    }

    let data = match framing {
        PayloadFraming::AnnexB => {
            if !starts_with_start_code(&data) {
                debug!(len = data.len(), "Declared Annex B payload lacks a leading start code");
            }
            data
        }
        PayloadFraming::LengthPrefixed => annex_b_from_length_prefixed(&data)?,
    };

    let is_keyframe = contains_idr(&data);
    Some(NormalizedPayload { data, is_keyframe })
}

/// Convert a 4-byte-big-endian length-prefixed payload to Annex B.
///
/// Each fully-contained record is re-emitted behind a 4-byte start code, in
/// original order. A length prefix that would read past the end of input
/// stops the conversion; whatever was converted so far is final (truncated
/// trailing data is dropped, not an error). Zero whole records yields `None`.
pub fn annex_b_from_length_prefixed(data: &[u8]) -> Option<Bytes> {
    let mut out = BytesMut::with_capacity(data.len() + START_CODE.len());
    let mut records = 0usize;
    let mut i = 0usize;

    while i + 4 <= data.len() {
        let len = u32::from_be_bytes([data[i], data[i + 1], data[i + 2], data[i + 3]]) as usize;
        i += 4;

        if len > data.len() - i {
            debug!(
                declared = len,
                remaining = data.len() - i,
                "Truncated length-prefixed record, dropping tail"
            );
            break;
        }

        // Skip degenerate zero-length records rather than emitting a bare
        // start code.
        if len > 0 {
            out.put_slice(&START_CODE);
            out.put_slice(&data[i..i + len]);
            records += 1;
        }
        i += len;
    }

    if records == 0 {
        return None;
    }

    Some(out.freeze())
}
