//! H.264 bitstream normalization.
//!
//! Encoders hand out access units in two framings:
//! - **Annex B**: NAL units separated by start codes (0x000001 or 0x00000001).
//! - **Length-prefixed** (AVCC-style): each NAL unit preceded by a 4-byte
//!   big-endian length.
//!
//! The wire protocol carries Annex B only, so this crate converts
//! length-prefixed payloads to start-code-delimited form, parses the
//! out-of-band parameter-set blob an encoder produces at configuration time,
//! and classifies payloads as keyframe or not by locating IDR NAL units.
//!
//! Every function here is total over malformed input: truncated or garbage
//! data yields an empty result, never an error.

mod nal;
mod normalize;
mod params;

pub use nal::{contains_idr, starts_with_start_code, NalUnitType};
pub use normalize::{normalize, NormalizedPayload, PayloadFraming};
pub use params::parse_parameter_sets;

/// The 4-byte Annex B start code prepended to converted NAL units.
pub const START_CODE: [u8; 4] = [0x00, 0x00, 0x00, 0x01];
