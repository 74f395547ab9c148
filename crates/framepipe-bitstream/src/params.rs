//! Out-of-band parameter-set blob parsing.

use bytes::{BufMut, Bytes, BytesMut};
use tracing::debug;

use crate::START_CODE;

/// Parse an encoder's out-of-band parameter-set blob into an Annex B preamble.
///
/// Layout of the blob, produced once at encoder-configuration time:
/// - 1 byte: format/profile marker region, skipped
/// - 1 byte: count of SPS records, each `(u16 big-endian length, bytes)`
/// - 1 byte: count of PPS records, same form
///
/// Every record is re-emitted behind a 4-byte start code, SPS records first.
/// A declared length that runs past the end of the blob aborts the whole
/// parse: no partial preamble is returned. A missing preamble is not fatal to
/// the pipeline, the session simply streams without one.
pub fn parse_parameter_sets(blob: &[u8]) -> Option<Bytes> {
    let mut out = BytesMut::with_capacity(blob.len() + 2 * START_CODE.len());
    let mut i = 1usize; // skip the marker byte

    // SPS records, then PPS records, identically framed.
    for set in ["SPS", "PPS"] {
        let count = *blob.get(i)?;
        i += 1;

        for _ in 0..count {
            let len_bytes = blob.get(i..i + 2)?;
            let len = u16::from_be_bytes([len_bytes[0], len_bytes[1]]) as usize;
            i += 2;

            let record = blob.get(i..i + len)?;
            i += len;

            debug!(set, len, "Parsed parameter-set record");
            out.put_slice(&START_CODE);
            out.put_slice(record);
        }
    }

    Some(out.freeze())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_one_sps_one_pps() {
        let blob = [
            0x7A, // marker, skipped
            0x01, // 1 SPS
            0x00, 0x04, 0xAA, 0xBB, 0xCC, 0xDD, //
            0x01, // 1 PPS
            0x00, 0x02, 0xEE, 0xFF,
        ];
        let preamble = parse_parameter_sets(&blob).unwrap();
        assert_eq!(
            preamble.as_ref(),
            &[
                0x00, 0x00, 0x00, 0x01, 0xAA, 0xBB, 0xCC, 0xDD, //
                0x00, 0x00, 0x00, 0x01, 0xEE, 0xFF,
            ]
        );
    }

    #[test]
    fn test_parse_multiple_sps_records() {
        let blob = [
            0x00, //
            0x02, // 2 SPS
            0x00, 0x01, 0x67, //
            0x00, 0x01, 0x68, //
            0x00, // 0 PPS
        ];
        let preamble = parse_parameter_sets(&blob).unwrap();
        assert_eq!(
            preamble.as_ref(),
            &[
                0x00, 0x00, 0x00, 0x01, 0x67, //
                0x00, 0x00, 0x00, 0x01, 0x68,
            ]
        );
    }

    #[test]
    fn test_parse_truncated_record_aborts() {
        // SPS declares 4 bytes, only 2 present.
        let blob = [0x00, 0x01, 0x00, 0x04, 0xAA, 0xBB];
        assert!(parse_parameter_sets(&blob).is_none());
    }

    #[test]
    fn test_parse_missing_pps_count_aborts() {
        let blob = [0x00, 0x01, 0x00, 0x01, 0x67];
        assert!(parse_parameter_sets(&blob).is_none());
    }

    #[test]
    fn test_parse_empty_and_short_blobs() {
        assert!(parse_parameter_sets(&[]).is_none());
        assert!(parse_parameter_sets(&[0x7A]).is_none());
    }

    #[test]
    fn test_parse_zero_counts_yields_empty_preamble() {
        let blob = [0x7A, 0x00, 0x00];
        let preamble = parse_parameter_sets(&blob).unwrap();
        assert!(preamble.is_empty());
    }
}
