//! NAL unit inspection.

/// NAL unit types relevant for H.264.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum NalUnitType {
    /// Non-IDR slice (P/B frame).
    NonIdrSlice = 1,
    /// IDR slice (keyframe).
    IdrSlice = 5,
    /// Supplemental Enhancement Information.
    Sei = 6,
    /// Sequence Parameter Set.
    Sps = 7,
    /// Picture Parameter Set.
    Pps = 8,
    /// Access Unit Delimiter.
    Aud = 9,
    /// Other/unknown NAL type.
    Other = 0,
}

impl From<u8> for NalUnitType {
    fn from(byte: u8) -> Self {
        match byte & 0x1F {
            1 => NalUnitType::NonIdrSlice,
            5 => NalUnitType::IdrSlice,
            6 => NalUnitType::Sei,
            7 => NalUnitType::Sps,
            8 => NalUnitType::Pps,
            9 => NalUnitType::Aud,
            _ => NalUnitType::Other,
        }
    }
}

/// Whether `data` begins with a 3- or 4-byte Annex B start code.
pub fn starts_with_start_code(data: &[u8]) -> bool {
    if data.len() >= 3 && data[0] == 0 && data[1] == 0 && data[2] == 1 {
        return true;
    }
    data.len() >= 4 && data[0] == 0 && data[1] == 0 && data[2] == 0 && data[3] == 1
}

/// Scan an Annex B payload for an IDR NAL unit.
///
/// Finds every start code (3- or 4-byte form, both may appear in the same
/// payload) and checks the NAL header byte that follows it. Returns true iff
/// some NAL unit has type 5 (IDR). Empty or non-matching input is not a
/// keyframe.
pub fn contains_idr(data: &[u8]) -> bool {
    let len = data.len();
    let mut i = 0;

    while i + 2 < len {
        if data[i] != 0 || data[i + 1] != 0 {
            i += 1;
            continue;
        }

        let header = if data[i + 2] == 1 {
            i + 3
        } else if i + 3 < len && data[i + 2] == 0 && data[i + 3] == 1 {
            i + 4
        } else {
            i += 1;
            continue;
        };

        if header < len && NalUnitType::from(data[header]) == NalUnitType::IdrSlice {
            return true;
        }

        i = header;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nal_type_from_masked_header() {
        // 0x65 = nal_ref_idc 3, type 5
        assert_eq!(NalUnitType::from(0x65), NalUnitType::IdrSlice);
        assert_eq!(NalUnitType::from(0x67), NalUnitType::Sps);
        assert_eq!(NalUnitType::from(0x68), NalUnitType::Pps);
        assert_eq!(NalUnitType::from(0x41), NalUnitType::NonIdrSlice);
    }

    #[test]
    fn test_starts_with_start_code() {
        assert!(starts_with_start_code(&[0x00, 0x00, 0x01, 0x65]));
        assert!(starts_with_start_code(&[0x00, 0x00, 0x00, 0x01]));
        assert!(!starts_with_start_code(&[0x00, 0x00, 0x02, 0x65]));
        assert!(!starts_with_start_code(&[0x00, 0x00]));
        assert!(!starts_with_start_code(&[]));
    }

    #[test]
    fn test_contains_idr_4byte_start_code() {
        let data = [0x00, 0x00, 0x00, 0x01, 0x65, 0x88, 0x84];
        assert!(contains_idr(&data));
    }

    #[test]
    fn test_contains_idr_3byte_start_code() {
        let data = [0x00, 0x00, 0x01, 0x65, 0x88, 0x84];
        assert!(contains_idr(&data));
    }

    #[test]
    fn test_contains_idr_mixed_start_codes() {
        // SPS with a 4-byte code, then an IDR slice with a 3-byte code
        let data = [
            0x00, 0x00, 0x00, 0x01, 0x67, 0x42, 0x00, 0x1E, // SPS
            0x00, 0x00, 0x01, 0x65, 0x88, // IDR
        ];
        assert!(contains_idr(&data));
    }

    #[test]
    fn test_contains_idr_non_idr_only() {
        let data = [0x00, 0x00, 0x00, 0x01, 0x41, 0x9A, 0x02]; // P slice
        assert!(!contains_idr(&data));
    }

    #[test]
    fn test_contains_idr_empty_and_garbage() {
        assert!(!contains_idr(&[]));
        assert!(!contains_idr(&[0x65, 0x88, 0x84]));
        assert!(!contains_idr(&[0x00, 0x00, 0x00, 0x01]));
    }
}
