//! Field decoding (strict mode)

use crate::constants::{apply_mask, FIELD_COUNT, FIELD_NAMES, FIELD_SEPARATOR};
use crate::error::TelemetryError;
use crate::types::{FieldSet, Frame};
use crate::Result;
use alloc::string::ToString;

/// Decode a frame into its unmasked field set
pub fn decode_frame(frame: &Frame) -> Result<FieldSet> {
    decode_payload(frame.payload())
}

/// Decode a frame payload into its unmasked field set
///
/// This function performs strict validation:
/// - Exactly nine comma-separated fields
/// - Every field a base-10 integer in `0..=65535`, surrounding whitespace allowed
///
/// A single bad field rejects the whole frame.
pub fn decode_payload(payload: &str) -> Result<FieldSet> {
    let masked = parse_masked(payload)?;
    Ok(FieldSet::from_words(apply_mask(masked)))
}

/// Parse the nine masked words without un-masking them
pub fn parse_masked(payload: &str) -> Result<[u16; FIELD_COUNT]> {
    let actual = payload.split(FIELD_SEPARATOR).count();
    if actual != FIELD_COUNT {
        return Err(TelemetryError::MalformedFrame {
            expected: FIELD_COUNT,
            actual,
        });
    }

    let mut words = [0u16; FIELD_COUNT];
    for (index, text) in payload.split(FIELD_SEPARATOR).enumerate() {
        words[index] = parse_word(text).ok_or_else(|| TelemetryError::CorruptData {
            index,
            field: FIELD_NAMES[index],
            value: text.to_string(),
        })?;
    }

    Ok(words)
}

fn parse_word(text: &str) -> Option<u16> {
    let trimmed = text.trim_matches(|c: char| c.is_ascii_whitespace());
    // Also accepts a leading '+'
    trimmed.parse::<u16>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::KEY_TABLE;

    #[test]
    fn test_decode_unmasks_each_position() {
        let decoded =
            decode_payload("43691,52428,61680,3855,42405,21845,43690,59367,6168").unwrap();

        assert_eq!(decoded.gas, 1);
        assert_eq!(decoded.to_words()[1..], [0u16; 8]);
    }

    #[test]
    fn test_decode_masked_zero_yields_keys() {
        let decoded = decode_payload("0,0,0,0,0,0,0,0,0").unwrap();
        assert_eq!(decoded.to_words(), KEY_TABLE);
    }

    #[test]
    fn test_eight_fields_is_malformed() {
        let result = decode_payload("1,2,3,4,5,6,7,8");
        assert_eq!(
            result,
            Err(TelemetryError::MalformedFrame {
                expected: 9,
                actual: 8
            })
        );
    }

    #[test]
    fn test_empty_payload_is_malformed() {
        let result = decode_payload("");
        assert!(matches!(
            result,
            Err(TelemetryError::MalformedFrame { actual: 1, .. })
        ));
    }

    #[test]
    fn test_non_numeric_is_corrupt() {
        let result = decode_payload("abc,2,3,4,5,6,7,8,9");
        assert_eq!(
            result,
            Err(TelemetryError::CorruptData {
                index: 0,
                field: "gas",
                value: "abc".into()
            })
        );
    }

    #[test]
    fn test_out_of_range_is_corrupt() {
        assert!(matches!(
            decode_payload("1,2,3,4,5,6,7,8,65536"),
            Err(TelemetryError::CorruptData { index: 8, field: "lon_low", .. })
        ));
        assert!(matches!(
            decode_payload("1,2,-3,4,5,6,7,8,9"),
            Err(TelemetryError::CorruptData { index: 2, .. })
        ));
        assert!(matches!(
            decode_payload("1,2,3,,5,6,7,8,9"),
            Err(TelemetryError::CorruptData { index: 3, .. })
        ));
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let spaced =
            decode_payload(" 43691, 52428 ,61680,3855,42405,21845,43690,59367,6168\r").unwrap();
        assert_eq!(spaced.gas, 1);
    }
}
