//! Property-based tests using proptest

use proptest::prelude::*;
use sensorlink_core::{
    constants::{apply_mask, FieldIndex, FIELD_COUNT},
    decoder::{decode_payload, parse_masked},
    encoder::{encode_frame, mask_fields},
    extractor::{extract_all, FrameExtractor},
    reconstruct::{combine_words, reconstruct, signed16, signed32, split_words},
    FieldSet, TelemetryError,
};

fn any_field_set() -> impl Strategy<Value = FieldSet> {
    prop::array::uniform9(any::<u16>()).prop_map(FieldSet::from_words)
}

proptest! {
    #[test]
    fn prop_unmask_after_mask_is_identity(v in any::<u16>(), position in 0usize..FIELD_COUNT) {
        let key = FieldIndex::ALL[position].key();
        prop_assert_eq!((v ^ key) ^ key, v);
    }

    #[test]
    fn prop_apply_mask_involution(words in prop::array::uniform9(any::<u16>())) {
        prop_assert_eq!(apply_mask(apply_mask(words)), words);
    }

    #[test]
    fn prop_signed16_ranges(v in any::<u16>()) {
        let s = i32::from(signed16(v));
        if v <= 32767 {
            prop_assert_eq!(s, i32::from(v));
        } else {
            prop_assert_eq!(s, i32::from(v) - 65536);
            prop_assert!((-32768..=-1).contains(&s));
        }
    }

    #[test]
    fn prop_signed32_ranges(high in any::<u16>(), low in any::<u16>()) {
        let combined = combine_words(high, low);
        let s = i64::from(signed32(combined));
        if combined <= 2_147_483_647 {
            prop_assert_eq!(s, i64::from(combined));
        } else {
            prop_assert_eq!(s, i64::from(combined) - 4_294_967_296);
            prop_assert!((-2_147_483_648..=-1).contains(&s));
        }
        prop_assert_eq!(split_words(signed32(combined)), (high, low));
    }

    #[test]
    fn prop_reconstruct_deterministic(fields in any_field_set(), uptime in any::<u64>()) {
        prop_assert_eq!(reconstruct(&fields, uptime), reconstruct(&fields, uptime));
    }

    #[test]
    fn prop_wire_round_trip(fields in any_field_set()) {
        let frame = encode_frame(&mask_fields(&fields));
        let found = extract_all(&frame);
        prop_assert_eq!(found.len(), 1);
        prop_assert_eq!(decode_payload(found[0].payload()).unwrap(), fields);
    }

    #[test]
    fn prop_chunking_does_not_change_frames(
        fields in prop::collection::vec(any_field_set(), 1..8),
        chunk_len in 1usize..64
    ) {
        let mut stream = Vec::new();
        for f in &fields {
            stream.extend_from_slice(&encode_frame(f));
        }

        let mut extractor = FrameExtractor::new();
        let mut payloads = Vec::new();
        for chunk in stream.chunks(chunk_len) {
            for result in extractor.feed(chunk) {
                payloads.push(result.unwrap().into_payload());
            }
        }

        let whole: Vec<String> = extract_all(&stream)
            .into_iter()
            .map(|f| f.into_payload())
            .collect();
        prop_assert_eq!(payloads, whole);
    }

    #[test]
    fn prop_wrong_field_count_is_malformed(words in prop::collection::vec(any::<u16>(), 1..20)) {
        prop_assume!(words.len() != FIELD_COUNT);
        let payload: Vec<String> = words.iter().map(u16::to_string).collect();
        let result = parse_masked(&payload.join(","));
        let is_malformed = matches!(result, Err(TelemetryError::MalformedFrame { .. }));
        prop_assert!(is_malformed);
    }

    #[test]
    fn prop_decode_never_panics(payload in ".{0,128}") {
        let _ = decode_payload(&payload);
    }

    #[test]
    fn prop_extractor_never_panics(
        chunks in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..256), 0..16)
    ) {
        let mut extractor = FrameExtractor::with_max_buffer_len(512);
        for chunk in &chunks {
            let _ = extractor.feed(chunk);
            prop_assert!(extractor.len() <= 512);
        }
    }
}
