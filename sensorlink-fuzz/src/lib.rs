//! Fuzzing targets for sensorlink-core
//!
//! To use with cargo-fuzz:
//! 1. Install cargo-fuzz: cargo install cargo-fuzz
//! 2. Run fuzzer: cargo fuzz run fuzz_feed

use sensorlink_core::{
    decoder::decode_payload, extractor::FrameExtractor, reconstruct::ManualClock, Pipeline,
};

/// Feed `data` to a fresh extractor, split at the first byte's value
pub fn fuzz_feed(data: &[u8]) {
    let mut extractor = FrameExtractor::with_max_buffer_len(256);

    let split = data.first().map_or(0, |&b| b as usize).min(data.len());
    let (head, tail) = data.split_at(split);

    // Should never panic
    let _ = extractor.feed(head);
    let _ = extractor.feed(tail);
    assert!(extractor.len() <= 256);
}

pub fn fuzz_decode(data: &[u8]) {
    if let Ok(text) = core::str::from_utf8(data) {
        // Try to decode - should never panic
        let _ = decode_payload(text);
    }
}

pub fn fuzz_pipeline(data: &[u8]) {
    let mut pipeline = Pipeline::new(Vec::new(), ManualClock::new(0));
    let delivered = pipeline.process(data);
    assert_eq!(delivered, pipeline.sink().len());
}
