//! Frame encoding (node side)
//!
//! Mirrors what the sensor node does before writing to the serial channel:
//! pack raw readings into nine 16-bit words, mask them, and print them as a
//! delimited line.

use crate::constants::{
    apply_mask, END_DELIMITER, FIELD_SEPARATOR, MICRO_DEGREES_PER_DEGREE, START_DELIMITER,
};
use crate::reconstruct::split_words;
use crate::types::{FieldSet, SensorSample};
use alloc::string::String;
use bytes::{BufMut, Bytes, BytesMut};
use core::fmt::Write;

/// Line terminator written after every frame
pub const LINE_ENDING: &[u8] = b"\r\n";

impl FieldSet {
    /// Pack raw readings into unmasked words
    ///
    /// Coordinates are truncated to whole micro-degrees. Without a fix (either
    /// coordinate missing) all four position words are zero.
    pub fn from_sample(sample: &SensorSample) -> Self {
        let (lat, lon) = match (sample.latitude, sample.longitude) {
            (Some(lat), Some(lon)) => (degrees_to_micro(lat), degrees_to_micro(lon)),
            _ => (0, 0),
        };
        let (lat_high, lat_low) = split_words(lat);
        let (lon_high, lon_low) = split_words(lon);

        Self {
            gas: sample.gas,
            co2: sample.co2,
            accel_x: sample.accel_x as u16,
            accel_y: sample.accel_y as u16,
            accel_z: sample.accel_z as u16,
            lat_high,
            lat_low,
            lon_high,
            lon_low,
        }
    }
}

// Saturating float-to-int cast, truncating toward zero
fn degrees_to_micro(degrees: f64) -> i32 {
    (degrees * MICRO_DEGREES_PER_DEGREE) as i32
}

/// Mask an unmasked field set for transmission
pub fn mask_fields(fields: &FieldSet) -> FieldSet {
    FieldSet::from_words(apply_mask(fields.to_words()))
}

/// Render already-masked words as a wire frame
///
/// Layout: `>` + nine base-10 words joined by `,` + `<` + CRLF
pub fn encode_frame(masked: &FieldSet) -> Bytes {
    let mut payload = String::with_capacity(64);
    for (i, word) in masked.to_words().iter().enumerate() {
        if i > 0 {
            payload.push(FIELD_SEPARATOR);
        }
        // Writing to a String cannot fail
        let _ = write!(payload, "{}", word);
    }

    let mut buf = BytesMut::with_capacity(payload.len() + 2 + LINE_ENDING.len());
    buf.put_u8(START_DELIMITER);
    buf.put_slice(payload.as_bytes());
    buf.put_u8(END_DELIMITER);
    buf.put_slice(LINE_ENDING);
    buf.freeze()
}

/// Pack, mask and frame one sample
pub fn encode_sample(sample: &SensorSample) -> Bytes {
    encode_frame(&mask_fields(&FieldSet::from_sample(sample)))
}

/// Builder for samples, convenient in tests and tools
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleBuilder {
    sample: SensorSample,
}

impl SampleBuilder {
    /// Start from an all-zero sample without a GPS fix
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the gas reading
    pub fn gas(mut self, gas: u16) -> Self {
        self.sample.gas = gas;
        self
    }

    /// Set the CO2 reading
    pub fn co2(mut self, co2: u16) -> Self {
        self.sample.co2 = co2;
        self
    }

    /// Set raw accelerometer counts
    pub fn accel(mut self, x: i16, y: i16, z: i16) -> Self {
        self.sample.accel_x = x;
        self.sample.accel_y = y;
        self.sample.accel_z = z;
        self
    }

    /// Set a GPS fix
    pub fn position(mut self, latitude: f64, longitude: f64) -> Self {
        self.sample.latitude = Some(latitude);
        self.sample.longitude = Some(longitude);
        self
    }

    /// Finish the sample
    pub fn build(self) -> SensorSample {
        self.sample
    }

    /// Finish and encode as a wire frame
    pub fn encode(self) -> Bytes {
        encode_sample(&self.sample)
    }
}
