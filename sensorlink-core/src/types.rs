//! Core types for the sensor link

use crate::constants::FIELD_COUNT;
use alloc::string::String;
use serde::{Deserialize, Serialize};

/// One delimited telemetry message, payload only (delimiters stripped)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    payload: String,
}

impl Frame {
    /// Create a frame from the text found between the delimiters
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    /// Frame payload
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Consume the frame, returning its payload
    pub fn into_payload(self) -> String {
        self.payload
    }
}

/// The nine words carried by a frame, in wire order
///
/// Depending on where it sits in the pipeline a `FieldSet` holds either
/// masked (as transmitted) or unmasked words; the type does not track which.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FieldSet {
    /// Gas sensor reading
    pub gas: u16,
    /// CO2 sensor reading
    pub co2: u16,
    /// Accelerometer X axis, two's-complement bit pattern
    pub accel_x: u16,
    /// Accelerometer Y axis, two's-complement bit pattern
    pub accel_y: u16,
    /// Accelerometer Z axis, two's-complement bit pattern
    pub accel_z: u16,
    /// Latitude, upper 16 bits
    pub lat_high: u16,
    /// Latitude, lower 16 bits
    pub lat_low: u16,
    /// Longitude, upper 16 bits
    pub lon_high: u16,
    /// Longitude, lower 16 bits
    pub lon_low: u16,
}

impl FieldSet {
    /// Build from words in wire order
    pub const fn from_words(words: [u16; FIELD_COUNT]) -> Self {
        Self {
            gas: words[0],
            co2: words[1],
            accel_x: words[2],
            accel_y: words[3],
            accel_z: words[4],
            lat_high: words[5],
            lat_low: words[6],
            lon_high: words[7],
            lon_low: words[8],
        }
    }

    /// Words in wire order
    pub const fn to_words(&self) -> [u16; FIELD_COUNT] {
        [
            self.gas,
            self.co2,
            self.accel_x,
            self.accel_y,
            self.accel_z,
            self.lat_high,
            self.lat_low,
            self.lon_high,
            self.lon_low,
        ]
    }
}

/// Acceleration in g
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Acceleration {
    /// X axis
    pub x: f64,
    /// Y axis
    pub y: f64,
    /// Z axis
    pub z: f64,
}

/// Position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    /// Latitude, positive north
    pub latitude: f64,
    /// Longitude, positive east
    pub longitude: f64,
}

/// Fully reconstructed telemetry tuple
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalRecord {
    /// Gas reading, raw sensor scale
    pub gas: u16,
    /// CO2 reading, raw sensor scale
    pub co2: u16,
    /// Acceleration in g
    pub acceleration: Acceleration,
    /// Position in degrees
    pub location: Location,
    /// Gateway uptime when the record was built
    pub uptime_ms: u64,
}

/// Raw readings as sampled on the node, before packing and masking
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SensorSample {
    /// Gas sensor ADC reading
    pub gas: u16,
    /// CO2 concentration
    #[serde(default)]
    pub co2: u16,
    /// Raw accelerometer X counts
    #[serde(default)]
    pub accel_x: i16,
    /// Raw accelerometer Y counts
    #[serde(default)]
    pub accel_y: i16,
    /// Raw accelerometer Z counts
    #[serde(default)]
    pub accel_z: i16,
    /// Latitude in degrees, absent without a GPS fix
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Longitude in degrees, absent without a GPS fix
    #[serde(default)]
    pub longitude: Option<f64>,
}
