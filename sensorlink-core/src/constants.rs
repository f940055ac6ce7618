//! Constants for the sensor link wire format

/// Start-of-frame delimiter
pub const START_DELIMITER: u8 = b'>';

/// End-of-frame delimiter
pub const END_DELIMITER: u8 = b'<';

/// Separator between the textual fields of a frame payload
pub const FIELD_SEPARATOR: char = ',';

/// Number of fields carried by every frame
pub const FIELD_COUNT: usize = 9;

/// Field names in wire order
pub const FIELD_NAMES: [&str; FIELD_COUNT] = [
    "gas", "co2", "accel_x", "accel_y", "accel_z", "lat_high", "lat_low", "lon_high", "lon_low",
];

/// XOR mask for each field, indexed by wire position
pub const KEY_TABLE: [u16; FIELD_COUNT] = [
    0b1010_1010_1010_1010, // gas
    0b1100_1100_1100_1100, // co2
    0b1111_0000_1111_0000, // accel_x
    0b0000_1111_0000_1111, // accel_y
    0b1010_0101_1010_0101, // accel_z
    0b0101_0101_0101_0101, // lat_high
    0b1010_1010_1010_1010, // lat_low
    0b1110_0111_1110_0111, // lon_high
    0b0001_1000_0001_1000, // lon_low
];

/// Accelerometer fixed-point scale (LSB per g)
pub const ACCEL_LSB_PER_G: f64 = 16384.0;

/// GPS fixed-point scale (micro-degrees per degree)
pub const MICRO_DEGREES_PER_DEGREE: f64 = 1_000_000.0;

/// Longest possible frame, delimiters included: nine 5-digit words, eight
/// separators and two delimiters
pub const MAX_FRAME_LEN: usize = 2 + FIELD_COUNT * 5 + (FIELD_COUNT - 1);

/// Default upper bound on buffered bytes awaiting a complete frame
///
/// Leaves ample room for boot-time log lines ahead of the first frame.
pub const DEFAULT_MAX_BUFFER_LEN: usize = 4096;

/// Position of a field within a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldIndex {
    /// Gas sensor reading
    Gas = 0,
    /// CO2 sensor reading
    Co2 = 1,
    /// Accelerometer X axis
    AccelX = 2,
    /// Accelerometer Y axis
    AccelY = 3,
    /// Accelerometer Z axis
    AccelZ = 4,
    /// Latitude, upper 16 bits
    LatHigh = 5,
    /// Latitude, lower 16 bits
    LatLow = 6,
    /// Longitude, upper 16 bits
    LonHigh = 7,
    /// Longitude, lower 16 bits
    LonLow = 8,
}

impl FieldIndex {
    /// All positions in wire order
    pub const ALL: [FieldIndex; FIELD_COUNT] = [
        FieldIndex::Gas,
        FieldIndex::Co2,
        FieldIndex::AccelX,
        FieldIndex::AccelY,
        FieldIndex::AccelZ,
        FieldIndex::LatHigh,
        FieldIndex::LatLow,
        FieldIndex::LonHigh,
        FieldIndex::LonLow,
    ];

    /// Wire position of this field
    pub const fn position(self) -> usize {
        self as usize
    }

    /// Mask applied to this field on the wire
    pub const fn key(self) -> u16 {
        KEY_TABLE[self as usize]
    }

    /// Field name as used in logs and errors
    pub const fn name(self) -> &'static str {
        FIELD_NAMES[self as usize]
    }
}

/// XOR every word with its positional key.
///
/// The transform is its own inverse: the node masks with it and the
/// gateway un-masks with it.
pub fn apply_mask(words: [u16; FIELD_COUNT]) -> [u16; FIELD_COUNT] {
    let mut out = words;
    for (word, key) in out.iter_mut().zip(KEY_TABLE.iter()) {
        *word ^= key;
    }
    out
}
