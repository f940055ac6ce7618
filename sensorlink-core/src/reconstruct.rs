//! Value reconstruction: unmasked words to physical units

use crate::constants::{ACCEL_LSB_PER_G, MICRO_DEGREES_PER_DEGREE};
use crate::types::{Acceleration, FieldSet, Location, PhysicalRecord};
use core::cell::Cell;

/// Reinterpret a 16-bit word as two's complement
///
/// `0..=32767` maps to itself, `32768..=65535` maps to `-32768..=-1`.
pub const fn signed16(word: u16) -> i16 {
    word as i16
}

/// Combine high and low words into one 32-bit value
pub const fn combine_words(high: u16, low: u16) -> u32 {
    ((high as u32) << 16) | low as u32
}

/// Reinterpret a 32-bit value as two's complement
pub const fn signed32(value: u32) -> i32 {
    value as i32
}

/// Split a signed 32-bit value into its high and low words
pub const fn split_words(value: i32) -> (u16, u16) {
    let bits = value as u32;
    ((bits >> 16) as u16, bits as u16)
}

/// Scale a raw accelerometer word to g
pub fn accel_to_g(word: u16) -> f64 {
    f64::from(signed16(word)) / ACCEL_LSB_PER_G
}

/// Scale a pair of coordinate words to degrees
pub fn words_to_degrees(high: u16, low: u16) -> f64 {
    f64::from(signed32(combine_words(high, low))) / MICRO_DEGREES_PER_DEGREE
}

/// Build a physical record from an unmasked field set
///
/// Pure: the same fields and timestamp always give the same record.
pub fn reconstruct(fields: &FieldSet, uptime_ms: u64) -> PhysicalRecord {
    PhysicalRecord {
        gas: fields.gas,
        co2: fields.co2,
        acceleration: Acceleration {
            x: accel_to_g(fields.accel_x),
            y: accel_to_g(fields.accel_y),
            z: accel_to_g(fields.accel_z),
        },
        location: Location {
            latitude: words_to_degrees(fields.lat_high, fields.lat_low),
            longitude: words_to_degrees(fields.lon_high, fields.lon_low),
        },
        uptime_ms,
    }
}

/// Source of the local monotonic timestamp attached to records
pub trait Clock {
    /// Milliseconds since the gateway started
    fn uptime_ms(&self) -> u64;
}

/// Wall-clock independent uptime counter backed by `Instant`
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    started: std::time::Instant,
}

#[cfg(feature = "std")]
impl MonotonicClock {
    /// Start counting from now
    pub fn new() -> Self {
        Self {
            started: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for MonotonicClock {
    fn uptime_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Externally driven clock, for tests and hosts with their own tick source
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: Cell<u64>,
}

impl ManualClock {
    /// Create a clock reading `now_ms`
    pub fn new(now_ms: u64) -> Self {
        Self {
            now_ms: Cell::new(now_ms),
        }
    }

    /// Set the current reading
    pub fn set(&self, now_ms: u64) {
        self.now_ms.set(now_ms);
    }

    /// Move the clock forward, saturating at `u64::MAX`
    pub fn advance(&self, delta_ms: u64) {
        self.now_ms.set(self.now_ms.get().saturating_add(delta_ms));
    }
}

impl Clock for ManualClock {
    fn uptime_ms(&self) -> u64 {
        self.now_ms.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn uptime_ms(&self) -> u64 {
        (**self).uptime_ms()
    }
}
