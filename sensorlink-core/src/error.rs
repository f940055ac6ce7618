//! Error types for sensor link operations

use alloc::string::String;

/// Errors that can occur while turning the serial stream into telemetry
#[cfg_attr(feature = "std", derive(thiserror::Error))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TelemetryError {
    /// End delimiter seen before any start delimiter; the buffer was reset
    #[cfg_attr(
        feature = "std",
        error("Framing desync: end delimiter before start, discarded {discarded} bytes")
    )]
    FramingDesync {
        /// Number of buffered bytes thrown away.
        discarded: usize,
    },

    /// Frame does not carry the expected number of fields
    #[cfg_attr(feature = "std", error("Malformed frame: expected {expected} fields, got {actual}"))]
    MalformedFrame {
        /// The number of fields expected.
        expected: usize,
        /// The number of fields actually found.
        actual: usize,
    },

    /// A field is not a base-10 integer in the 16-bit range
    #[cfg_attr(feature = "std", error("Corrupt data in field {index} ({field}): {value:?}"))]
    CorruptData {
        /// Wire position of the offending field.
        index: usize,
        /// Name of the offending field.
        field: &'static str,
        /// The raw text that failed to parse.
        value: String,
    },

    /// Incoming bytes are not valid text; the buffer was reset
    #[cfg_attr(
        feature = "std",
        error("Stream decode error: invalid UTF-8 after {valid_up_to} bytes")
    )]
    StreamDecode {
        /// Length of the valid prefix of the rejected chunk.
        valid_up_to: usize,
    },

    /// Buffer grew past its limit without yielding a frame; the buffer was reset
    #[cfg_attr(feature = "std", error("Buffer overflow: {len} bytes exceeds maximum {max}"))]
    BufferOverflow {
        /// Buffered length when the limit was hit.
        len: usize,
        /// The configured limit.
        max: usize,
    },

    /// The delivery collaborator rejected the record or could not be reached
    #[cfg_attr(feature = "std", error("Delivery error: {0}"))]
    Delivery(String),

    /// IO error while reading the serial channel
    #[cfg_attr(feature = "std", error("IO error: {0}"))]
    Io(String),
}

impl TelemetryError {
    /// Whether the error dropped a complete frame (as opposed to stream noise)
    pub fn is_frame_error(&self) -> bool {
        matches!(
            self,
            TelemetryError::MalformedFrame { .. } | TelemetryError::CorruptData { .. }
        )
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for TelemetryError {
    fn from(err: std::io::Error) -> Self {
        TelemetryError::Io(err.to_string())
    }
}
