//! # Sensorlink Core
//!
//! Decoding of the masked telemetry stream a remote sensor node writes over
//! its serial link.
//!
//! ## Modules
//!
//! - `constants`: Delimiters, key table and fixed-point scales
//! - `types`: Core types (Frame, FieldSet, PhysicalRecord, SensorSample)
//! - `extractor`: Splitting the raw byte stream into frames
//! - `decoder`: Strict field parsing and un-masking
//! - `reconstruct`: Signed word reconstruction and unit scaling
//! - `emitter`: Packaging records for the delivery collaborator
//! - `pipeline`: The synchronous bytes-to-delivery chain
//! - `encoder`: Node-side packing and masking

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod constants;
pub mod decoder;
pub mod emitter;
pub mod encoder;
pub mod error;
pub mod extractor;
pub mod pipeline;
pub mod reconstruct;
pub mod types;

// Re-export commonly used types
pub use emitter::{TelemetryDocument, TelemetryEmitter, TelemetrySink};
pub use error::TelemetryError;
pub use extractor::FrameExtractor;
pub use pipeline::{Pipeline, PipelineStats};
pub use types::{FieldSet, Frame, PhysicalRecord, SensorSample};

/// Result type alias for sensor link operations
pub type Result<T> = core::result::Result<T, TelemetryError>;
