//! Telemetry emission: packaging records for the delivery collaborator
//!
//! Delivery is best-effort. Each record is handed to the sink exactly once;
//! if the sink fails the record is dropped and the error is reported.

use crate::error::TelemetryError;
use crate::types::{Acceleration, PhysicalRecord};
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

#[cfg(feature = "logging")]
use tracing::{debug, warn};

/// Record shape expected by the external store
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TelemetryDocument {
    /// Gas reading, raw sensor scale
    pub gas: u16,

    /// CO2 reading, raw sensor scale
    pub co2: u16,

    /// Acceleration in g
    #[serde(rename = "acelerometro")]
    pub acceleration: Acceleration,

    /// Position in degrees
    #[serde(rename = "ubicacion")]
    pub location: DocumentLocation,

    /// Gateway uptime when the record was built
    pub uptime_ms: u64,
}

/// Position as named in the external store
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DocumentLocation {
    /// Latitude in degrees
    #[serde(rename = "latitud")]
    pub latitude: f64,

    /// Longitude in degrees
    #[serde(rename = "longitud")]
    pub longitude: f64,
}

impl From<&PhysicalRecord> for TelemetryDocument {
    fn from(record: &PhysicalRecord) -> Self {
        Self {
            gas: record.gas,
            co2: record.co2,
            acceleration: record.acceleration,
            location: DocumentLocation {
                latitude: record.location.latitude,
                longitude: record.location.longitude,
            },
            uptime_ms: record.uptime_ms,
        }
    }
}

impl From<PhysicalRecord> for TelemetryDocument {
    fn from(record: PhysicalRecord) -> Self {
        Self::from(&record)
    }
}

/// Delivery collaborator receiving one document per decoded frame
pub trait TelemetrySink {
    /// Deliver a document; a single attempt, no retry
    fn deliver(&mut self, document: &TelemetryDocument) -> Result<(), TelemetryError>;
}

// Collecting sink
impl TelemetrySink for Vec<TelemetryDocument> {
    fn deliver(&mut self, document: &TelemetryDocument) -> Result<(), TelemetryError> {
        self.push(*document);
        Ok(())
    }
}

impl<S: TelemetrySink + ?Sized> TelemetrySink for &mut S {
    fn deliver(&mut self, document: &TelemetryDocument) -> Result<(), TelemetryError> {
        (**self).deliver(document)
    }
}

impl<S: TelemetrySink + ?Sized> TelemetrySink for alloc::boxed::Box<S> {
    fn deliver(&mut self, document: &TelemetryDocument) -> Result<(), TelemetryError> {
        (**self).deliver(document)
    }
}

/// Packages records and hands them to a sink
#[derive(Debug)]
pub struct TelemetryEmitter<S> {
    sink: S,
    delivered: usize,
    failed: usize,
}

impl<S: TelemetrySink> TelemetryEmitter<S> {
    /// Create an emitter delivering to `sink`
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            delivered: 0,
            failed: 0,
        }
    }

    /// Deliver one record. On failure the record is gone and the error is
    /// returned for reporting only.
    pub fn emit(&mut self, record: PhysicalRecord) -> Result<(), TelemetryError> {
        let document = TelemetryDocument::from(record);

        match self.sink.deliver(&document) {
            Ok(()) => {
                self.delivered += 1;

                #[cfg(feature = "logging")]
                debug!(
                    gas = document.gas,
                    co2 = document.co2,
                    uptime_ms = document.uptime_ms,
                    "Delivered record"
                );

                Ok(())
            }
            Err(e) => {
                self.failed += 1;

                #[cfg(feature = "logging")]
                warn!("Dropping record at {} ms: {:?}", document.uptime_ms, e);

                Err(e)
            }
        }
    }

    /// Records accepted by the sink
    pub fn delivered(&self) -> usize {
        self.delivered
    }

    /// Records dropped after a failed delivery
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Borrow the sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume the emitter, returning the sink
    pub fn into_sink(self) -> S {
        self.sink
    }
}
