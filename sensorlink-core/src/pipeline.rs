//! Synchronous processing pipeline
//!
//! bytes -> [`FrameExtractor`] -> [`decode_frame`] -> [`reconstruct`] -> [`TelemetryEmitter`]
//!
//! Every stage error is local: it is counted, logged and the pipeline keeps
//! going with the next frame or chunk.

use crate::decoder::decode_frame;
use crate::emitter::{TelemetryEmitter, TelemetrySink};
use crate::error::TelemetryError;
use crate::extractor::{ExtractorStats, FrameExtractor};
use crate::reconstruct::{reconstruct, Clock};

#[cfg(feature = "logging")]
use tracing::warn;

/// Pipeline statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Framing-level counters
    pub extractor: ExtractorStats,

    /// Frames dropped for a wrong field count
    pub malformed_frames: usize,

    /// Frames dropped for an unparseable field
    pub corrupt_frames: usize,

    /// Records accepted by the sink
    pub records_delivered: usize,

    /// Records dropped after a failed delivery
    pub delivery_failures: usize,
}

impl PipelineStats {
    /// Share of extracted frames that reached the sink, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.extractor.frames_extracted == 0 {
            0.0
        } else {
            (self.records_delivered as f64 / self.extractor.frames_extracted as f64) * 100.0
        }
    }

    /// Records built from decoded frames, delivered or not
    pub fn records_built(&self) -> usize {
        self.records_delivered + self.delivery_failures
    }
}

/// Owns every stage between the serial channel and the delivery sink
#[derive(Debug)]
pub struct Pipeline<S, C> {
    extractor: FrameExtractor,
    emitter: TelemetryEmitter<S>,
    clock: C,
    malformed_frames: usize,
    corrupt_frames: usize,
}

impl<S: TelemetrySink, C: Clock> Pipeline<S, C> {
    /// Create a pipeline with a default extractor
    pub fn new(sink: S, clock: C) -> Self {
        Self::with_extractor(FrameExtractor::new(), sink, clock)
    }

    /// Create a pipeline around a preconfigured extractor
    pub fn with_extractor(extractor: FrameExtractor, sink: S, clock: C) -> Self {
        Self {
            extractor,
            emitter: TelemetryEmitter::new(sink),
            clock,
            malformed_frames: 0,
            corrupt_frames: 0,
        }
    }

    /// Push a chunk through every stage; returns the number of records delivered
    pub fn process(&mut self, chunk: &[u8]) -> usize {
        let mut delivered = 0;

        for extracted in self.extractor.feed(chunk) {
            match extracted.and_then(|frame| decode_frame(&frame)) {
                Ok(fields) => {
                    let record = reconstruct(&fields, self.clock.uptime_ms());
                    if self.emitter.emit(record).is_ok() {
                        delivered += 1;
                    }
                }
                Err(e) => self.record_error(&e),
            }
        }

        delivered
    }

    fn record_error(&mut self, error: &TelemetryError) {
        // Stream resets are counted and logged by the extractor
        if !error.is_frame_error() {
            return;
        }

        if let TelemetryError::MalformedFrame { .. } = error {
            self.malformed_frames += 1;
        } else {
            self.corrupt_frames += 1;
        }

        #[cfg(feature = "logging")]
        warn!("Frame dropped: {:?}", error);
    }

    /// Drop any partially received frame, e.g. after a channel read error
    pub fn reset(&mut self) {
        self.extractor.clear();
    }

    /// Statistics since construction
    pub fn stats(&self) -> PipelineStats {
        PipelineStats {
            extractor: *self.extractor.stats(),
            malformed_frames: self.malformed_frames,
            corrupt_frames: self.corrupt_frames,
            records_delivered: self.emitter.delivered(),
            delivery_failures: self.emitter.failed(),
        }
    }

    /// Borrow the extractor
    pub fn extractor(&self) -> &FrameExtractor {
        &self.extractor
    }

    /// Borrow the sink
    pub fn sink(&self) -> &S {
        self.emitter.sink()
    }

    /// Consume the pipeline, returning the sink
    pub fn into_sink(self) -> S {
        self.emitter.into_sink()
    }
}
