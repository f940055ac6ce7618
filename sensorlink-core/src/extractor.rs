//! Frame extraction from the raw serial stream
//!
//! The node writes frames as `>w0,w1,...,w8<` with arbitrary noise (boot
//! messages, line endings) in between. The extractor accumulates incoming
//! chunks and cuts out every complete delimited span.
//!
//! Resynchronization policy: an end delimiter that precedes the first start
//! delimiter means the link lost sync mid-frame, and the whole buffer is
//! dropped rather than trimmed up to the stray `<`.

use crate::constants::{DEFAULT_MAX_BUFFER_LEN, END_DELIMITER, START_DELIMITER};
use crate::error::TelemetryError;
use crate::types::Frame;
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "logging")]
use tracing::{debug, warn};

/// What the extractor is waiting for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractorState {
    /// No start delimiter buffered yet
    AwaitingStart,
    /// A start delimiter is buffered, its end delimiter has not arrived
    AwaitingEnd,
}

/// Extraction statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractorStats {
    /// Total bytes fed in
    pub bytes_received: usize,

    /// Number of frames emitted
    pub frames_extracted: usize,

    /// Number of end-before-start resets
    pub desyncs: usize,

    /// Number of chunks rejected as invalid text
    pub stream_errors: usize,

    /// Number of resets caused by the buffer limit
    pub overflows: usize,
}

/// Splits a continuous byte stream into delimited frames
#[derive(Debug, Clone)]
pub struct FrameExtractor {
    buffer: String,
    max_buffer_len: usize,
    stats: ExtractorStats,
}

impl Default for FrameExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameExtractor {
    /// Create an extractor with the default buffer limit
    pub fn new() -> Self {
        Self::with_max_buffer_len(DEFAULT_MAX_BUFFER_LEN)
    }

    /// Create an extractor that resets once more than `max_buffer_len`
    /// bytes are pending without forming a frame
    pub fn with_max_buffer_len(max_buffer_len: usize) -> Self {
        Self {
            buffer: String::new(),
            max_buffer_len,
            stats: ExtractorStats::default(),
        }
    }

    /// Append a chunk and extract every complete frame it finishes.
    ///
    /// Results come back in stream order: each element is either a frame or
    /// the framing error that caused buffered bytes to be thrown away.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<Result<Frame, TelemetryError>> {
        let mut results = Vec::new();
        self.stats.bytes_received += chunk.len();

        let text = match core::str::from_utf8(chunk) {
            Ok(text) => text,
            Err(e) => {
                #[cfg(feature = "logging")]
                warn!(
                    "Chunk of {} bytes is not valid text, dropping {} buffered bytes",
                    chunk.len(),
                    self.buffer.len()
                );

                self.buffer.clear();
                self.stats.stream_errors += 1;
                results.push(Err(TelemetryError::StreamDecode {
                    valid_up_to: e.valid_up_to(),
                }));
                return results;
            }
        };

        self.buffer.push_str(text);
        self.extract_into(&mut results);

        if self.buffer.len() > self.max_buffer_len {
            #[cfg(feature = "logging")]
            warn!(
                "Buffer overflow ({} bytes), discarding pending data",
                self.buffer.len()
            );

            results.push(Err(TelemetryError::BufferOverflow {
                len: self.buffer.len(),
                max: self.max_buffer_len,
            }));
            self.buffer.clear();
            self.stats.overflows += 1;
        }

        results
    }

    fn extract_into(&mut self, results: &mut Vec<Result<Frame, TelemetryError>>) {
        loop {
            let bytes = self.buffer.as_bytes();
            let (Some(start), Some(end)) = (
                memchr::memchr(START_DELIMITER, bytes),
                memchr::memchr(END_DELIMITER, bytes),
            ) else {
                return;
            };

            if end > start {
                // Both delimiters are ASCII, so these are char boundaries
                let frame = Frame::new(&self.buffer[start + 1..end]);
                self.buffer.drain(..=end);
                self.stats.frames_extracted += 1;

                #[cfg(feature = "logging")]
                debug!("Extracted frame of {} bytes", frame.payload().len());

                results.push(Ok(frame));
            } else {
                let discarded = self.buffer.len();

                #[cfg(feature = "logging")]
                warn!(
                    "End delimiter at {} precedes start at {}, resetting {} bytes",
                    end, start, discarded
                );

                self.buffer.clear();
                self.stats.desyncs += 1;
                results.push(Err(TelemetryError::FramingDesync { discarded }));
                return;
            }
        }
    }

    /// Current framing state, derived from the buffer
    pub fn state(&self) -> ExtractorState {
        if memchr::memchr(START_DELIMITER, self.buffer.as_bytes()).is_some() {
            ExtractorState::AwaitingEnd
        } else {
            ExtractorState::AwaitingStart
        }
    }

    /// Bytes received but not yet consumed
    pub fn buffered(&self) -> &str {
        &self.buffer
    }

    /// Number of pending bytes
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether nothing is pending
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Drop any pending bytes
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Configured buffer limit
    pub fn max_buffer_len(&self) -> usize {
        self.max_buffer_len
    }

    /// Statistics since construction
    pub fn stats(&self) -> &ExtractorStats {
        &self.stats
    }
}

/// Extract every frame from a complete capture, discarding framing errors
pub fn extract_all(data: &[u8]) -> Vec<Frame> {
    let mut extractor = FrameExtractor::with_max_buffer_len(usize::MAX);
    extractor
        .feed(data)
        .into_iter()
        .filter_map(Result::ok)
        .collect()
}
