//! Delivery sinks for decoded telemetry

use std::io::Write;
use std::time::Duration;

use sensorlink_core::{TelemetryDocument, TelemetryError, TelemetrySink};
use tracing::debug;

/// POSTs each document as JSON to an append-only HTTP(S) store
///
/// Blocking: the polling loop waits for the store to answer or time out.
pub struct HttpSink {
    agent: ureq::Agent,
    url: String,
}

impl HttpSink {
    pub fn new(url: &str, timeout: Duration) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();

        Self {
            agent,
            url: url.to_string(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl TelemetrySink for HttpSink {
    fn deliver(&mut self, document: &TelemetryDocument) -> Result<(), TelemetryError> {
        let json = serde_json::to_string(document)
            .map_err(|e| TelemetryError::Delivery(format!("Failed to serialize record: {e}")))?;

        let response = self
            .agent
            .post(self.url.as_str())
            .header("Content-Type", "application/json")
            .send(json.as_bytes())
            .map_err(|e| TelemetryError::Delivery(format!("POST {} failed: {e}", self.url)))?;

        if !response.status().is_success() {
            return Err(TelemetryError::Delivery(format!(
                "POST {} returned HTTP {}",
                self.url,
                response.status()
            )));
        }

        debug!("Record stored at {}", self.url);
        Ok(())
    }
}

/// Writes each document as one JSON line
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TelemetrySink for JsonLinesSink<W> {
    fn deliver(&mut self, document: &TelemetryDocument) -> Result<(), TelemetryError> {
        let json = serde_json::to_string(document)
            .map_err(|e| TelemetryError::Delivery(format!("Failed to serialize record: {e}")))?;
        writeln!(self.writer, "{json}")?;
        self.writer.flush()?;
        Ok(())
    }
}
