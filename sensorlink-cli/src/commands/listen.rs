use std::path::Path;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Result};
use sensorlink_core::{
    extractor::FrameExtractor,
    reconstruct::{Clock, MonotonicClock},
    Pipeline, PipelineStats, TelemetrySink,
};
use tracing::{debug, info, warn};

use crate::config::GatewayConfig;
use crate::serial::{ByteReader, SerialReader};
use crate::sink::{HttpSink, JsonLinesSink};

/// Command-line overrides applied on top of the config file
#[derive(Debug, Clone, Default)]
pub struct ListenOverrides {
    pub port: Option<String>,
    pub baud: Option<u32>,
    pub url: Option<String>,
    pub stdout: bool,
    /// Stop after this many decoded records (0 = run forever)
    pub count: u64,
}

/// Loop tuning for [`run_receiver`]
#[derive(Debug, Clone, Copy)]
pub struct LoopOptions {
    pub idle_sleep: Duration,
    pub read_buffer_len: usize,
    pub max_records: u64,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            idle_sleep: Duration::from_millis(10),
            read_buffer_len: 256,
            max_records: 0,
        }
    }
}

pub fn execute(config_path: &Path, overrides: ListenOverrides) -> Result<()> {
    let mut config = if config_path.exists() {
        info!(path = %config_path.display(), "Loading configuration");
        GatewayConfig::load(config_path)?
    } else {
        info!("No configuration file found, using defaults");
        GatewayConfig::default()
    };
    apply_overrides(&mut config, &overrides);

    let sink: Box<dyn TelemetrySink> = if overrides.stdout {
        info!("Writing records to stdout");
        Box::new(JsonLinesSink::new(std::io::stdout()))
    } else if let Some(url) = config.delivery.url.as_deref() {
        let sink = HttpSink::new(url, config.delivery_timeout());
        info!("Delivering records to {}", sink.url());
        Box::new(sink)
    } else {
        bail!("No delivery URL configured; set [delivery] url, pass --url, or use --stdout");
    };

    let mut reader = SerialReader::open(
        &config.serial.port,
        config.serial.baud_rate,
        config.read_timeout(),
    )?;

    let extractor = FrameExtractor::with_max_buffer_len(config.extractor.max_buffer_len);
    debug!("Frame buffer limit: {} bytes", extractor.max_buffer_len());
    let mut pipeline = Pipeline::with_extractor(extractor, sink, MonotonicClock::new());

    let options = LoopOptions {
        idle_sleep: config.idle_sleep(),
        max_records: overrides.count,
        ..Default::default()
    };

    let stats = run_receiver(&mut reader, &mut pipeline, &options);
    report(&stats);
    Ok(())
}

pub fn apply_overrides(config: &mut GatewayConfig, overrides: &ListenOverrides) {
    if let Some(port) = &overrides.port {
        config.serial.port = port.clone();
    }
    if let Some(baud) = overrides.baud {
        config.serial.baud_rate = baud;
    }
    if let Some(url) = &overrides.url {
        config.delivery.url = Some(url.clone());
    }
}

/// Poll `reader` and push everything it yields through `pipeline`.
///
/// Never fails: read errors drop the partial frame and polling resumes. The
/// loop only returns when the reader is exhausted or `max_records` decoded
/// records (delivered or dropped) have been seen.
pub fn run_receiver<R, S, C>(
    reader: &mut R,
    pipeline: &mut Pipeline<S, C>,
    options: &LoopOptions,
) -> PipelineStats
where
    R: ByteReader,
    S: TelemetrySink,
    C: Clock,
{
    info!("Starting telemetry receiver...");

    let mut read_buffer = vec![0u8; options.read_buffer_len.max(1)];

    loop {
        match reader.read_bytes(&mut read_buffer) {
            Ok(Some(bytes_read)) if bytes_read > 0 => {
                debug!("Read {bytes_read} bytes");
                pipeline.process(&read_buffer[..bytes_read]);

                if options.max_records > 0
                    && pipeline.stats().records_built() as u64 >= options.max_records
                {
                    info!("Reached record limit ({})", options.max_records);
                    return pipeline.stats();
                }
            }
            Ok(Some(_)) => {
                // No data, brief sleep to avoid busy-wait
                thread::sleep(options.idle_sleep);
            }
            Ok(None) => {
                info!("Input exhausted");
                return pipeline.stats();
            }
            Err(e) => {
                warn!("Serial read failed: {e}; dropping partial frame");
                pipeline.reset();
                thread::sleep(options.idle_sleep);
            }
        }
    }
}

fn report(stats: &PipelineStats) {
    info!("=== Final Statistics ===");
    info!("Bytes received: {}", stats.extractor.bytes_received);
    info!("Frames extracted: {}", stats.extractor.frames_extracted);
    info!(
        "Records delivered: {} ({} dropped on delivery)",
        stats.records_delivered, stats.delivery_failures
    );
    info!(
        "Dropped frames: malformed={}, corrupt={}",
        stats.malformed_frames, stats.corrupt_frames
    );
    info!(
        "Stream resets: desync={}, invalid text={}, overflow={}",
        stats.extractor.desyncs, stats.extractor.stream_errors, stats.extractor.overflows
    );
}
