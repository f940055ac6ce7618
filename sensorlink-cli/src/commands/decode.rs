use anyhow::{Context, Result};
use colored::*;
use sensorlink_core::{reconstruct::ManualClock, Pipeline, TelemetryDocument};
use std::fs;
use std::io::{self, Read};
use tracing::info;

/// Replay a captured serial stream through the gateway pipeline.
///
/// Bytes are fed in pieces of about `chunk_size` to mimic serial reads,
/// never splitting a UTF-8 sequence. Replayed records carry `uptime_ms = 0`:
/// a capture has no gateway uptime.
pub fn execute(
    input: &str,
    output: Option<&str>,
    stats_only: bool,
    chunk_size: usize,
) -> Result<()> {
    info!("Decoding capture: {}", input);

    // Read input file or stdin
    let data = if input == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        buf
    } else {
        fs::read(input).with_context(|| format!("Failed to read input file: {}", input))?
    };

    info!("Capture size: {} bytes", data.len());

    let mut pipeline = Pipeline::new(Vec::<TelemetryDocument>::new(), ManualClock::new(0));
    for chunk in replay_chunks(&data, chunk_size) {
        pipeline.process(chunk);
    }

    let stats = pipeline.stats();

    println!("\n=== Decode Results ===");
    println!("Bytes scanned:     {} bytes", stats.extractor.bytes_received);
    println!("Frames found:      {}", stats.extractor.frames_extracted);
    println!("Records decoded:   {}", stats.records_delivered);
    println!("Malformed frames:  {}", stats.malformed_frames);
    println!("Corrupt frames:    {}", stats.corrupt_frames);
    println!("Desync resets:     {}", stats.extractor.desyncs);
    println!("Success rate:      {:.2}%", stats.success_rate());
    println!();

    if stats.records_delivered == 0 {
        println!("{} No valid records found", "✗".red());
    } else {
        println!("{} {} records recovered", "✓".green(), stats.records_delivered);
    }

    if stats_only {
        return Ok(());
    }

    let records = pipeline.into_sink();

    if let Some(output_path) = output {
        let json = serde_json::to_string_pretty(&records)
            .with_context(|| "Failed to serialize decoded records")?;

        fs::write(output_path, json)
            .with_context(|| format!("Failed to write output file: {}", output_path))?;

        info!("Decoded records written to: {}", output_path);
    } else {
        println!("=== Records ===");
        for (i, record) in records.iter().enumerate() {
            println!(
                "#{:<4} gas={:<5} co2={:<5} accel=({:+.3}, {:+.3}, {:+.3}) g  pos=({:.6}, {:.6})",
                i,
                record.gas,
                record.co2,
                record.acceleration.x,
                record.acceleration.y,
                record.acceleration.z,
                record.location.latitude,
                record.location.longitude
            );
        }
    }

    Ok(())
}

/// Split a capture into reads of at least `chunk_size` bytes, extending a
/// read past any UTF-8 continuation bytes so no character is cut in half
fn replay_chunks(data: &[u8], chunk_size: usize) -> impl Iterator<Item = &[u8]> {
    let chunk_size = chunk_size.max(1);
    let mut rest = data;

    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }

        let mut end = chunk_size.min(rest.len());
        // Continuation bytes are 0b10xx_xxxx
        while end < rest.len() && rest[end] & 0xC0 == 0x80 {
            end += 1;
        }

        let (chunk, tail) = rest.split_at(end);
        rest = tail;
        Some(chunk)
    })
}
