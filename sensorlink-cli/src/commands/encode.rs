use anyhow::{Context, Result};
use sensorlink_core::{encoder::encode_sample, SensorSample};
use std::fs;
use tracing::info;

/// Encode a JSON array of raw samples into the masked wire format, the way
/// the node writes them to its serial port.
pub fn execute(input: &str, output: &str) -> Result<()> {
    info!("Encoding samples from {} to {}", input, output);

    let content = fs::read_to_string(input)
        .with_context(|| format!("Failed to read input file: {}", input))?;

    let samples: Vec<SensorSample> =
        serde_json::from_str(&content).with_context(|| "Failed to parse JSON samples")?;

    info!("Found {} samples to encode", samples.len());

    let mut output_data = Vec::new();
    for (i, sample) in samples.iter().enumerate() {
        let frame = encode_sample(sample);
        output_data.extend_from_slice(&frame);
        info!("Encoded sample {} ({} bytes)", i, frame.len());
    }

    fs::write(output, &output_data)
        .with_context(|| format!("Failed to write output file: {}", output))?;

    info!(
        "Successfully encoded {} frames ({} bytes total)",
        samples.len(),
        output_data.len()
    );

    Ok(())
}
