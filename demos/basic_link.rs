//! Basic link example: node-side encoding through gateway-side decoding

use sensorlink_core::{
    encoder::SampleBuilder, reconstruct::ManualClock, Pipeline, TelemetryDocument,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Sensorlink Basic Link Example\n");

    // What the node writes to its serial port, once per second
    let mut wire = Vec::new();
    wire.extend_from_slice(b"LOG: Sistema Iniciado.\r\n");

    for i in 0..5u16 {
        let frame = SampleBuilder::new()
            .gas(300 + i * 7)
            .co2(410 + i)
            .accel(-120, 45, 16384)
            .position(19.432608 + f64::from(i) * 1e-5, -99.133208)
            .encode();

        println!("Node frame {}: {}", i, String::from_utf8_lossy(&frame).trim_end());
        wire.extend_from_slice(&frame);
    }

    // Gateway side: a 1 s clock tick per serial read
    let clock = ManualClock::new(0);
    let mut pipeline = Pipeline::new(Vec::<TelemetryDocument>::new(), &clock);

    for chunk in wire.chunks(48) {
        clock.advance(1000);
        pipeline.process(chunk);
    }

    println!("\nDecoded records:");
    for document in pipeline.sink() {
        println!("  {}", serde_json::to_string(document)?);
    }

    let stats = pipeline.stats();
    println!(
        "\n{} frames, {} records delivered ({:.1}%)",
        stats.extractor.frames_extracted,
        stats.records_delivered,
        stats.success_rate()
    );

    Ok(())
}
