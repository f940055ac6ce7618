//! Noisy link example: random corruption and how the gateway resynchronizes

use rand::Rng;
use sensorlink_core::{
    encoder::SampleBuilder, reconstruct::ManualClock, Pipeline, TelemetryDocument,
};

const NOISE: &[u8] = b"<>,x9 ";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Sensorlink Noisy Link Example\n");

    let mut rng = rand::thread_rng();

    let mut wire = Vec::new();
    for i in 0..50u16 {
        let mut frame = SampleBuilder::new()
            .gas(i)
            .co2(400)
            .accel(0, 0, 16384)
            .position(-33.45, -70.66)
            .encode()
            .to_vec();

        // One frame in five gets a byte flipped to line noise
        if rng.gen_ratio(1, 5) {
            let pos = rng.gen_range(0..frame.len());
            frame[pos] = NOISE[rng.gen_range(0..NOISE.len())];
        }
        wire.extend_from_slice(&frame);
    }

    println!("Stream: {} bytes", wire.len());

    let mut pipeline = Pipeline::new(Vec::<TelemetryDocument>::new(), ManualClock::new(0));
    for chunk in wire.chunks(rng.gen_range(1..=64)) {
        pipeline.process(chunk);
    }

    let stats = pipeline.stats();
    println!("Frames extracted:  {}", stats.extractor.frames_extracted);
    println!("Desync resets:     {}", stats.extractor.desyncs);
    println!("Malformed frames:  {}", stats.malformed_frames);
    println!("Corrupt frames:    {}", stats.corrupt_frames);
    println!("Records delivered: {}", stats.records_delivered);

    let gases: Vec<u16> = pipeline.sink().iter().map(|d| d.gas).collect();
    println!("\nSurviving sample ids: {:?}", gases);

    Ok(())
}
