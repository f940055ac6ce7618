use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sensorlink_core::{
    encoder::SampleBuilder,
    extractor::{extract_all, FrameExtractor},
};

fn make_stream(num_frames: usize) -> Vec<u8> {
    let mut stream = Vec::new();
    for i in 0..num_frames {
        let frame = SampleBuilder::new()
            .gas(i as u16)
            .co2(400 + (i % 800) as u16)
            .accel(-12, 40, 16300)
            .position(19.432608, -99.133208)
            .encode();
        stream.extend_from_slice(&frame);
        if i % 10 == 0 {
            // inject a debug line periodically, as the node does
            stream.extend_from_slice(b"Gas: 300 | CO2: 400\r\n");
        }
    }
    stream
}

fn bench_extractor(c: &mut Criterion) {
    let mut group = c.benchmark_group("extractor");
    let stream = make_stream(500);
    group.throughput(Throughput::Bytes(stream.len() as u64));

    group.bench_function("extract_all", |b| {
        b.iter(|| {
            let res = extract_all(&stream);
            criterion::black_box(res);
        });
    });

    for &chunk_len in &[1usize, 32, 256] {
        group.bench_with_input(
            BenchmarkId::new("feed_chunked", chunk_len),
            &stream,
            |b, data| {
                b.iter(|| {
                    let mut extractor = FrameExtractor::new();
                    for chunk in data.chunks(chunk_len) {
                        criterion::black_box(extractor.feed(chunk));
                    }
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_extractor);
criterion_main!(benches);
