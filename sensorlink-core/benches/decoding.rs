use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use sensorlink_core::{
    decoder::decode_payload,
    encoder::SampleBuilder,
    reconstruct::{reconstruct, ManualClock},
    Pipeline, TelemetryDocument,
};

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decoding");

    let frame = SampleBuilder::new()
        .gas(512)
        .co2(1450)
        .accel(-200, 35, 16000)
        .position(19.432608, -99.133208)
        .encode();
    let payload = std::str::from_utf8(&frame[1..frame.len() - 3]).unwrap().to_string();

    group.bench_function("decode_payload", |b| {
        b.iter(|| {
            let fields = decode_payload(criterion::black_box(&payload)).unwrap();
            criterion::black_box(fields);
        });
    });

    let fields = decode_payload(&payload).unwrap();
    group.bench_function("reconstruct", |b| {
        b.iter(|| criterion::black_box(reconstruct(criterion::black_box(&fields), 0)));
    });

    group.throughput(Throughput::Bytes(frame.len() as u64));
    group.bench_function("pipeline_process", |b| {
        let clock = ManualClock::new(0);
        let mut sink: Vec<TelemetryDocument> = Vec::with_capacity(1024);
        b.iter(|| {
            sink.clear();
            let mut pipeline = Pipeline::new(&mut sink, &clock);
            criterion::black_box(pipeline.process(&frame));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_decode);
criterion_main!(benches);
