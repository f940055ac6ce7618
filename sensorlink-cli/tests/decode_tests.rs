use std::fs;
use tempfile::tempdir;

use sensorlink_cli::commands::decode;
use sensorlink_core::encoder::SampleBuilder;

/// Helper: capture of `count` frames with node debug output in between
fn create_capture(count: u16) -> Vec<u8> {
    let mut data = b"LOG: Sistema Iniciado.\r\n".to_vec();
    for i in 0..count {
        data.extend_from_slice(b"\n--- MONITOR ---\r\n");
        let frame = SampleBuilder::new()
            .gas(300 + i)
            .co2(400 + i)
            .accel(0, 0, 16384)
            .position(19.432608, -99.133208)
            .encode();
        data.extend_from_slice(&frame);
    }
    data
}

/// Helper: capture as the node prints it, monitor block before every frame
fn create_node_capture(count: u16) -> Vec<u8> {
    let mut data = b"LOG: Sistema Iniciado.\r\n".to_vec();
    for i in 0..count {
        let monitor = format!(
            "\n--- MONITOR (Depuraci\u{f3}n) ---\r\n\
             Gas: {} | CO2: {}\r\n\
             Mov X: -12 | GPS Lat: 19.432608, Lon: -99.133208\r\n",
            300 + i,
            400 + i
        );
        data.extend_from_slice(monitor.as_bytes());
        let frame = SampleBuilder::new()
            .gas(300 + i)
            .co2(400 + i)
            .accel(-12, 0, 16384)
            .position(19.432608, -99.133208)
            .encode();
        data.extend_from_slice(&frame);
    }
    data
}

#[test]
fn test_decode_node_capture_any_chunk_size() {
    let td = tempdir().unwrap();
    let input_path = td.path().join("capture.bin");
    let capture = create_node_capture(20);
    fs::write(&input_path, &capture).unwrap();

    for chunk_size in (1..=96).chain([capture.len()]) {
        let output_path = td.path().join("records.json");
        decode::execute(
            input_path.to_str().unwrap(),
            Some(output_path.to_str().unwrap()),
            false,
            chunk_size,
        )
        .unwrap();

        let records: Vec<serde_json::Value> =
            serde_json::from_str(&fs::read_to_string(&output_path).unwrap()).unwrap();
        assert_eq!(records.len(), 20, "chunk_size={chunk_size}");
        assert_eq!(records[19]["gas"], 319, "chunk_size={chunk_size}");
    }
}

#[test]
fn test_decode_basic_capture() {
    let td = tempdir().unwrap();
    let input_path = td.path().join("capture.bin");
    let output_path = td.path().join("records.json");

    fs::write(&input_path, create_capture(3)).unwrap();

    decode::execute(
        input_path.to_str().unwrap(),
        Some(output_path.to_str().unwrap()),
        false,
        64,
    )
    .unwrap();

    let output_json = fs::read_to_string(&output_path).unwrap();
    let records: Vec<serde_json::Value> = serde_json::from_str(&output_json).unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["gas"], 300);
    assert_eq!(records[2]["co2"], 402);
    assert_eq!(records[1]["acelerometro"]["z"], 1.0);
    assert_eq!(records[0]["uptime_ms"], 0);
}

#[test]
fn test_decode_chunk_size_does_not_matter() {
    let td = tempdir().unwrap();
    let input_path = td.path().join("capture.bin");
    fs::write(&input_path, create_capture(4)).unwrap();

    let mut outputs = Vec::new();
    for chunk_size in [1usize, 5, 4096] {
        let output_path = td.path().join(format!("out_{chunk_size}.json"));
        decode::execute(
            input_path.to_str().unwrap(),
            Some(output_path.to_str().unwrap()),
            false,
            chunk_size,
        )
        .unwrap();
        outputs.push(fs::read_to_string(&output_path).unwrap());
    }

    assert_eq!(outputs[0], outputs[1]);
    assert_eq!(outputs[1], outputs[2]);
}

#[test]
fn test_decode_skips_damaged_frames() {
    let td = tempdir().unwrap();
    let input_path = td.path().join("damaged.bin");
    let output_path = td.path().join("records.json");

    let mut data = Vec::new();
    data.extend_from_slice(&SampleBuilder::new().gas(1).encode());
    data.extend_from_slice(b">1,2,3<\r\n");
    data.extend_from_slice(b">43691,xx,61680,3855,42405,21845,43690,59367,6168<\r\n");
    data.extend_from_slice(&SampleBuilder::new().gas(2).encode());
    fs::write(&input_path, data).unwrap();

    decode::execute(
        input_path.to_str().unwrap(),
        Some(output_path.to_str().unwrap()),
        false,
        64,
    )
    .unwrap();

    let records: Vec<serde_json::Value> =
        serde_json::from_str(&fs::read_to_string(&output_path).unwrap()).unwrap();
    let gases: Vec<u64> = records.iter().map(|r| r["gas"].as_u64().unwrap()).collect();
    assert_eq!(gases, vec![1, 2]);
}

#[test]
fn test_decode_stats_only_writes_nothing() {
    let td = tempdir().unwrap();
    let input_path = td.path().join("capture.bin");
    let output_path = td.path().join("records.json");
    fs::write(&input_path, create_capture(2)).unwrap();

    decode::execute(
        input_path.to_str().unwrap(),
        Some(output_path.to_str().unwrap()),
        true,
        64,
    )
    .unwrap();

    assert!(!output_path.exists());
}

#[test]
fn test_decode_missing_input_fails() {
    let td = tempdir().unwrap();
    let result = decode::execute(
        td.path().join("nope.bin").to_str().unwrap(),
        None,
        false,
        64,
    );
    assert!(result.is_err());
}
