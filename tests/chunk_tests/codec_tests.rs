//! Tests for the chunk codec
//!
//! These tests verify:
//! - Decoding complete documents
//! - Missing fields and type mismatches name the exact field path
//! - Empty record sets are valid
//! - No cross-field validation on decode
//! - File read/write helpers

use ember_inspect::chunk::{
    decode, encode, read_chunk, write_chunk, ChunkMetadata, ChunkSnapshot, DataPoint,
};
use ember_inspect::EmberError;
use indexmap::IndexMap;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn document() -> serde_json::Value {
    serde_json::json!({
        "start_time": 1700000000,
        "end_time": 1700003599,
        "records": {
            "cpu": [
                {"timestamp": 1700000000, "value": 0.42},
                {"timestamp": 1700000060, "value": 0.57}
            ],
            "mem": [
                {"timestamp": 1700000030, "value": 2048.0}
            ]
        },
        "metadata": {
            "created_at": 1700000000,
            "last_access": 1700001000,
            "compression_ratio": 1.0,
            "record_count": 3
        },
        "compression_state": "raw"
    })
}

fn decode_value(value: &serde_json::Value) -> ember_inspect::Result<ChunkSnapshot> {
    decode(&serde_json::to_vec(value).unwrap())
}

fn remove(value: &mut serde_json::Value, path: &[&str]) {
    let (last, parents) = path.split_last().unwrap();
    let mut target = value;
    for key in parents {
        target = target.get_mut(*key).unwrap();
    }
    target.as_object_mut().unwrap().remove(*last);
}

fn assert_missing(path: &[&str], expected: &str) {
    let mut doc = document();
    remove(&mut doc, path);
    match decode_value(&doc) {
        Err(EmberError::MissingField { path }) => assert_eq!(path, expected),
        other => panic!("Expected MissingField({}), got {:?}", expected, other),
    }
}

// =============================================================================
// Decoding Tests
// =============================================================================

#[test]
fn test_decode_complete_document() {
    let chunk = decode_value(&document()).unwrap();

    assert_eq!(chunk.start_time, 1700000000);
    assert_eq!(chunk.end_time, 1700003599);
    assert_eq!(chunk.compression_state, "raw");
    assert_eq!(
        chunk.metadata,
        ChunkMetadata {
            created_at: 1700000000,
            last_access: 1700001000,
            compression_ratio: 1.0,
            record_count: 3,
        }
    );
    assert_eq!(
        chunk.points("cpu").unwrap(),
        &[DataPoint::new(1700000000, 0.42), DataPoint::new(1700000060, 0.57)]
    );
    assert_eq!(chunk.total_points(), 3);
}

#[test]
fn test_decode_empty_records() {
    let mut doc = document();
    doc["records"] = serde_json::json!({});
    doc["metadata"]["record_count"] = serde_json::json!(0);

    let chunk = decode_value(&doc).unwrap();
    assert!(chunk.records.is_empty());
}

#[test]
fn test_decode_metric_with_empty_sequence() {
    let mut doc = document();
    doc["records"]["disk"] = serde_json::json!([]);

    let chunk = decode_value(&doc).unwrap();
    assert_eq!(chunk.points("disk").unwrap().len(), 0);
    assert_eq!(chunk.metric_names().last(), Some("disk"));
}

#[test]
fn test_decode_does_not_validate_cross_fields() {
    let mut doc = document();
    doc["start_time"] = serde_json::json!(1800000000);
    doc["metadata"]["record_count"] = serde_json::json!(999);

    let chunk = decode_value(&doc).unwrap();
    assert_eq!(chunk.metadata.record_count, 999);
    assert!(!chunk.check_consistency().is_empty());
}

#[test]
fn test_decode_opaque_compression_state() {
    let mut doc = document();
    doc["compression_state"] = serde_json::json!("zstd-experimental");

    let chunk = decode_value(&doc).unwrap();
    assert_eq!(chunk.compression_state, "zstd-experimental");
}

// =============================================================================
// Missing Field Tests
// =============================================================================

#[test]
fn test_missing_record_count() {
    assert_missing(&["metadata", "record_count"], "metadata.record_count");
}

#[test]
fn test_missing_top_level_fields() {
    assert_missing(&["start_time"], "start_time");
    assert_missing(&["end_time"], "end_time");
    assert_missing(&["compression_state"], "compression_state");
    assert_missing(&["metadata"], "metadata");
    assert_missing(&["records"], "records");
}

#[test]
fn test_missing_metadata_fields() {
    assert_missing(&["metadata", "created_at"], "metadata.created_at");
    assert_missing(&["metadata", "last_access"], "metadata.last_access");
    assert_missing(&["metadata", "compression_ratio"], "metadata.compression_ratio");
}

#[test]
fn test_missing_point_field() {
    let mut doc = document();
    doc["records"]["cpu"][1].as_object_mut().unwrap().remove("value");

    match decode_value(&doc) {
        Err(EmberError::MissingField { path }) => assert_eq!(path, "records.cpu[1].value"),
        other => panic!("Expected MissingField, got {:?}", other),
    }
}

// =============================================================================
// Type Mismatch Tests
// =============================================================================

#[test]
fn test_string_timestamp_is_type_mismatch() {
    let mut doc = document();
    doc["start_time"] = serde_json::json!("yesterday");

    match decode_value(&doc) {
        Err(EmberError::TypeMismatch { path, expected }) => {
            assert_eq!(path, "start_time");
            assert_eq!(expected, "integer");
        }
        other => panic!("Expected TypeMismatch, got {:?}", other),
    }
}

#[test]
fn test_negative_record_count_is_type_mismatch() {
    let mut doc = document();
    doc["metadata"]["record_count"] = serde_json::json!(-1);

    assert!(matches!(
        decode_value(&doc),
        Err(EmberError::TypeMismatch { ref path, .. }) if path == "metadata.record_count"
    ));
}

#[test]
fn test_fractional_timestamp_is_type_mismatch() {
    let mut doc = document();
    doc["records"]["mem"][0]["timestamp"] = serde_json::json!(1700000030.5);

    assert!(matches!(
        decode_value(&doc),
        Err(EmberError::TypeMismatch { ref path, .. }) if path == "records.mem[0].timestamp"
    ));
}

#[test]
fn test_null_value_is_type_mismatch() {
    let mut doc = document();
    doc["records"]["cpu"][0]["value"] = serde_json::Value::Null;

    assert!(matches!(
        decode_value(&doc),
        Err(EmberError::TypeMismatch { expected: "number", .. })
    ));
}

#[test]
fn test_records_not_a_map() {
    let mut doc = document();
    doc["records"] = serde_json::json!([]);

    assert!(matches!(
        decode_value(&doc),
        Err(EmberError::TypeMismatch { ref path, expected: "object" }) if path == "records"
    ));
}

#[test]
fn test_not_a_document() {
    assert!(matches!(
        decode(b"\x00\x01 definitely not json"),
        Err(EmberError::MalformedDocument(_))
    ));
    assert!(matches!(decode(b""), Err(EmberError::MalformedDocument(_))));
}

// =============================================================================
// Encoding / File Tests
// =============================================================================

#[test]
fn test_encode_then_decode_preserves_order() {
    let mut records = IndexMap::new();
    records.insert(
        "zeta".to_string(),
        vec![DataPoint::new(30, 3.0), DataPoint::new(10, 1.0)],
    );
    records.insert("alpha".to_string(), vec![]);
    records.insert("mid".to_string(), vec![DataPoint::new(20, 2.5)]);

    let chunk = ChunkSnapshot {
        start_time: 0,
        end_time: 100,
        records,
        metadata: ChunkMetadata {
            created_at: 1,
            last_access: 2,
            compression_ratio: 0.75,
            record_count: 3,
        },
        compression_state: "compressed".to_string(),
    };

    let decoded = decode(&encode(&chunk).unwrap()).unwrap();

    assert_eq!(decoded, chunk);
    assert_eq!(
        decoded.metric_names().collect::<Vec<_>>(),
        vec!["zeta", "alpha", "mid"]
    );
    assert_eq!(decoded.points("zeta").unwrap()[0].timestamp, 30);
}

#[test]
fn test_write_and_read_chunk_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("000001.chunk");

    let chunk = decode_value(&document()).unwrap();
    write_chunk(&path, &chunk).unwrap();

    assert_eq!(read_chunk(&path).unwrap(), chunk);
}

#[test]
fn test_read_missing_chunk_file() {
    let temp = TempDir::new().unwrap();
    let result = read_chunk(&temp.path().join("absent.chunk"));
    assert!(matches!(result, Err(EmberError::Io(_))));
}
