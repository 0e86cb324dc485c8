//! Chunk codec
//!
//! Decoding and encoding of chunk snapshot documents.
//!
//! ## Document Shape
//! ```text
//! {
//!   "start_time": i64,
//!   "end_time": i64,
//!   "records": { "<metric>": [ {"timestamp": i64, "value": f64}, ... ], ... },
//!   "metadata": {
//!     "created_at": i64, "last_access": i64,
//!     "compression_ratio": f64, "record_count": u64
//!   },
//!   "compression_state": "<tag>"
//! }
//! ```
//!
//! Unknown fields are ignored. Metric and point order are preserved in both
//! directions.

use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::Path;

use indexmap::IndexMap;
use serde_json::Value;

use crate::document::Fields;
use crate::error::{EmberError, Result};

use super::{ChunkMetadata, ChunkSnapshot, DataPoint};

// =============================================================================
// Decoding
// =============================================================================

/// Decode a chunk document
///
/// All fields are required. Fails with `MissingField` / `TypeMismatch`
/// naming the field's logical path; no partial snapshot is returned.
pub fn decode(bytes: &[u8]) -> Result<ChunkSnapshot> {
    let document = Fields::parse(bytes)?;
    let root = Fields::root(&document)?;

    let start_time = root.i64("start_time")?;
    let end_time = root.i64("end_time")?;
    let compression_state = root.str("compression_state")?.to_string();

    let meta = root.object("metadata")?;
    let metadata = ChunkMetadata {
        created_at: meta.i64("created_at")?,
        last_access: meta.i64("last_access")?,
        compression_ratio: meta.f64("compression_ratio")?,
        record_count: meta.u64("record_count")?,
    };

    let records = decode_records(&root.object("records")?)?;

    Ok(ChunkSnapshot {
        start_time,
        end_time,
        records,
        metadata,
        compression_state,
    })
}

/// Decode the `records` mapping, keeping document order
fn decode_records(records: &Fields<'_>) -> Result<IndexMap<String, Vec<DataPoint>>> {
    let mut decoded = IndexMap::new();

    for (metric, series) in records.entries() {
        let path = records.child_path(metric);
        let items = series
            .as_array()
            .ok_or_else(|| EmberError::mismatch(path.clone(), "array"))?;

        let points = items
            .iter()
            .enumerate()
            .map(|(index, item)| decode_point(item, format!("{}[{}]", path, index)))
            .collect::<Result<Vec<_>>>()?;

        decoded.insert(metric.clone(), points);
    }

    Ok(decoded)
}

fn decode_point(item: &Value, path: String) -> Result<DataPoint> {
    let point = Fields::nested(item, path)?;
    Ok(DataPoint {
        timestamp: point.i64("timestamp")?,
        value: point.f64("value")?,
    })
}

// =============================================================================
// Encoding
// =============================================================================

/// Encode a snapshot back into its document form
///
/// Non-finite reals have no JSON form and are rejected with the path of
/// the first one found.
pub fn encode(snapshot: &ChunkSnapshot) -> Result<Vec<u8>> {
    ensure_finite(snapshot)?;
    serde_json::to_vec(snapshot).map_err(|e| EmberError::Serialization(e.to_string()))
}

fn ensure_finite(snapshot: &ChunkSnapshot) -> Result<()> {
    if !snapshot.metadata.compression_ratio.is_finite() {
        return Err(EmberError::NonFiniteValue {
            path: "metadata.compression_ratio".to_string(),
        });
    }

    for (metric, points) in &snapshot.records {
        if let Some(index) = points.iter().position(|p| !p.value.is_finite()) {
            return Err(EmberError::NonFiniteValue {
                path: format!("records.{}[{}].value", metric, index),
            });
        }
    }

    Ok(())
}

// =============================================================================
// File helpers
// =============================================================================

/// Read and decode one chunk file
///
/// The file handle lives only for the duration of the call.
pub fn read_chunk(path: &Path) -> Result<ChunkSnapshot> {
    let mut bytes = Vec::new();
    BufReader::new(File::open(path)?).read_to_end(&mut bytes)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "decoding chunk");
    decode(&bytes)
}

/// Encode a snapshot and write it as a whole file
pub fn write_chunk(path: &Path, snapshot: &ChunkSnapshot) -> Result<()> {
    let bytes = encode(snapshot)?;
    fs::write(path, bytes)?;
    Ok(())
}
