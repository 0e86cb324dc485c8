//! WAL record definitions
//!
//! Defines the record carried by each WAL frame and its payload encoding.

use serde::Serialize;

use crate::document::Fields;
use crate::error::{EmberError, Result};

/// A single pending write in the WAL
///
/// Field order is the payload's field order on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalRecord {
    /// Series the write belongs to
    pub metric_name: String,

    /// Unix timestamp (seconds)
    pub timestamp: i64,

    pub value: f64,
}

impl WalRecord {
    pub fn new(metric_name: impl Into<String>, timestamp: i64, value: f64) -> Self {
        Self {
            metric_name: metric_name.into(),
            timestamp,
            value,
        }
    }

    /// Encode into a frame payload (no length prefix)
    pub fn encode(&self) -> Result<Vec<u8>> {
        if !self.value.is_finite() {
            return Err(EmberError::NonFiniteValue {
                path: "value".to_string(),
            });
        }
        serde_json::to_vec(self).map_err(|e| EmberError::Serialization(e.to_string()))
    }

    /// Decode a frame payload
    ///
    /// Errors are document-level (`MalformedDocument`, `MissingField`,
    /// `TypeMismatch`); the reader wraps them with the frame offset.
    pub fn decode(payload: &[u8]) -> Result<Self> {
        let document = Fields::parse(payload)?;
        let fields = Fields::root(&document)?;

        Ok(Self {
            metric_name: fields.str("metric_name")?.to_string(),
            timestamp: fields.i64("timestamp")?,
            value: fields.f64("value")?,
        })
    }
}
