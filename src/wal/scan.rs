//! WAL Scan
//!
//! Drains a reader into a complete result for inspection.

use std::io::Read;
use std::path::Path;

use crate::error::Result;

use super::{StopReason, WalReader, WalRecord};

/// Everything a reader produced, plus why it stopped
#[derive(Debug, Clone, PartialEq)]
pub struct WalScan {
    /// Records decoded before the stop, in stream order
    pub records: Vec<WalRecord>,

    pub stop: StopReason,
}

impl WalScan {
    /// True when the stream ended cleanly, truncated tail included
    pub fn is_clean(&self) -> bool {
        !self.stop.is_error()
    }
}

/// Read every record from `source`
///
/// Malformed frames and I/O failures are captured in `stop` rather than
/// returned, so the records before them stay available.
pub fn scan<R: Read>(source: R) -> WalScan {
    drain(WalReader::new(source))
}

/// Open and scan a WAL file
///
/// Only failing to open the file is an error.
pub fn read_wal(path: &Path) -> Result<WalScan> {
    let scanned = drain(WalReader::open(path)?);
    tracing::debug!(
        path = %path.display(),
        records = scanned.records.len(),
        stop = ?scanned.stop,
        "scanned WAL"
    );
    Ok(scanned)
}

fn drain<R: Read>(mut reader: WalReader<R>) -> WalScan {
    let mut records = Vec::new();

    // Err is already recorded as the reader's stop reason
    while let Ok(Some(record)) = reader.next_record() {
        records.push(record);
    }

    let stop = reader
        .stop_reason()
        .cloned()
        .unwrap_or(StopReason::EndOfStream);

    WalScan { records, stop }
}
