//! WAL Writer
//!
//! Frame encoding and append-only writes.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::error::{EmberError, Result};

use super::{WalRecord, LENGTH_PREFIX_SIZE};

/// Encode a record as one complete frame
///
/// Format: payload_len (4, big-endian) + payload
pub fn encode_frame(record: &WalRecord) -> Result<Vec<u8>> {
    let payload = record.encode()?;
    let len = u32::try_from(payload.len())
        .map_err(|_| EmberError::FrameTooLarge { len: payload.len() })?;

    let mut frame = Vec::with_capacity(LENGTH_PREFIX_SIZE + payload.len());
    frame.extend_from_slice(&len.to_be_bytes());
    frame.extend_from_slice(&payload);
    Ok(frame)
}

/// Write one frame to a stream, returning the bytes written
pub fn write_frame<W: Write>(writer: &mut W, record: &WalRecord) -> Result<usize> {
    let frame = encode_frame(record)?;
    writer.write_all(&frame)?;
    Ok(frame.len())
}

/// Appends frames to a WAL file
///
/// The file is opened in append mode, so frames already on disk are never
/// rewritten.
pub struct WalWriter {
    file: File,
    /// Offset at which the next frame will start
    offset: u64,
}

impl WalWriter {
    /// Open or create a WAL file
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let offset = file.metadata()?.len();

        tracing::debug!(path = %path.display(), offset, "opened WAL for append");

        Ok(Self { file, offset })
    }

    /// Append a record; returns the offset where its frame starts
    pub fn append(&mut self, record: &WalRecord) -> Result<u64> {
        let start = self.offset;
        let written = write_frame(&mut self.file, record)?;
        self.offset += written as u64;
        Ok(start)
    }

    /// Force appended frames to disk
    pub fn sync(&mut self) -> Result<()> {
        self.file.flush()?;
        self.file.sync_all()?;
        Ok(())
    }

    /// Offset at which the next frame will start
    pub fn offset(&self) -> u64 {
        self.offset
    }
}
