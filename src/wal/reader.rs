//! WAL Reader
//!
//! Lazily decodes frames from a forward-only byte source.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::iter::FusedIterator;
use std::path::Path;

use crate::error::{EmberError, Result};

use super::{WalRecord, LENGTH_PREFIX_SIZE};

/// Why a reader stopped producing records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The stream ended exactly on a frame boundary
    EndOfStream,

    /// The stream ended inside a length prefix or payload; the partial
    /// frame starting at `offset` was dropped
    TruncatedTail { offset: u64, available: u64 },

    /// The complete frame at `offset` did not hold a valid record
    Malformed { offset: u64, reason: String },

    /// The byte source itself failed while reading the frame at `offset`
    ReadFailed { offset: u64, reason: String },
}

impl StopReason {
    /// True for the stops that surface an error to the caller
    pub fn is_error(&self) -> bool {
        matches!(self, StopReason::Malformed { .. } | StopReason::ReadFailed { .. })
    }
}

/// Reads records from a WAL stream
///
/// The reader is a non-restartable iterator: once it stops (clean end,
/// truncated tail, malformed frame or I/O failure) it yields nothing more.
/// A malformed frame is yielded once as `Err(MalformedRecord)`; truncation
/// at the tail is silent.
pub struct WalReader<R> {
    source: R,
    /// Offset of the next unread frame
    offset: u64,
    stop: Option<StopReason>,
}

impl WalReader<BufReader<File>> {
    /// Open a WAL file for reading
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        tracing::debug!(path = %path.display(), "opened WAL");
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: Read> WalReader<R> {
    /// Wrap an already-open byte source positioned at a frame boundary
    pub fn new(source: R) -> Self {
        Self {
            source,
            offset: 0,
            stop: None,
        }
    }

    /// Byte offset of the next unread frame
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Why the reader stopped, once it has
    pub fn stop_reason(&self) -> Option<&StopReason> {
        self.stop.as_ref()
    }

    /// Read the next record
    ///
    /// Returns:
    /// - `Ok(Some(record))`: a complete, valid frame
    /// - `Ok(None)`: end of stream (including a truncated final frame)
    /// - `Err(MalformedRecord)`: corrupt frame; the reader is finished
    pub fn next_record(&mut self) -> Result<Option<WalRecord>> {
        if self.stop.is_some() {
            return Ok(None);
        }

        let frame_start = self.offset;

        // Length prefix: fewer than 4 bytes is end of stream, never an error
        let mut prefix = [0u8; LENGTH_PREFIX_SIZE];
        let got = match read_up_to(&mut self.source, &mut prefix) {
            Ok(n) => n,
            Err(e) => return Err(self.fail(frame_start, e)),
        };

        if got == 0 {
            self.finish(StopReason::EndOfStream);
            return Ok(None);
        }
        if got < LENGTH_PREFIX_SIZE {
            self.finish(StopReason::TruncatedTail {
                offset: frame_start,
                available: got as u64,
            });
            return Ok(None);
        }

        let declared = u32::from_be_bytes(prefix) as u64;

        // Payload grows with what is actually there, not with `declared`
        let mut payload = Vec::new();
        let got = match (&mut self.source).take(declared).read_to_end(&mut payload) {
            Ok(n) => n as u64,
            Err(e) => return Err(self.fail(frame_start, e)),
        };

        if got < declared {
            self.finish(StopReason::TruncatedTail {
                offset: frame_start,
                available: LENGTH_PREFIX_SIZE as u64 + got,
            });
            return Ok(None);
        }

        match WalRecord::decode(&payload) {
            Ok(record) => {
                self.offset += LENGTH_PREFIX_SIZE as u64 + declared;
                Ok(Some(record))
            }
            Err(e) => {
                let reason = e.to_string();
                tracing::warn!(offset = frame_start, %reason, "malformed WAL frame");
                self.finish(StopReason::Malformed {
                    offset: frame_start,
                    reason: reason.clone(),
                });
                Err(EmberError::MalformedRecord {
                    offset: frame_start,
                    reason,
                })
            }
        }
    }

    /// Iterate over the remaining records
    pub fn records(self) -> WalIterator<R> {
        WalIterator { reader: self }
    }

    fn finish(&mut self, reason: StopReason) {
        tracing::debug!(offset = self.offset, ?reason, "WAL reader stopped");
        self.stop = Some(reason);
    }

    fn fail(&mut self, offset: u64, error: io::Error) -> EmberError {
        self.finish(StopReason::ReadFailed {
            offset,
            reason: error.to_string(),
        });
        EmberError::Io(error)
    }
}

/// Iterator over WAL records
pub struct WalIterator<R> {
    reader: WalReader<R>,
}

impl<R: Read> WalIterator<R> {
    /// The underlying reader, e.g. to inspect its stop reason
    pub fn reader(&self) -> &WalReader<R> {
        &self.reader
    }
}

impl<R: Read> Iterator for WalIterator<R> {
    type Item = Result<WalRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.next_record().transpose()
    }
}

impl<R: Read> FusedIterator for WalIterator<R> {}

/// Fill `buf` from `source`, stopping early only at end of stream
fn read_up_to<R: Read>(source: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match source.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
