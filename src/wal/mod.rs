//! Write-Ahead Log (WAL) Module
//!
//! Decodes and encodes the append-only log of writes not yet folded into a
//! chunk.
//!
//! ## Responsibilities
//! - Lazily decode length-prefixed frames from a forward-only byte source
//! - Treat a truncated final frame as a clean end of stream
//! - Stop at the first malformed frame and report its offset
//! - Encode and append frames without rewriting earlier ones
//!
//! ## File Format
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ Frame 1                                 │
//! │ ┌────────────────┬────────────────────┐ │
//! │ │ Len (4, BE u32)│ Payload (Len bytes)│ │
//! │ └────────────────┴────────────────────┘ │
//! ├─────────────────────────────────────────┤
//! │ Frame 2                                 │
//! │ ┌────────────────┬────────────────────┐ │
//! │ │ Len (4, BE u32)│ Payload (Len bytes)│ │
//! │ └────────────────┴────────────────────┘ │
//! └─────────────────────────────────────────┘
//! ```
//!
//! Payload: `{"metric_name": str, "timestamp": i64, "value": f64}`

mod record;
mod reader;
mod scan;
mod writer;

pub use record::WalRecord;
pub use reader::{StopReason, WalIterator, WalReader};
pub use scan::{read_wal, scan, WalScan};
pub use writer::{encode_frame, write_frame, WalWriter};

/// Size of the big-endian payload length that starts every frame
pub const LENGTH_PREFIX_SIZE: usize = 4;
