//! Chunk Module
//!
//! Immutable chunk snapshots: one structured document per chunk file.
//!
//! ## Responsibilities
//! - Decode a snapshot document into an ordered record set
//! - Encode a snapshot back to the same document shape
//! - Opt-in consistency checks and per-metric summaries
//!
//! ## Decoding Contract
//! - Every field is required; failures name the field's logical path
//! - Empty `records` and empty per-metric sequences are valid
//! - No cross-field validation on decode (see `check_consistency`)

mod codec;
mod snapshot;

pub use codec::{decode, encode, read_chunk, write_chunk};
pub use snapshot::{ChunkMetadata, ChunkSnapshot, DataPoint, Inconsistency, MetricSummary};
