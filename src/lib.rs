//! # Ember Inspect
//!
//! Decoder, encoder and inspector for the on-disk state of the Ember
//! time-series store:
//! - Chunk snapshots: one structured document per immutable chunk
//! - Write-ahead log: length-prefixed, self-describing frames
//! - Truncated WAL tails end cleanly, corrupt frames stop the stream
//! - Text reporter over a data directory
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  ember-inspect (CLI)                        │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      Reporter                               │
//! │          (directory listing + text rendering)               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │ Chunk Codec │          │  WAL Codec  │
//!   │ (document)  │          │  (frames)   │
//!   └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

mod document;

pub mod chunk;
pub mod wal;
pub mod report;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{EmberError, Result};
pub use config::{Config, TimestampZone};
pub use chunk::{ChunkSnapshot, DataPoint};
pub use wal::{WalReader, WalRecord};
pub use report::Reporter;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of Ember Inspect
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
