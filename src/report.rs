//! Reporter
//!
//! Lists a data directory and renders chunks and the WAL as text.
//!
//! The reporter only consumes codec output. A chunk that fails to decode is
//! reported and skipped; a malformed WAL frame is reported after the records
//! decoded before it. Only failures of the output sink abort a run.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::chunk::{self, ChunkSnapshot};
use crate::config::{Config, TimestampZone};
use crate::error::Result;
use crate::wal::{self, StopReason, WalScan};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Counters for one reporting run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub chunks_read: usize,
    pub chunks_failed: usize,
    pub wal_records: usize,
    /// A WAL frame was malformed or the WAL could not be read
    pub wal_failed: bool,
}

impl ReportSummary {
    pub fn has_failures(&self) -> bool {
        self.chunks_failed > 0 || self.wal_failed
    }
}

/// Renders chunk and WAL contents to a text sink
pub struct Reporter<W> {
    config: Config,
    out: W,
    summary: ReportSummary,
}

impl<W: Write> Reporter<W> {
    pub fn new(config: Config, out: W) -> Self {
        Self {
            config,
            out,
            summary: ReportSummary::default(),
        }
    }

    /// Report every chunk, then the WAL
    pub fn run(&mut self) -> Result<ReportSummary> {
        self.report_chunks()?;
        self.report_wal()?;
        Ok(self.summary.clone())
    }

    /// Report every chunk file in the configured chunk directory
    pub fn report_chunks(&mut self) -> Result<()> {
        let dir = self.config.chunk_dir_path();
        let files = list_chunk_files(&dir, &self.config.chunk_extension)?;

        if files.is_empty() {
            tracing::info!(dir = %dir.display(), "no chunk files");
            writeln!(self.out, "No chunk files found")?;
            return Ok(());
        }

        for path in files {
            self.report_chunk_file(&path)?;
        }
        Ok(())
    }

    /// Decode and render one chunk file
    pub fn report_chunk_file(&mut self, path: &Path) -> Result<()> {
        writeln!(self.out, "\n===== CHUNK FILE: {} =====", path.display())?;

        match chunk::read_chunk(path) {
            Ok(snapshot) => {
                self.summary.chunks_read += 1;
                self.render_chunk(&snapshot)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to decode chunk");
                self.summary.chunks_failed += 1;
                writeln!(self.out, "Error reading chunk: {}", e)?;
                Ok(())
            }
        }
    }

    /// Render a decoded snapshot (body only, no file header)
    pub fn render_chunk(&mut self, snapshot: &ChunkSnapshot) -> Result<()> {
        let zone = self.config.time_zone;
        let out = &mut self.out;

        writeln!(
            out,
            "Time range: {} to {}",
            format_timestamp(snapshot.start_time, zone),
            format_timestamp(snapshot.end_time, zone)
        )?;
        writeln!(out, "Compression: {}", snapshot.compression_state)?;
        writeln!(out, "Metadata:")?;
        writeln!(
            out,
            "  - Created: {}",
            format_timestamp(snapshot.metadata.created_at, zone)
        )?;
        writeln!(
            out,
            "  - Last Access: {}",
            format_timestamp(snapshot.metadata.last_access, zone)
        )?;
        writeln!(
            out,
            "  - Compression Ratio: {:?}",
            snapshot.metadata.compression_ratio
        )?;
        writeln!(out, "  - Record Count: {}", snapshot.metadata.record_count)?;

        if self.config.check_consistency {
            for issue in snapshot.check_consistency() {
                writeln!(out, "Warning: {}", issue)?;
            }
        }

        writeln!(out, "\nRecords:")?;
        for (metric, points) in &snapshot.records {
            writeln!(out, "\nMetric: {}", metric)?;
            for (i, point) in points.iter().enumerate() {
                writeln!(
                    out,
                    "  {}. Time: {}, Value: {:?}",
                    i + 1,
                    format_timestamp(point.timestamp, zone),
                    point.value
                )?;
            }

            if self.config.show_summary {
                if let Some(s) = snapshot.summarize(metric) {
                    writeln!(
                        out,
                        "  Summary: count={} min={:?} max={:?} avg={:?}",
                        s.count, s.min, s.max, s.avg
                    )?;
                }
            }
        }
        Ok(())
    }

    /// Report the configured WAL file
    pub fn report_wal(&mut self) -> Result<()> {
        let path = self.config.wal_path();
        if !path.is_file() {
            tracing::info!(path = %path.display(), "no WAL file");
            writeln!(self.out, "No WAL file found")?;
            return Ok(());
        }
        self.report_wal_file(&path)
    }

    /// Decode and render one WAL file
    pub fn report_wal_file(&mut self, path: &Path) -> Result<()> {
        writeln!(self.out, "\n===== WAL FILE: {} =====", path.display())?;

        match wal::read_wal(path) {
            Ok(scanned) => self.render_wal(&scanned),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to open WAL");
                self.summary.wal_failed = true;
                writeln!(self.out, "Error reading WAL: {}", e)?;
                Ok(())
            }
        }
    }

    /// Render scanned WAL records and how the stream ended
    pub fn render_wal(&mut self, scanned: &WalScan) -> Result<()> {
        let zone = self.config.time_zone;
        self.summary.wal_records += scanned.records.len();

        writeln!(self.out, "Found {} records in WAL", scanned.records.len())?;

        for (i, record) in scanned.records.iter().enumerate() {
            writeln!(self.out, "\nRecord {}:", i + 1)?;
            writeln!(self.out, "  Metric: {}", record.metric_name)?;
            writeln!(self.out, "  Time: {}", format_timestamp(record.timestamp, zone))?;
            writeln!(self.out, "  Value: {:?}", record.value)?;
        }

        match &scanned.stop {
            StopReason::EndOfStream => {}
            StopReason::TruncatedTail { offset, available } => {
                writeln!(
                    self.out,
                    "\nIgnored incomplete frame at offset {} ({} bytes)",
                    offset, available
                )?;
            }
            StopReason::Malformed { offset, reason } => {
                self.summary.wal_failed = true;
                writeln!(
                    self.out,
                    "\nError reading WAL: malformed record at offset {}: {}",
                    offset, reason
                )?;
            }
            StopReason::ReadFailed { offset, reason } => {
                self.summary.wal_failed = true;
                writeln!(
                    self.out,
                    "\nError reading WAL at offset {}: {}",
                    offset, reason
                )?;
            }
        }
        Ok(())
    }

    /// Counters accumulated so far
    pub fn summary(&self) -> &ReportSummary {
        &self.summary
    }

    /// Recover the output sink
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Chunk files in `dir` with the given extension, sorted by file name
///
/// A missing directory yields an empty list.
pub fn list_chunk_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == extension) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Render a Unix timestamp as `YYYY-MM-DD HH:MM:SS`
///
/// Timestamps chrono cannot represent are rendered as the raw integer.
pub fn format_timestamp(timestamp: i64, zone: TimestampZone) -> String {
    let Some(utc) = DateTime::from_timestamp(timestamp, 0) else {
        return timestamp.to_string();
    };

    match zone {
        TimestampZone::Utc => utc.format(TIMESTAMP_FORMAT).to_string(),
        TimestampZone::Local => utc.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string(),
    }
}
