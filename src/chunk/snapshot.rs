//! Chunk snapshot types
//!
//! In-memory form of a decoded chunk document, plus the read-only queries
//! the inspector runs over it.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

/// A single point of a metric's time series
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DataPoint {
    /// Unix timestamp (seconds)
    pub timestamp: i64,
    pub value: f64,
}

impl DataPoint {
    pub fn new(timestamp: i64, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Bookkeeping the writer stores alongside the records
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChunkMetadata {
    pub created_at: i64,
    pub last_access: i64,
    pub compression_ratio: f64,
    /// Declared total; not checked against `records` on decode
    pub record_count: u64,
}

/// An immutable, time-bounded snapshot of per-metric data points
///
/// Field order matches the writer's document layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChunkSnapshot {
    /// Inclusive lower bound (Unix seconds)
    pub start_time: i64,

    /// Inclusive upper bound (Unix seconds)
    pub end_time: i64,

    /// Metric name → points, both in stored order
    pub records: IndexMap<String, Vec<DataPoint>>,

    pub metadata: ChunkMetadata,

    /// Opaque tag, round-tripped as-is
    pub compression_state: String,
}

impl ChunkSnapshot {
    /// Metric names in stored order
    pub fn metric_names(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// Points for one metric
    pub fn points(&self, metric: &str) -> Option<&[DataPoint]> {
        self.records.get(metric).map(Vec::as_slice)
    }

    /// Most recently stored point of a metric
    pub fn latest(&self, metric: &str) -> Option<&DataPoint> {
        self.records.get(metric).and_then(|points| points.last())
    }

    /// Number of points actually present across all metrics
    pub fn total_points(&self) -> u64 {
        self.records.values().map(|points| points.len() as u64).sum()
    }

    /// Count/min/max/avg over a metric; `None` if absent or empty
    pub fn summarize(&self, metric: &str) -> Option<MetricSummary> {
        let points = self.records.get(metric)?;
        if points.is_empty() {
            return None;
        }

        let sum: f64 = points.iter().map(|p| p.value).sum();
        let count = points.len();

        Some(MetricSummary {
            count,
            min: points.iter().map(|p| p.value).fold(f64::INFINITY, f64::min),
            max: points
                .iter()
                .map(|p| p.value)
                .fold(f64::NEG_INFINITY, f64::max),
            avg: sum / count as f64,
        })
    }

    /// Cross-field checks the decoder deliberately skips
    ///
    /// Returns every inconsistency found; an empty vector means the
    /// snapshot is self-consistent. Bounds are inclusive.
    pub fn check_consistency(&self) -> Vec<Inconsistency> {
        let mut issues = Vec::new();

        if self.start_time > self.end_time {
            issues.push(Inconsistency::InvertedTimeRange {
                start_time: self.start_time,
                end_time: self.end_time,
            });
        }

        for (metric, points) in &self.records {
            for (index, point) in points.iter().enumerate() {
                if point.timestamp < self.start_time || point.timestamp > self.end_time {
                    issues.push(Inconsistency::PointOutOfRange {
                        metric: metric.clone(),
                        index,
                        timestamp: point.timestamp,
                    });
                }
            }
        }

        let actual = self.total_points();
        if actual != self.metadata.record_count {
            issues.push(Inconsistency::RecordCountMismatch {
                declared: self.metadata.record_count,
                actual,
            });
        }

        issues
    }
}

/// Aggregate view of one metric within a chunk
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

/// A cross-field mismatch reported by [`ChunkSnapshot::check_consistency`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inconsistency {
    /// `start_time` is after `end_time`
    InvertedTimeRange { start_time: i64, end_time: i64 },

    /// A point lies outside `[start_time, end_time]`
    PointOutOfRange {
        metric: String,
        index: usize,
        timestamp: i64,
    },

    /// `metadata.record_count` disagrees with the stored points
    RecordCountMismatch { declared: u64, actual: u64 },
}

impl fmt::Display for Inconsistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inconsistency::InvertedTimeRange {
                start_time,
                end_time,
            } => write!(f, "start_time {} is after end_time {}", start_time, end_time),
            Inconsistency::PointOutOfRange {
                metric,
                index,
                timestamp,
            } => write!(
                f,
                "records.{}[{}] timestamp {} lies outside the chunk range",
                metric, index, timestamp
            ),
            Inconsistency::RecordCountMismatch { declared, actual } => write!(
                f,
                "metadata.record_count is {} but {} points are stored",
                declared, actual
            ),
        }
    }
}
